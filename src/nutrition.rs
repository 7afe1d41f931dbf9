//! Fixed-schema nutrition normalization.
//!
//! Recipe pages report a loose set of nutrient rows; the store wants
//! exactly eight. Records are seeded fully absent and overlaid by exact
//! key match, so unknown nutrients are dropped and missing ones stay
//! absent rather than erroring.

/// The eight nutrient keys as they appear on recipe pages.
pub const NUTRIENT_KEYS: [&str; 8] = [
    "kcal",
    "fat",
    "saturates",
    "carbs",
    "sugars",
    "fibre",
    "protein",
    "salt",
];

/// Destination column names, aligned index-for-index with
/// [`NUTRIENT_KEYS`]. Renaming happens only at the load boundary.
pub const NUTRIENT_COLUMNS: [&str; 8] = [
    "kcal",
    "Fat(g)",
    "Saturates(g)",
    "Carbs(g)",
    "Sugars(g)",
    "Fibre(g)",
    "Protein(g)",
    "Salt(g)",
];

/// Per-recipe nutrition values over the fixed 8-key schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NutritionRecord {
    values: [Option<String>; 8],
}

impl NutritionRecord {
    /// Build a record from the raw (name, value) pairs scraped off the
    /// page. Pairs whose name is not a schema key are silently dropped;
    /// schema keys with no matching pair stay absent.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let mut record = Self::default();
        for (name, value) in pairs {
            if let Some(idx) = NUTRIENT_KEYS.iter().position(|k| k == name) {
                record.values[idx] = Some(normalize(name, value));
            }
        }
        record
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        let idx = NUTRIENT_KEYS.iter().position(|k| *k == key)?;
        self.values[idx].as_deref()
    }

    /// Values in schema order, for row binding at load time.
    pub fn columns(&self) -> &[Option<String>; 8] {
        &self.values
    }
}

/// Strip the one-character unit suffix from a raw value. `kcal` is a
/// bare number on the page and is stored verbatim.
pub fn normalize(key: &str, raw: &str) -> String {
    if key == "kcal" {
        raw.to_string()
    } else {
        let mut value = raw.to_string();
        value.pop();
        value
    }
}
