//! Run-scoped accumulation of scraped records.
//!
//! The [`Aggregator`] owns the three row-aligned record sets plus the
//! visited-link set for a single run, and is the only place recipe
//! identifiers are assigned.

use std::collections::HashSet;

use url::Url;

use crate::nutrition::NutritionRecord;

/// One row of the `recipe_info` table, minus the category columns which
/// live in the shared [`CategoryTable`].
#[derive(Debug, Clone)]
pub struct RecipeRecord {
    /// 1-based, assigned at aggregation time, never reused.
    pub id: u32,
    pub name: String,
    pub link: String,
    pub cooking_time: String,
}

/// One ingredient line; many rows share a recipe id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientRow {
    pub recipe_id: u32,
    pub ingredient: String,
}

/// Category columns in first-seen order.
///
/// Every column always holds exactly one entry per aggregated recipe: a
/// column introduced by recipe k is backfilled with `None` for recipes
/// 1..k, and recipes lacking a known category append `None` to it. The
/// table stays rectangular no matter when a category first shows up.
#[derive(Debug, Default)]
pub struct CategoryTable {
    columns: Vec<(String, Vec<Option<String>>)>,
}

impl CategoryTable {
    fn push_row(&mut self, rows_before: usize, categories: &[(String, String)]) {
        for (name, _) in categories {
            if !self.columns.iter().any(|(n, _)| n == name) {
                self.columns.push((name.clone(), vec![None; rows_before]));
            }
        }
        for (name, values) in &mut self.columns {
            let status = categories
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, s)| s.clone());
            values.push(status);
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn column(&self, name: &str) -> Option<&[Option<String>]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    /// Status values for row `idx` (0-based), in column order.
    pub fn row(&self, idx: usize) -> Vec<Option<String>> {
        self.columns
            .iter()
            .map(|(_, values)| values[idx].clone())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Immutable hand-off from aggregation. The loader reads the three
/// record sets; `visited` rides along for reporting.
#[derive(Debug)]
pub struct Dataset {
    pub recipes: Vec<RecipeRecord>,
    pub nutrition: Vec<NutritionRecord>,
    pub ingredients: Vec<IngredientRow>,
    pub categories: CategoryTable,
    pub visited: HashSet<Url>,
}

#[derive(Debug, Default)]
pub struct Aggregator {
    recipes: Vec<RecipeRecord>,
    nutrition: Vec<NutritionRecord>,
    ingredients: Vec<IngredientRow>,
    categories: CategoryTable,
    visited: HashSet<Url>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one fully extracted recipe and return its identifier.
    ///
    /// Identifiers are 1-based and gap-free across successful recipes;
    /// failed fetches never reach this point and so never consume one.
    /// One row lands in each of the three record sets at the same
    /// ordinal position.
    pub fn push_recipe(
        &mut self,
        name: String,
        link: &Url,
        cooking_time: String,
        categories: &[(String, String)],
        nutrition: NutritionRecord,
        ingredients: Vec<String>,
    ) -> u32 {
        let id = self.recipes.len() as u32 + 1;
        self.categories.push_row(self.recipes.len(), categories);
        self.recipes.push(RecipeRecord {
            id,
            name,
            link: link.to_string(),
            cooking_time,
        });
        self.nutrition.push(nutrition);
        self.ingredients.extend(
            ingredients
                .into_iter()
                .map(|ingredient| IngredientRow { recipe_id: id, ingredient }),
        );
        id
    }

    /// Record a link as seen for the rest of the run, whether or not its
    /// fetch succeeded.
    pub fn mark_visited(&mut self, url: Url) -> bool {
        self.visited.insert(url)
    }

    pub fn visited(&self) -> &HashSet<Url> {
        &self.visited
    }

    pub fn recipe_count(&self) -> usize {
        self.recipes.len()
    }

    pub fn into_dataset(self) -> Dataset {
        Dataset {
            recipes: self.recipes,
            nutrition: self.nutrition,
            ingredients: self.ingredients,
            categories: self.categories,
            visited: self.visited,
        }
    }
}
