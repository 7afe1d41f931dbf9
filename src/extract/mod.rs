//! Per-recipe field extractors.
//!
//! Pure functions over an already fetched document. These are the
//! site-specific collaborator set; everything downstream of them is
//! site-agnostic.

use std::sync::OnceLock;

use scraper::{Html, Selector};

use crate::error::{Result, ScrapeError};

fn element_text(el: scraper::ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Recipe display name from the page heading.
///
/// A page without a heading is treated as a failed extraction by the
/// pipeline: the recipe is skipped and the run continues.
pub fn recipe_name(doc: &Html) -> Result<String> {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    let selector = SELECTOR.get_or_init(|| Selector::parse("h1").unwrap());
    doc.select(selector)
        .next()
        .map(element_text)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ScrapeError::Parse("recipe name heading not found".into()))
}

/// Cooking time as shown on the page, taken from the raw response body.
/// Recipes without a time block report "Not specified".
pub fn cooking_time(body: &str) -> String {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    let selector = SELECTOR.get_or_init(|| Selector::parse("time[datetime]").unwrap());

    let doc = Html::parse_document(body);
    let parts: Vec<String> = doc
        .select(selector)
        .map(element_text)
        .filter(|s| !s.is_empty())
        .collect();

    if parts.is_empty() {
        "Not specified".to_string()
    } else {
        parts.join(" + ")
    }
}

/// Raw nutrition (name, value) pairs, paired by table-cell position.
pub fn nutrition_pairs(doc: &Html) -> Vec<(String, String)> {
    static KEYS: OnceLock<Selector> = OnceLock::new();
    static VALUES: OnceLock<Selector> = OnceLock::new();
    let keys = KEYS.get_or_init(|| Selector::parse(".key-value-blocks__key").unwrap());
    let values = VALUES.get_or_init(|| Selector::parse(".key-value-blocks__value").unwrap());

    doc.select(keys)
        .map(element_text)
        .zip(doc.select(values).map(element_text))
        .collect()
}

/// Dietary/category flags shown on the page, keyed by display name, in
/// page order. Present flags map to "Y"; categories the page does not
/// show are simply absent.
pub fn categories(doc: &Html) -> Vec<(String, String)> {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    let selector = SELECTOR.get_or_init(|| Selector::parse(".terms-icons-list__text").unwrap());
    doc.select(selector)
        .map(element_text)
        .filter(|name| !name.is_empty())
        .map(|name| (name, "Y".to_string()))
        .collect()
}

/// Ingredient lines, in page order.
pub fn ingredients(doc: &Html) -> Vec<String> {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    let selector = SELECTOR.get_or_init(|| Selector::parse("li.ingredients-list__item").unwrap());
    doc.select(selector)
        .map(element_text)
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECIPE_PAGE: &str = r#"
        <html><body>
            <h1 class="heading-1">Best ever lasagne</h1>
            <div class="recipe-cook-and-prep">
                <time datetime="PT30M">30 mins</time>
                <time datetime="PT1H">1 hr</time>
            </div>
            <ul class="terms-icons-list">
                <li><span class="terms-icons-list__text">Freezable</span></li>
                <li><span class="terms-icons-list__text">Easy</span></li>
            </ul>
            <table>
                <tr>
                    <td class="key-value-blocks__key">kcal</td>
                    <td class="key-value-blocks__value">580</td>
                </tr>
                <tr>
                    <td class="key-value-blocks__key">fat</td>
                    <td class="key-value-blocks__value">31g</td>
                </tr>
            </table>
            <ul>
                <li class="ingredients-list__item">500g beef mince</li>
                <li class="ingredients-list__item">2 onions, chopped</li>
            </ul>
        </body></html>
    "#;

    #[test]
    fn extracts_name_from_heading() {
        let doc = Html::parse_document(RECIPE_PAGE);
        assert_eq!(recipe_name(&doc).unwrap(), "Best ever lasagne");
    }

    #[test]
    fn missing_heading_is_a_parse_error() {
        let doc = Html::parse_document("<html><body><p>nothing</p></body></html>");
        assert!(matches!(recipe_name(&doc), Err(ScrapeError::Parse(_))));
    }

    #[test]
    fn cooking_time_joins_time_elements() {
        assert_eq!(cooking_time(RECIPE_PAGE), "30 mins + 1 hr");
    }

    #[test]
    fn cooking_time_defaults_when_absent() {
        assert_eq!(cooking_time("<html><body></body></html>"), "Not specified");
    }

    #[test]
    fn nutrition_pairs_align_by_position() {
        let doc = Html::parse_document(RECIPE_PAGE);
        assert_eq!(
            nutrition_pairs(&doc),
            vec![
                ("kcal".to_string(), "580".to_string()),
                ("fat".to_string(), "31g".to_string()),
            ]
        );
    }

    #[test]
    fn categories_are_flagged_in_page_order() {
        let doc = Html::parse_document(RECIPE_PAGE);
        assert_eq!(
            categories(&doc),
            vec![
                ("Freezable".to_string(), "Y".to_string()),
                ("Easy".to_string(), "Y".to_string()),
            ]
        );
    }

    #[test]
    fn ingredients_keep_page_order() {
        let doc = Html::parse_document(RECIPE_PAGE);
        assert_eq!(
            ingredients(&doc),
            vec!["500g beef mince", "2 onions, chopped"]
        );
    }
}
