//! Recipe link collection from listing pages.

use std::collections::HashSet;
use std::sync::OnceLock;

use scraper::{Html, Selector};
use url::Url;

/// Anchors pointing at individual recipe pages.
const RECIPE_LINK_SELECTOR: &str = "a[href*='/recipes/']";

/// Extract recipe links from a listing page, resolved against `base`,
/// in page order, dropping any link already in `visited`.
///
/// Duplicates within the page collapse to their first occurrence.
/// `visited` is read only; the caller marks links visited once it has
/// actually processed them.
pub fn collect_new_links(doc: &Html, base: &Url, visited: &HashSet<Url>) -> Vec<Url> {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    let selector = SELECTOR.get_or_init(|| Selector::parse(RECIPE_LINK_SELECTOR).unwrap());

    let mut seen_on_page = HashSet::new();
    doc.select(selector)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|raw| base.join(raw).ok())
        .map(|mut u| {
            u.set_fragment(None);
            u
        })
        .filter(|u| !visited.contains(u) && seen_on_page.insert(u.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
        <html><body>
            <a href="/recipes/lasagne">Lasagne</a>
            <a href="/recipes/pad-thai">Pad thai</a>
            <a href="/recipes/lasagne">Lasagne again</a>
            <a href="/about">About us</a>
            <a href="https://www.example.com/recipes/external">External</a>
        </body></html>
    "#;

    #[test]
    fn resolves_and_orders_recipe_links() {
        let doc = Html::parse_document(LISTING);
        let base = Url::parse("https://www.bbcgoodfood.com").unwrap();

        let links = collect_new_links(&doc, &base, &HashSet::new());
        assert_eq!(
            links,
            vec![
                Url::parse("https://www.bbcgoodfood.com/recipes/lasagne").unwrap(),
                Url::parse("https://www.bbcgoodfood.com/recipes/pad-thai").unwrap(),
                Url::parse("https://www.example.com/recipes/external").unwrap(),
            ]
        );
    }

    #[test]
    fn filters_links_already_visited() {
        let doc = Html::parse_document(LISTING);
        let base = Url::parse("https://www.bbcgoodfood.com").unwrap();

        let mut visited = HashSet::new();
        visited.insert(Url::parse("https://www.bbcgoodfood.com/recipes/lasagne").unwrap());

        let links = collect_new_links(&doc, &base, &visited);
        assert!(!links.iter().any(|u| u.path() == "/recipes/lasagne"));
        assert_eq!(links.len(), 2);
    }

    #[test]
    fn visited_set_is_not_mutated() {
        let doc = Html::parse_document(LISTING);
        let base = Url::parse("https://www.bbcgoodfood.com").unwrap();
        let visited = HashSet::new();

        collect_new_links(&doc, &base, &visited);
        assert!(visited.is_empty());
    }
}
