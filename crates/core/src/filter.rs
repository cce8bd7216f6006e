//! Filter state and the pure filter/sort pipeline.
//!
//! `visible` is a pure projection: catalog + filter state in, ordered
//! product subset out. It never mutates the catalog and never fails.

use crate::product::{Catalog, Product};

/// Sort order for the visible product list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Popular items first (stable ties). The default.
    #[default]
    Popularity,
    /// Price ascending.
    PriceAsc,
    /// Price descending.
    PriceDesc,
    /// New items first (stable ties).
    Newest,
}

impl SortKey {
    /// Parse a sort key from its wire form.
    ///
    /// Unknown values fall back to popularity ordering.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "price_asc" => Self::PriceAsc,
            "price_desc" => Self::PriceDesc,
            "new" => Self::Newest,
            _ => Self::Popularity,
        }
    }

    /// Wire form of the sort key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Popularity => "pop",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::Newest => "new",
        }
    }
}

/// The user's current category/brand/strength/query/sort selection.
///
/// Exactly one sort mode is active at all times. Empty strings mean
/// unconstrained; `category` uses the `"all"` sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    /// Selected category tab, or `"all"`.
    pub category: String,
    /// Exact brand match, empty = unconstrained.
    pub brand: String,
    /// Exact strength match by string-equivalent comparison, empty = unconstrained.
    pub strength: String,
    /// Case-insensitive substring query over title/brand/flavor.
    pub q: String,
    /// Active sort mode.
    pub sort: SortKey,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            category: "all".to_string(),
            brand: String::new(),
            strength: String::new(),
            q: String::new(),
            sort: SortKey::Popularity,
        }
    }
}

/// Compute the ordered visible subset of the catalog.
///
/// Stages apply in fixed order: category, brand, strength, query, sort.
/// Each stage is a total function; an empty catalog yields an empty
/// result. Sorting works on a copy and is stable, so boolean sort keys
/// preserve the relative order of ties.
#[must_use]
pub fn visible(catalog: &Catalog, filters: &FilterState) -> Vec<Product> {
    let query = filters.q.trim().to_lowercase();

    let mut items: Vec<Product> = catalog
        .products()
        .iter()
        .filter(|p| filters.category == "all" || p.category == filters.category)
        .filter(|p| filters.brand.is_empty() || p.brand == filters.brand)
        .filter(|p| {
            filters.strength.is_empty()
                || p.strength.is_some_and(|s| s.to_string() == filters.strength)
        })
        .filter(|p| query.is_empty() || haystack(p).contains(&query))
        .cloned()
        .collect();

    match filters.sort {
        SortKey::PriceAsc => items.sort_by(|a, b| a.price.cmp(&b.price)),
        SortKey::PriceDesc => items.sort_by(|a, b| b.price.cmp(&a.price)),
        SortKey::Newest => items.sort_by_key(|p| !p.is_new),
        SortKey::Popularity => items.sort_by_key(|p| !p.popular),
    }

    items
}

/// Lowercased search haystack: title, brand, and flavor joined with spaces.
fn haystack(product: &Product) -> String {
    format!("{} {} {}", product.title, product.brand, product.flavor).to_lowercase()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    struct Fixture<'a> {
        id: &'a str,
        category: &'a str,
        brand: &'a str,
        flavor: &'a str,
        strength: Option<u32>,
        price: i64,
        is_new: bool,
        popular: bool,
    }

    impl Default for Fixture<'_> {
        fn default() -> Self {
            Self {
                id: "p",
                category: "pods",
                brand: "Brand",
                flavor: "Mint",
                strength: None,
                price: 100,
                is_new: false,
                popular: false,
            }
        }
    }

    fn product(fx: Fixture<'_>) -> Product {
        Product {
            id: fx.id.to_string(),
            title: format!("Title {}", fx.id),
            brand: fx.brand.to_string(),
            flavor: fx.flavor.to_string(),
            category: fx.category.to_string(),
            strength: fx.strength,
            volume_ml: None,
            price: Decimal::from(fx.price),
            old_price: None,
            is_new: fx.is_new,
            popular: fx.popular,
            img: String::new(),
        }
    }

    fn ids(items: &[Product]) -> Vec<&str> {
        items.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_empty_catalog_yields_empty_result() {
        let catalog = Catalog::default();
        assert!(visible(&catalog, &FilterState::default()).is_empty());
    }

    #[test]
    fn test_category_all_keeps_everything() {
        let catalog = Catalog::new(vec![
            product(Fixture { id: "a", category: "pods", ..Fixture::default() }),
            product(Fixture { id: "b", category: "liquids", ..Fixture::default() }),
        ]);
        assert_eq!(ids(&visible(&catalog, &FilterState::default())), vec!["a", "b"]);
    }

    #[test]
    fn test_category_exact_match() {
        let catalog = Catalog::new(vec![
            product(Fixture { id: "a", category: "pods", ..Fixture::default() }),
            product(Fixture { id: "b", category: "liquids", ..Fixture::default() }),
        ]);
        let filters = FilterState {
            category: "liquids".to_string(),
            ..FilterState::default()
        };
        assert_eq!(ids(&visible(&catalog, &filters)), vec!["b"]);
    }

    #[test]
    fn test_brand_exact_match() {
        let catalog = Catalog::new(vec![
            product(Fixture { id: "a", brand: "Alpha", ..Fixture::default() }),
            product(Fixture { id: "b", brand: "Beta", ..Fixture::default() }),
        ]);
        let filters = FilterState {
            brand: "Alpha".to_string(),
            ..FilterState::default()
        };
        assert_eq!(ids(&visible(&catalog, &filters)), vec!["a"]);
    }

    #[test]
    fn test_strength_string_equivalent_match() {
        let catalog = Catalog::new(vec![
            product(Fixture { id: "a", strength: Some(50), ..Fixture::default() }),
            product(Fixture { id: "b", strength: Some(30), ..Fixture::default() }),
            product(Fixture { id: "c", strength: None, ..Fixture::default() }),
        ]);
        let filters = FilterState {
            strength: "50".to_string(),
            ..FilterState::default()
        };
        // products without a strength never match an active strength filter
        assert_eq!(ids(&visible(&catalog, &filters)), vec!["a"]);
    }

    #[test]
    fn test_query_case_insensitive_over_title_brand_flavor() {
        let catalog = Catalog::new(vec![
            product(Fixture { id: "a", flavor: "Frozen Berry", ..Fixture::default() }),
            product(Fixture { id: "b", flavor: "Citrus", ..Fixture::default() }),
            product(Fixture { id: "c", brand: "Berrymax", flavor: "", ..Fixture::default() }),
        ]);
        let filters = FilterState {
            q: "BERRY".to_string(),
            ..FilterState::default()
        };
        assert_eq!(ids(&visible(&catalog, &filters)), vec!["a", "c"]);
    }

    #[test]
    fn test_sort_price_asc_desc_reverse_each_other() {
        let catalog = Catalog::new(vec![
            product(Fixture { id: "a", price: 300, ..Fixture::default() }),
            product(Fixture { id: "b", price: 100, ..Fixture::default() }),
            product(Fixture { id: "c", price: 200, ..Fixture::default() }),
        ]);
        let asc = visible(
            &catalog,
            &FilterState { sort: SortKey::PriceAsc, ..FilterState::default() },
        );
        let desc = visible(
            &catalog,
            &FilterState { sort: SortKey::PriceDesc, ..FilterState::default() },
        );
        assert_eq!(ids(&asc), vec!["b", "c", "a"]);
        let mut reversed = asc;
        reversed.reverse();
        // distinct prices: descending is exactly the reversed ascending order
        assert_eq!(ids(&reversed), ids(&desc));
    }

    #[test]
    fn test_sort_popularity_is_stable() {
        let catalog = Catalog::new(vec![
            product(Fixture { id: "a", popular: true, ..Fixture::default() }),
            product(Fixture { id: "b", popular: false, ..Fixture::default() }),
            product(Fixture { id: "c", popular: true, ..Fixture::default() }),
        ]);
        let result = visible(&catalog, &FilterState::default());
        assert_eq!(ids(&result), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_sort_newest_first_is_stable() {
        let catalog = Catalog::new(vec![
            product(Fixture { id: "a", ..Fixture::default() }),
            product(Fixture { id: "b", is_new: true, ..Fixture::default() }),
            product(Fixture { id: "c", is_new: true, ..Fixture::default() }),
        ]);
        let filters = FilterState { sort: SortKey::Newest, ..FilterState::default() };
        assert_eq!(ids(&visible(&catalog, &filters)), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_visible_is_idempotent() {
        let catalog = Catalog::new(vec![
            product(Fixture { id: "a", price: 200, popular: true, ..Fixture::default() }),
            product(Fixture { id: "b", price: 100, ..Fixture::default() }),
            product(Fixture { id: "c", price: 300, popular: true, ..Fixture::default() }),
        ]);
        let filters = FilterState {
            q: "title".to_string(),
            sort: SortKey::PriceAsc,
            ..FilterState::default()
        };
        let first = visible(&catalog, &filters);
        let second = visible(&catalog, &filters);
        assert_eq!(first, second);
    }

    #[test]
    fn test_visible_does_not_mutate_catalog() {
        let products = vec![
            product(Fixture { id: "a", price: 300, ..Fixture::default() }),
            product(Fixture { id: "b", price: 100, ..Fixture::default() }),
        ];
        let catalog = Catalog::new(products.clone());
        let _ = visible(
            &catalog,
            &FilterState { sort: SortKey::PriceAsc, ..FilterState::default() },
        );
        assert_eq!(catalog.products(), products.as_slice());
    }

    #[test]
    fn test_unknown_sort_falls_back_to_popularity() {
        assert_eq!(SortKey::parse("alphabetical"), SortKey::Popularity);
        assert_eq!(SortKey::parse(""), SortKey::Popularity);
        assert_eq!(SortKey::parse("price_asc"), SortKey::PriceAsc);
        assert_eq!(SortKey::parse("price_desc"), SortKey::PriceDesc);
        assert_eq!(SortKey::parse("new"), SortKey::Newest);
    }
}
