//! Product records and the session catalog.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single purchasable product.
///
/// Products are externally sourced and immutable for the lifetime of a
/// session. `old_price` is informational only and never enters totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Opaque stable identifier, unique within the catalog.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Brand name, empty when unknown.
    #[serde(default)]
    pub brand: String,
    /// Flavor description, empty when unknown.
    #[serde(default)]
    pub flavor: String,
    /// Category tag used for tab filtering.
    pub category: String,
    /// Nicotine strength in mg, if applicable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength: Option<u32>,
    /// Volume in ml, if applicable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_ml: Option<u32>,
    /// Current price.
    pub price: Decimal,
    /// Previous price for strikethrough display only.
    #[serde(rename = "oldPrice", default, skip_serializing_if = "Option::is_none")]
    pub old_price: Option<Decimal>,
    /// Show the NEW badge.
    #[serde(rename = "new", default)]
    pub is_new: bool,
    /// Show the HIT badge.
    #[serde(default)]
    pub popular: bool,
    /// Display asset reference.
    #[serde(default)]
    pub img: String,
}

/// The full set of purchasable products for a session.
///
/// Loaded once at startup and never mutated afterwards. Filtering works
/// on copies; the stored ordering is the source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Create a catalog from an ordered product list.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// All products in source order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Distinct non-empty brands, sorted.
    ///
    /// Used to hydrate the brand filter options.
    #[must_use]
    pub fn brands(&self) -> Vec<String> {
        let mut brands: Vec<String> = self
            .products
            .iter()
            .filter(|p| !p.brand.is_empty())
            .map(|p| p.brand.clone())
            .collect();
        brands.sort();
        brands.dedup();
        brands
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
