//! Display view models for catalog and cart.
//!
//! Projections are total: every call recomputes the full view from the
//! current state. There is no diffing; catalogs are small and this is
//! not a performance-critical path.

use serde::Serialize;

use kiosk_core::cart::{Cart, CartLine};
use kiosk_core::order::format_amount;
use kiosk_core::product::Product;

/// Product display data.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub id: String,
    pub title: String,
    /// Brand/flavor/strength/volume joined with " • ", empty segments omitted.
    pub meta: String,
    pub price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_price: Option<String>,
    /// NEW before HIT, both possible.
    pub badges: Vec<&'static str>,
    pub img: String,
}

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub id: String,
    pub title: String,
    pub price: String,
    pub qty: u32,
    pub img: String,
}

/// Cart display data with aggregates.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub count: u32,
    pub total: String,
}

/// Format an amount with the currency suffix.
fn format_price(amount: rust_decimal::Decimal) -> String {
    format!("{} ₴", format_amount(amount))
}

impl From<&Product> for ProductView {
    fn from(p: &Product) -> Self {
        let mut meta: Vec<String> = Vec::new();
        if !p.brand.is_empty() {
            meta.push(format!("бренд: {}", p.brand));
        }
        if !p.flavor.is_empty() {
            meta.push(format!("вкус: {}", p.flavor));
        }
        if let Some(strength) = p.strength.filter(|s| *s > 0) {
            meta.push(format!("{strength} mg"));
        }
        if let Some(volume) = p.volume_ml {
            meta.push(format!("{volume} мл"));
        }

        let mut badges = Vec::new();
        if p.is_new {
            badges.push("NEW");
        }
        if p.popular {
            badges.push("HIT");
        }

        Self {
            id: p.id.clone(),
            title: p.title.clone(),
            meta: meta.join(" • "),
            price: format_price(p.price),
            old_price: p.old_price.map(format_price),
            badges,
            img: p.img.clone(),
        }
    }
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id.clone(),
            title: line.title.clone(),
            price: format_price(line.price),
            qty: line.qty,
            img: line.img.clone(),
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let totals = cart.totals();
        Self {
            items: cart.lines().iter().map(CartItemView::from).collect(),
            count: totals.count,
            total: format_price(totals.total),
        }
    }
}
