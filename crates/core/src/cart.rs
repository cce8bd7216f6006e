//! Cart lines, totals, and the persisted cart store.
//!
//! The cart holds at most one line per product id, every line has
//! quantity >= 1, and totals are recomputed from the lines on every
//! read. [`CartStore`] re-persists the full snapshot after each
//! mutation; the cart is never cleared implicitly, not even after a
//! successful checkout.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::product::Product;
use crate::storage::{KeyValueStorage, StorageError, keys};

/// One product entry with quantity in the cart.
///
/// Title, price, and image are snapshotted from the product at add time
/// and never re-synced with later catalog changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product reference.
    pub id: String,
    /// Title at add time.
    pub title: String,
    /// Price at add time.
    pub price: Decimal,
    /// Image reference at add time.
    #[serde(default)]
    pub img: String,
    /// Quantity, always >= 1.
    pub qty: u32,
}

/// Derived cart aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    /// Total item count, summed by quantity.
    pub count: u32,
    /// Money total, sum of price x quantity over all lines.
    pub total: Decimal,
}

/// Mutable collection of cart lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Current lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add one unit of `product`.
    ///
    /// Increments the existing line for this product id, or appends a
    /// new line with quantity 1, snapshotting title/price/image.
    pub fn add(&mut self, product: &Product) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.id == product.id) {
            line.qty += 1;
        } else {
            self.lines.push(CartLine {
                id: product.id.clone(),
                title: product.title.clone(),
                price: product.price,
                img: product.img.clone(),
                qty: 1,
            });
        }
    }

    /// Adjust the quantity of a line by `delta`, flooring at 1.
    ///
    /// Unknown ids are silent no-ops. Decrementing a quantity-1 line has
    /// no effect; removal is a separate explicit action.
    pub fn change_qty(&mut self, id: &str, delta: i32) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.id == id) {
            let adjusted = i64::from(line.qty) + i64::from(delta);
            line.qty = u32::try_from(adjusted.max(1)).unwrap_or(1);
        }
    }

    /// Remove the line for `id` entirely, regardless of quantity.
    ///
    /// Unknown ids are silent no-ops.
    pub fn remove(&mut self, id: &str) {
        self.lines.retain(|l| l.id != id);
    }

    /// Recompute the aggregates from the current lines.
    #[must_use]
    pub fn totals(&self) -> Totals {
        Totals {
            count: self.lines.iter().map(|l| l.qty).sum(),
            total: self
                .lines
                .iter()
                .map(|l| l.price * Decimal::from(l.qty))
                .sum(),
        }
    }
}

/// Cart backed by durable storage.
///
/// Hydrates from the stored snapshot at construction and re-persists
/// the full snapshot after every mutation.
#[derive(Debug)]
pub struct CartStore<S> {
    cart: Cart,
    storage: S,
}

impl<S: KeyValueStorage> CartStore<S> {
    /// Hydrate a cart from `storage`.
    ///
    /// A missing or unreadable snapshot yields an empty cart; corrupt
    /// stored state never surfaces as an error.
    pub fn hydrate(storage: S) -> Self {
        let cart = storage
            .get(keys::CART)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        Self { cart, storage }
    }

    /// The current cart state.
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Derived aggregates, recomputed on every call.
    pub fn totals(&self) -> Totals {
        self.cart.totals()
    }

    /// Add one unit of `product` and persist.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the snapshot cannot be persisted; the
    /// in-memory mutation is applied regardless.
    pub fn add(&mut self, product: &Product) -> Result<(), StorageError> {
        self.cart.add(product);
        self.persist()
    }

    /// Adjust a line quantity and persist.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the snapshot cannot be persisted.
    pub fn change_qty(&mut self, id: &str, delta: i32) -> Result<(), StorageError> {
        self.cart.change_qty(id, delta);
        self.persist()
    }

    /// Remove a line and persist.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the snapshot cannot be persisted.
    pub fn remove(&mut self, id: &str) -> Result<(), StorageError> {
        self.cart.remove(id);
        self.persist()
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        let snapshot = serde_json::to_string(&self.cart)
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        self.storage.set(keys::CART, &snapshot)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn product(id: &str, price: i64) -> Product {
        Product {
            id: id.to_string(),
            title: format!("Product {id}"),
            brand: String::new(),
            flavor: String::new(),
            category: "pods".to_string(),
            strength: None,
            volume_ml: None,
            price: Decimal::from(price),
            old_price: None,
            is_new: false,
            popular: false,
            img: format!("img/{id}.webp"),
        }
    }

    #[test]
    fn test_add_same_product_twice_merges_into_one_line() {
        let mut cart = Cart::new();
        let p = product("a", 180);
        cart.add(&p);
        cart.add(&p);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines().first().unwrap().qty, 2);
    }

    #[test]
    fn test_add_snapshots_product_fields() {
        let mut cart = Cart::new();
        cart.add(&product("a", 180));
        let line = cart.lines().first().unwrap();
        assert_eq!(line.title, "Product a");
        assert_eq!(line.price, Decimal::from(180));
        assert_eq!(line.img, "img/a.webp");
    }

    #[test]
    fn test_change_qty_floors_at_one() {
        let mut cart = Cart::new();
        cart.add(&product("a", 180));
        cart.change_qty("a", -5);
        assert_eq!(cart.lines().first().unwrap().qty, 1);
    }

    #[test]
    fn test_change_qty_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add(&product("a", 180));
        cart.change_qty("ghost", 3);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines().first().unwrap().qty, 1);
    }

    #[test]
    fn test_remove_deletes_regardless_of_qty() {
        let mut cart = Cart::new();
        cart.add(&product("a", 180));
        cart.change_qty("a", 4);
        cart.remove("a");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add(&product("a", 180));
        cart.remove("ghost");
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_totals_recomputed_from_lines() {
        let mut cart = Cart::new();
        cart.add(&product("a", 180));
        cart.add(&product("a", 180));
        cart.add(&product("b", 250));

        let totals = cart.totals();
        assert_eq!(totals.count, 3);
        assert_eq!(totals.total, Decimal::from(610));

        cart.change_qty("b", 1);
        let totals = cart.totals();
        assert_eq!(totals.count, 4);
        assert_eq!(totals.total, Decimal::from(860));
    }

    #[test]
    fn test_invariants_hold_across_operation_sequences() {
        let mut cart = Cart::new();
        let a = product("a", 100);
        let b = product("b", 200);

        cart.add(&a);
        cart.add(&b);
        cart.add(&a);
        cart.change_qty("a", -10);
        cart.change_qty("b", 5);
        cart.remove("ghost");
        cart.add(&b);

        for line in cart.lines() {
            assert!(line.qty >= 1);
        }
        let mut ids: Vec<&str> = cart.lines().iter().map(|l| l.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), cart.lines().len());
    }

    #[test]
    fn test_store_persists_every_mutation() {
        let mut store = CartStore::hydrate(MemoryStorage::new());
        store.add(&product("a", 180)).unwrap();
        store.change_qty("a", 2).unwrap();

        let snapshot = store.storage.get(keys::CART).unwrap();
        let lines: Vec<CartLine> = serde_json::from_str(&snapshot).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines.first().unwrap().qty, 3);
    }

    #[test]
    fn test_store_roundtrip_yields_identical_lines() {
        let mut store = CartStore::hydrate(MemoryStorage::new());
        store.add(&product("a", 180)).unwrap();
        store.add(&product("b", 250)).unwrap();
        store.change_qty("b", 1).unwrap();
        let before = store.cart().clone();

        let reloaded = CartStore::hydrate(store.storage);
        assert_eq!(reloaded.cart(), &before);
    }

    #[test]
    fn test_hydrate_tolerates_corrupt_snapshot() {
        let mut storage = MemoryStorage::new();
        storage.set(keys::CART, "not json").unwrap();
        let store = CartStore::hydrate(storage);
        assert!(store.cart().is_empty());
    }
}
