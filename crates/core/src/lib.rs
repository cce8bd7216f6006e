//! Kiosk Core - Catalog, filter pipeline, and cart engine.
//!
//! This crate provides the state and behavioral contracts shared by all
//! Kiosk components:
//! - `storefront` - Public API server and order relay
//!
//! # Architecture
//!
//! The core crate contains only types and state machines - no I/O, no HTTP
//! clients. Durable persistence is abstracted behind [`storage::KeyValueStorage`]
//! so the cart and age gate can be driven by any key-value backend.
//!
//! # Modules
//!
//! - [`product`] - Product records and the session catalog
//! - [`filter`] - Filter state and the pure filter/sort pipeline
//! - [`cart`] - Cart lines, totals, and the persisted cart store
//! - [`order`] - Order payloads, validation, and summary formatting
//! - [`storage`] - Key-value storage abstraction and the age gate

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod filter;
pub mod order;
pub mod product;
pub mod storage;

pub use cart::{Cart, CartLine, CartStore, Totals};
pub use filter::{FilterState, SortKey, visible};
pub use order::{CheckoutForm, OrderDraft, OrderItem, OrderPayload, OrderValidationError};
pub use product::{Catalog, Product};
pub use storage::{AgeGate, KeyValueStorage, MemoryStorage, StorageError};
