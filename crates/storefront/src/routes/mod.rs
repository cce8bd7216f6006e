//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health        - Liveness check
//!
//! # Catalog
//! GET  /api/products  - Filtered/sorted product views (category, brand,
//!                       strength, q, sort query parameters)
//! GET  /api/brands    - Distinct brand list for filter hydration
//!
//! # Orders
//! POST /api/orders    - Order relay endpoint (any other method: 405)
//! ```

pub mod catalog;
pub mod orders;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(catalog::products))
        .route("/brands", get(catalog::brands))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api", catalog_routes())
        .route("/api/orders", post(orders::submit))
}
