//! Catalog route handlers.

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use kiosk_core::filter::{FilterState, SortKey, visible};

use crate::state::AppState;
use crate::views::ProductView;

/// Filter query parameters.
///
/// Absent parameters mean unconstrained; an unknown sort value falls
/// back to popularity ordering.
#[derive(Debug, Deserialize)]
pub struct FilterQuery {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub strength: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
}

impl From<FilterQuery> for FilterState {
    fn from(query: FilterQuery) -> Self {
        Self {
            category: query.category.unwrap_or_else(|| "all".to_string()),
            brand: query.brand.unwrap_or_default(),
            strength: query.strength.unwrap_or_default(),
            q: query.q.unwrap_or_default(),
            sort: SortKey::parse(query.sort.as_deref().unwrap_or_default()),
        }
    }
}

/// Filtered and sorted product views.
#[instrument(skip(state))]
pub async fn products(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> impl IntoResponse {
    let filters = FilterState::from(query);
    let views: Vec<ProductView> = visible(state.catalog(), &filters)
        .iter()
        .map(ProductView::from)
        .collect();
    Json(views)
}

/// Distinct brand list for filter hydration.
#[instrument(skip(state))]
pub async fn brands(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.catalog().brands())
}
