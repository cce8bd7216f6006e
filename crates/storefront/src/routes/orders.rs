//! Order relay route handlers.
//!
//! Stateless per request: configuration is re-read from shared state,
//! at most one outbound call is made, and nothing is stored. The
//! submitting cart is never cleared by a successful relay.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use secrecy::ExposeSecret;
use tracing::instrument;

use kiosk_core::order::OrderDraft;

use crate::error::AppError;
use crate::state::AppState;

/// Submit an order for relay to the operator chat.
///
/// POST /api/orders
///
/// Checks run in fixed order: relay configuration, shared secret,
/// payload shape, then a single upstream call. Any failure short-
/// circuits with no relay attempt.
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    payload: Result<Json<OrderDraft>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Json(draft) = payload.map_err(|e| AppError::BadPayload(e.body_text()))?;

    // Fail closed rather than silently dropping orders.
    let Some(telegram) = state.telegram() else {
        return Err(AppError::RelayNotConfigured);
    };

    if let Some(secret) = state.config().webhook_secret.as_ref() {
        if draft.secret() != Some(secret.expose_secret()) {
            return Err(AppError::Unauthorized);
        }
    }

    let order = draft.validate()?;
    telegram.send_order(&order).await?;

    tracing::info!(items = order.items.len(), "Order relayed to operator chat");
    Ok(Json(serde_json::json!({ "ok": true })))
}
