//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side errors to
//! Sentry before responding. Validation, method, and auth failures are
//! plain-text 4xx responses; relay failures are JSON `{ok:false, error}`
//! carrying the upstream detail.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use kiosk_core::order::OrderValidationError;

use crate::services::TelegramError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Shared secret missing or mismatched.
    #[error("Unauthorized")]
    Unauthorized,

    /// Malformed or incomplete order payload.
    #[error("Bad order payload: {0}")]
    BadPayload(String),

    /// Relay credentials are not configured in the environment.
    #[error("Telegram relay not configured")]
    RelayNotConfigured,

    /// Upstream notification call failed.
    #[error("Relay error: {0}")]
    Relay(#[from] TelegramError),
}

impl From<OrderValidationError> for AppError {
    fn from(err: OrderValidationError) -> Self {
        Self::BadPayload(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::RelayNotConfigured | Self::Relay(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Order relay error"
            );
        }

        match self {
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized").into_response(),
            Self::BadPayload(msg) => {
                (StatusCode::BAD_REQUEST, format!("Bad order payload: {msg}")).into_response()
            }
            Self::RelayNotConfigured => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Telegram relay not configured",
            )
                .into_response(),
            Self::Relay(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "ok": false, "error": err.detail() })),
            )
                .into_response(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
