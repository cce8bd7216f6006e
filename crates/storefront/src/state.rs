//! Application state shared across handlers.

use std::sync::Arc;

use kiosk_core::Catalog;

use crate::config::StorefrontConfig;
use crate::services::TelegramClient;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The catalog is loaded once at startup
/// and immutable for the lifetime of the process; handlers never share
/// mutable state, so concurrent requests need no coordination.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    telegram: Option<TelegramClient>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The Telegram client exists only when the relay credentials are
    /// configured; the orders endpoint fails closed otherwise.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Self {
        let telegram = config.telegram.as_ref().map(TelegramClient::new);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                telegram,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the session catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get the Telegram relay client, if configured.
    #[must_use]
    pub fn telegram(&self) -> Option<&TelegramClient> {
        self.inner.telegram.as_ref()
    }
}
