//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required for order relay
//! - `TELEGRAM_BOT_TOKEN` - Bot credential used to call the Telegram Bot API
//! - `TELEGRAM_ADMIN_CHAT_ID` - Operator chat receiving order notifications
//!
//! The relay pair is checked per request, not at startup: a storefront
//! without it still serves the catalog, and order submissions fail closed
//! with a configuration error.
//!
//! ## Optional
//! - `KIOSK_HOST` - Bind address (default: 127.0.0.1)
//! - `KIOSK_PORT` - Listen port (default: 3000)
//! - `CATALOG_PATH` - Product catalog document (default: data/products.json)
//! - `ORDER_WEBHOOK_SECRET` - Shared secret required on inbound order payloads
//! - `TELEGRAM_CONTACT` - Deep-link contact for client-mediated checkout
//! - `TELEGRAM_API_BASE` - Bot API base URL override (used by tests)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

/// Default deep-link contact when `TELEGRAM_CONTACT` is unset.
pub const DEFAULT_CONTACT: &str = "kiosk_orders";

/// Telegram Bot API production base URL.
pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Path of the product catalog document
    pub catalog_path: PathBuf,
    /// Telegram relay configuration, absent when the env pair is not set
    pub telegram: Option<TelegramConfig>,
    /// Shared secret inbound orders must present, if set
    pub webhook_secret: Option<SecretString>,
    /// Deep-link contact for client-mediated checkout
    pub contact: String,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Telegram Bot API configuration.
///
/// Implements `Debug` manually to redact the bot token.
#[derive(Clone)]
pub struct TelegramConfig {
    /// Bot credential (server-side only)
    pub bot_token: SecretString,
    /// Operator chat identifier receiving order notifications
    pub admin_chat_id: String,
    /// Bot API base URL
    pub api_base: String,
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"[REDACTED]")
            .field("admin_chat_id", &self.admin_chat_id)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("KIOSK_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("KIOSK_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("KIOSK_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("KIOSK_PORT".to_string(), e.to_string()))?;
        let catalog_path = PathBuf::from(get_env_or_default("CATALOG_PATH", "data/products.json"));

        let telegram = TelegramConfig::from_env();
        if telegram.is_none() {
            tracing::warn!("Telegram relay not configured; order submissions will fail closed");
        }

        let webhook_secret = get_optional_env("ORDER_WEBHOOK_SECRET").map(SecretString::from);
        let contact = get_env_or_default("TELEGRAM_CONTACT", DEFAULT_CONTACT);
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            host,
            port,
            catalog_path,
            telegram,
            webhook_secret,
            contact,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl TelegramConfig {
    /// Read the relay pair from the environment.
    ///
    /// Both `TELEGRAM_BOT_TOKEN` and `TELEGRAM_ADMIN_CHAT_ID` must be
    /// present; otherwise the relay is treated as unconfigured.
    fn from_env() -> Option<Self> {
        let bot_token = get_optional_env("TELEGRAM_BOT_TOKEN")?;
        let admin_chat_id = get_optional_env("TELEGRAM_ADMIN_CHAT_ID")?;
        Some(Self {
            bot_token: SecretString::from(bot_token),
            admin_chat_id,
            api_base: get_env_or_default("TELEGRAM_API_BASE", DEFAULT_API_BASE),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
