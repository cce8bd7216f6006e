//! Telegram Bot API client for order notifications.
//!
//! Forwards validated orders to the operator chat as a single
//! `sendMessage` call with an inline call button. One attempt per order;
//! transient failures surface to the caller and are never retried here.

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument};

use kiosk_core::order::{OrderPayload, format_amount, items_summary};

use crate::config::TelegramConfig;

/// Markdown control characters escaped before interpolation.
const MARKDOWN_CONTROL: &[char] = &[
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!', '\\',
];

/// Errors that can occur when calling the Telegram Bot API.
#[derive(Debug, Error)]
pub enum TelegramError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Transport failure status or a logical-failure body.
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: Value },

    /// Failed to parse the response body.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl TelegramError {
    /// Upstream error detail for the relay response body.
    #[must_use]
    pub fn detail(&self) -> Value {
        match self {
            Self::Api { body, .. } => body.clone(),
            Self::Http(e) => Value::String(e.to_string()),
            Self::Parse(msg) => Value::String(msg.clone()),
        }
    }
}

/// Telegram Bot API client.
#[derive(Clone)]
pub struct TelegramClient {
    client: reqwest::Client,
    bot_token: SecretString,
    chat_id: String,
    api_base: String,
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("bot_token", &"[REDACTED]")
            .field("chat_id", &self.chat_id)
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

impl TelegramClient {
    /// Create a client from the relay configuration.
    #[must_use]
    pub fn new(config: &TelegramConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            bot_token: config.bot_token.clone(),
            chat_id: config.admin_chat_id.clone(),
            api_base: config.api_base.clone(),
        }
    }

    /// Forward an order to the operator chat.
    ///
    /// Succeeds only when the transport status is success AND the
    /// response body reports `ok: true`.
    ///
    /// # Errors
    ///
    /// Returns [`TelegramError`] carrying the upstream detail otherwise.
    #[instrument(skip(self, order), fields(items = order.items.len()))]
    pub async fn send_order(&self, order: &OrderPayload) -> Result<(), TelegramError> {
        let url = format!(
            "{}/bot{}/sendMessage",
            self.api_base,
            self.bot_token.expose_secret()
        );

        let body = serde_json::json!({
            "chat_id": self.chat_id,
            "text": build_order_message(order),
            "parse_mode": "Markdown",
            "reply_markup": {
                "inline_keyboard": [
                    [{ "text": "📞 Позвонить", "url": format!("tel:{}", urlencoding::encode(&order.phone)) }]
                ]
            }
        });

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();

        let result: Value = response
            .json()
            .await
            .map_err(|e| TelegramError::Parse(e.to_string()))?;

        let logical_ok = result.get("ok").and_then(Value::as_bool) == Some(true);
        if !status.is_success() || !logical_ok {
            return Err(TelegramError::Api {
                status: status.as_u16(),
                body: result,
            });
        }

        debug!("Order relayed to operator chat");

        Ok(())
    }
}

/// Escape Markdown control characters in a free-text field.
#[must_use]
pub fn escape_markdown(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if MARKDOWN_CONTROL.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Operator-facing order notification text.
///
/// Every free-text field is escaped; the total is numeric and
/// interpolated as-is.
#[must_use]
pub fn build_order_message(order: &OrderPayload) -> String {
    format!(
        "🧾 *Новый заказ*\n\
         *Имя:* {}\n\
         *Телефон:* {}\n\
         *Доставка:* {}\n\
         *Комментарий:* {}\n\
         —\n\
         *Товары:*\n\
         {}\n\
         *Итого:* {} ₴",
        escape_markdown(&order.name),
        escape_markdown(&order.phone),
        escape_markdown(&order.delivery),
        escape_markdown(order.comment.as_deref().unwrap_or("-")),
        escape_markdown(&items_summary(&order.items)),
        format_amount(order.total)
    )
}
