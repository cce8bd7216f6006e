//! Order payloads, validation, and summary formatting.
//!
//! Two submission channels share the summary format: the server-mediated
//! relay consumes a structured [`OrderPayload`], the client-mediated deep
//! link carries the plain-text message from [`client_message`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::Cart;

/// Free-text checkout form fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckoutForm {
    pub name: String,
    pub phone: String,
    pub delivery: String,
    #[serde(default)]
    pub comment: Option<String>,
}

/// One order line as submitted to the relay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub title: String,
    pub qty: u32,
    pub price: Decimal,
}

/// A validated order ready for relay submission.
#[derive(Debug, Clone, Serialize)]
pub struct OrderPayload {
    pub name: String,
    pub phone: String,
    pub delivery: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub items: Vec<OrderItem>,
    pub total: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

/// Raw inbound order body before validation.
///
/// All fields are optional at the wire level so that shape violations
/// surface as a validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub delivery: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub items: Option<Vec<OrderItem>>,
    #[serde(default)]
    pub total: Option<Decimal>,
    #[serde(default)]
    pub secret: Option<String>,
}

/// Order payload shape violations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderValidationError {
    /// A required field is absent or empty.
    #[error("missing or empty field: {0}")]
    Missing(&'static str),
}

impl OrderDraft {
    /// The shared secret presented by the request, if any.
    #[must_use]
    pub fn secret(&self) -> Option<&str> {
        self.secret.as_deref()
    }

    /// Validate the draft into a relayable payload.
    ///
    /// Name, phone, and delivery must be present and non-empty; items
    /// must be a sequence; total must be a number. The total is not
    /// recomputed against the items.
    ///
    /// # Errors
    ///
    /// Returns [`OrderValidationError`] naming the first violated field.
    pub fn validate(self) -> Result<OrderPayload, OrderValidationError> {
        let name = required(self.name, "name")?;
        let phone = required(self.phone, "phone")?;
        let delivery = required(self.delivery, "delivery")?;
        let items = self.items.ok_or(OrderValidationError::Missing("items"))?;
        let total = self.total.ok_or(OrderValidationError::Missing("total"))?;

        Ok(OrderPayload {
            name,
            phone,
            delivery,
            comment: self.comment,
            items,
            total,
            secret: self.secret,
        })
    }
}

fn required(
    value: Option<String>,
    field: &'static str,
) -> Result<String, OrderValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(OrderValidationError::Missing(field)),
    }
}

impl OrderPayload {
    /// Build a payload from the cart and checkout form.
    ///
    /// Items and total are drawn from the cart at this instant; the cart
    /// itself is left untouched.
    #[must_use]
    pub fn from_cart(cart: &Cart, form: &CheckoutForm, secret: Option<String>) -> Self {
        Self {
            name: form.name.clone(),
            phone: form.phone.clone(),
            delivery: form.delivery.clone(),
            comment: form.comment.clone(),
            items: cart
                .lines()
                .iter()
                .map(|l| OrderItem {
                    title: l.title.clone(),
                    qty: l.qty,
                    price: l.price,
                })
                .collect(),
            total: cart.totals().total,
            secret,
        }
    }
}

/// Format a money amount without trailing zeros.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    amount.normalize().to_string()
}

/// One summary line per item: `{title} × {qty} = {qty*price}₴`.
#[must_use]
pub fn items_summary(items: &[OrderItem]) -> String {
    items
        .iter()
        .map(|i| {
            format!(
                "{} × {} = {}₴",
                i.title,
                i.qty,
                format_amount(i.price * Decimal::from(i.qty))
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Human-readable order message for the client-mediated deep link.
///
/// No structured payload travels this channel; the whole order is a
/// single pre-filled chat message.
#[must_use]
pub fn client_message(cart: &Cart, form: &CheckoutForm) -> String {
    let payload = OrderPayload::from_cart(cart, form, None);
    format!(
        "🧾 Заказ с сайта\n\
         Имя: {}\n\
         Телефон: {}\n\
         Доставка: {}\n\
         Комментарий: {}\n\
         —\n\
         Товары:\n\
         {}\n\
         Итого: {} ₴",
        payload.name,
        payload.phone,
        payload.delivery,
        payload.comment.as_deref().unwrap_or("-"),
        items_summary(&payload.items),
        format_amount(payload.total)
    )
}
