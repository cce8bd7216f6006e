//! Client-mediated checkout dispatch.
//!
//! Formats the cart into a single pre-filled chat message and hands it
//! to the Telegram app via a deep link. Whether a native app handled
//! the deep link cannot be observed, so after a fixed short delay the
//! web fallback opens unconditionally in a new context; when the deep
//! link attempt itself fails synchronously, the fallback is the only
//! channel. Both channels opening in rare cases is accepted over the
//! risk of neither opening.
//!
//! Navigation is isolated behind [`Navigator`] so tests can observe
//! both calls without real navigation. The server-mediated alternative
//! is [`kiosk_core::order::OrderPayload::from_cart`] posted to the
//! order relay endpoint; the two channels are not composed.

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

use kiosk_core::cart::Cart;
use kiosk_core::order::{CheckoutForm, client_message};

/// Delay between the deep-link attempt and the web fallback.
pub const FALLBACK_DELAY: Duration = Duration::from_millis(300);

/// Web fallback host for the messaging app.
const WEB_HOST: &str = "https://t.me";

/// A navigation attempt failed synchronously.
#[derive(Debug, Error)]
#[error("navigation failed: {0}")]
pub struct NavigationError(pub String);

/// Where a navigation opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationTarget {
    /// Replace the current context (reduces pop-up blocking).
    SameContext,
    /// Open a new context.
    NewContext,
}

/// Navigation seam for the deep-link handoff.
pub trait Navigator {
    /// Attempt to open `url`.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError`] only for synchronous failures; a
    /// returned `Ok` does not prove the target handled the navigation.
    fn open(&mut self, url: &str, target: NavigationTarget) -> Result<(), NavigationError>;
}

/// Which channels were attempted for one checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchReport {
    /// The deep-link navigation was issued without a synchronous error.
    pub deep_link_issued: bool,
    /// The web fallback was opened.
    pub fallback_opened: bool,
}

/// Native deep link with the pre-filled message.
#[must_use]
pub fn deep_link(contact: &str, message: &str) -> String {
    format!(
        "tg://resolve?domain={contact}&text={}",
        urlencoding::encode(message)
    )
}

/// Web fallback URL with the same pre-filled message.
#[must_use]
pub fn web_link(contact: &str, message: &str) -> String {
    format!("{WEB_HOST}/{contact}?text={}", urlencoding::encode(message))
}

/// Hand the order off to the messaging app.
///
/// Reads the cart, never mutates it. The fallback always fires after
/// [`FALLBACK_DELAY`]; when the deep link failed synchronously it is
/// the only channel that does.
pub async fn dispatch<N: Navigator>(
    nav: &mut N,
    contact: &str,
    cart: &Cart,
    form: &CheckoutForm,
) -> DispatchReport {
    let message = client_message(cart, form);
    let contact = contact.replace('@', "");

    let deep_link_issued = match nav.open(&deep_link(&contact, &message), NavigationTarget::SameContext)
    {
        Ok(()) => {
            debug!(contact = %contact, "Deep link navigation issued");
            true
        }
        Err(e) => {
            warn!(contact = %contact, error = %e, "Deep link navigation failed");
            false
        }
    };

    tokio::time::sleep(FALLBACK_DELAY).await;

    let fallback_opened = nav
        .open(&web_link(&contact, &message), NavigationTarget::NewContext)
        .is_ok();

    DispatchReport {
        deep_link_issued,
        fallback_opened,
    }
}
