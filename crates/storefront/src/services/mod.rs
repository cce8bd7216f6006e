//! External service clients.

pub mod telegram;

pub use telegram::{TelegramClient, TelegramError};
