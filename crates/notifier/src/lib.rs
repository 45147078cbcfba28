//! Notification delivery to the single configured chat.
//!
//! The poll loop only sees the [`Notifier`] trait; [`TelegramNotifier`] is the
//! production implementation backed by the Telegram Bot API.

use async_trait::async_trait;

use review_common::error::NotifyError;

pub mod telegram;

pub use telegram::TelegramNotifier;

/// Delivers plain-text notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send one message. Exactly one outbound delivery attempt per call.
    async fn send(&self, text: &str) -> Result<(), NotifyError>;
}
