//! Notification adapters - outbound booking confirmations.

mod webhook_dispatcher;

pub use webhook_dispatcher::{WebhookConfig, WebhookNotificationDispatcher};
