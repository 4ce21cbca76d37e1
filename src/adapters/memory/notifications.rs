//! Recording notification dispatcher for tests.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::domain::booking::Booking;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::NotificationDispatcher;

/// Notification dispatcher that records what it was asked to send.
#[derive(Clone, Default)]
pub struct RecordingNotificationDispatcher {
    dispatched: Arc<Mutex<Vec<Booking>>>,
    failing: Arc<RwLock<bool>>,
}

impl RecordingNotificationDispatcher {
    /// Create a dispatcher that succeeds and records every dispatch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every dispatch fail (or recover) from now on.
    pub async fn set_failing(&self, failing: bool) {
        *self.failing.write().await = failing;
    }

    /// Bookings dispatched so far, for assertions.
    pub async fn dispatched(&self) -> Vec<Booking> {
        self.dispatched.lock().await.clone()
    }
}

#[async_trait]
impl NotificationDispatcher for RecordingNotificationDispatcher {
    async fn dispatch_booking_confirmation(&self, booking: &Booking) -> Result<(), DomainError> {
        if *self.failing.read().await {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                "Notification endpoint is unavailable",
            ));
        }
        self.dispatched.lock().await.push(booking.clone());
        Ok(())
    }
}
