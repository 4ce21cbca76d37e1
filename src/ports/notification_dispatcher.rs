//! Notification dispatcher port (fire-and-forget side effect).
//!
//! Confirmation dispatch after a booking commits. A dispatch failure is
//! logged and swallowed by the caller — it must never roll back the
//! booking.

use async_trait::async_trait;

use crate::domain::booking::Booking;
use crate::domain::foundation::DomainError;

/// Outbound port for booking-confirmation notifications.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Dispatch a confirmation for a freshly committed booking.
    async fn dispatch_booking_confirmation(&self, booking: &Booking) -> Result<(), DomainError>;
}
