//! HTTP DTOs (Data Transfer Objects) for the public booking endpoints.
//!
//! These types define the JSON request/response structure for the booking
//! API. They serve as the boundary between HTTP and the application layer.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::booking::{Booking, BookingStatus};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Query string for the slot listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SlotsQuery {
    /// Calendar date in the organization's timezone (YYYY-MM-DD).
    pub date: NaiveDate,
}

/// Request to book a chosen slot.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBookingRequest {
    /// Service being booked.
    pub service_id: String,
    /// Provider to book with.
    pub provider_id: String,
    /// Chosen start instant (RFC 3339), taken from a prior slot listing.
    pub start: DateTime<Utc>,
    /// Guest's browser timezone (IANA name).
    pub guest_timezone: String,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: Option<String>,
    pub notes: Option<String>,
    /// CRM contact matched upstream, if any.
    pub contact_id: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for the slot listing endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SlotsResponse {
    /// Ascending bookable start instants (RFC 3339, UTC).
    pub slots: Vec<String>,
    /// True when the external busy feed was unavailable and the listing
    /// reflects internal bookings only.
    pub feed_degraded: bool,
}

/// Response for a committed booking.
#[derive(Debug, Clone, Serialize)]
pub struct BookingResponse {
    pub booking_id: String,
    pub service_id: String,
    pub provider_id: String,
    pub status: BookingStatus,
    /// Appointment start (RFC 3339, UTC).
    pub start_time: String,
    /// Appointment end (RFC 3339, UTC).
    pub end_time: String,
    pub guest_name: String,
    pub guest_email: String,
    /// True when the conflict check ran without the external busy feed.
    pub feed_degraded: bool,
}

impl BookingResponse {
    pub fn from_booking(booking: &Booking, feed_degraded: bool) -> Self {
        Self {
            booking_id: booking.id.to_string(),
            service_id: booking.service_id.to_string(),
            provider_id: booking.provider_id.to_string(),
            status: booking.status,
            start_time: booking.start_time.to_string(),
            end_time: booking.end_time.to_string(),
            guest_name: booking.guest_name.clone(),
            guest_email: booking.guest_email.clone(),
            feed_degraded,
        }
    }
}

/// Error response for API errors.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code (SCREAMING_SNAKE).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional error details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}
