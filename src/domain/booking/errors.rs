//! Booking-specific error types.
//!
//! The error taxonomy of the public booking surface: eligibility failures,
//! timing-policy violations, commit conflicts, and storage failures.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | OrganizationNotFound | 404 |
//! | ServiceNotFound | 404 |
//! | ServiceInactive | 409 |
//! | IneligibleProvider | 409 |
//! | NoAvailability | 422 |
//! | NoticeViolation | 422 |
//! | AdvanceWindowViolation | 422 |
//! | SlotConflict | 409 |
//! | ValidationFailed | 400 |
//! | Storage | 500 |

use crate::domain::foundation::{
    DomainError, ErrorCode, OrganizationSlug, ProviderId, ServiceId,
};

/// Booking-specific errors.
///
/// Feed degradation is intentionally absent: an unavailable busy feed is a
/// warning flag on the result, never a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// No organization with this slug.
    OrganizationNotFound(String),

    /// No service with this id.
    ServiceNotFound(ServiceId),

    /// Service exists but is disabled.
    ServiceInactive(ServiceId),

    /// Provider is not in the service's eligible set.
    IneligibleProvider {
        provider_id: ProviderId,
        service_id: ServiceId,
    },

    /// The chosen start does not fit any availability window.
    NoAvailability {
        provider_id: ProviderId,
    },

    /// The chosen start is earlier than now + minimum notice.
    NoticeViolation {
        min_notice_minutes: u32,
    },

    /// The chosen start is later than now + maximum advance window.
    AdvanceWindowViolation {
        max_advance_days: u32,
    },

    /// The slot was taken by a concurrent booking or an external busy
    /// interval. The caller should re-list and pick again.
    SlotConflict {
        provider_id: ProviderId,
    },

    /// Request field validation failed.
    ValidationFailed {
        field: String,
        message: String,
    },

    /// Transport or durability failure. No partial state persists.
    Storage(String),
}

impl BookingError {
    // Constructor functions for cleaner error creation

    pub fn organization_not_found(slug: &OrganizationSlug) -> Self {
        BookingError::OrganizationNotFound(slug.as_str().to_string())
    }

    pub fn service_not_found(id: ServiceId) -> Self {
        BookingError::ServiceNotFound(id)
    }

    pub fn service_inactive(id: ServiceId) -> Self {
        BookingError::ServiceInactive(id)
    }

    pub fn ineligible_provider(provider_id: ProviderId, service_id: ServiceId) -> Self {
        BookingError::IneligibleProvider {
            provider_id,
            service_id,
        }
    }

    pub fn no_availability(provider_id: ProviderId) -> Self {
        BookingError::NoAvailability { provider_id }
    }

    pub fn notice_violation(min_notice_minutes: u32) -> Self {
        BookingError::NoticeViolation { min_notice_minutes }
    }

    pub fn advance_window_violation(max_advance_days: u32) -> Self {
        BookingError::AdvanceWindowViolation { max_advance_days }
    }

    pub fn slot_conflict(provider_id: ProviderId) -> Self {
        BookingError::SlotConflict { provider_id }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        BookingError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        BookingError::Storage(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            BookingError::OrganizationNotFound(_) => ErrorCode::OrganizationNotFound,
            BookingError::ServiceNotFound(_) => ErrorCode::ServiceNotFound,
            BookingError::ServiceInactive(_) => ErrorCode::ServiceInactive,
            BookingError::IneligibleProvider { .. } => ErrorCode::IneligibleProvider,
            BookingError::NoAvailability { .. } => ErrorCode::NoAvailability,
            BookingError::NoticeViolation { .. } => ErrorCode::NoticeViolation,
            BookingError::AdvanceWindowViolation { .. } => ErrorCode::AdvanceWindowViolation,
            BookingError::SlotConflict { .. } => ErrorCode::SlotConflict,
            BookingError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            BookingError::Storage(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            BookingError::OrganizationNotFound(slug) => {
                format!("Organization not found: {}", slug)
            }
            BookingError::ServiceNotFound(id) => format!("Service not found: {}", id),
            BookingError::ServiceInactive(id) => {
                format!("Service {} is not currently bookable", id)
            }
            BookingError::IneligibleProvider {
                provider_id,
                service_id,
            } => format!(
                "Provider {} is not assigned to service {}",
                provider_id, service_id
            ),
            BookingError::NoAvailability { provider_id } => {
                format!("Provider {} has no availability at the chosen time", provider_id)
            }
            BookingError::NoticeViolation { min_notice_minutes } => format!(
                "Bookings require at least {} minutes of notice",
                min_notice_minutes
            ),
            BookingError::AdvanceWindowViolation { max_advance_days } => format!(
                "Bookings can be made at most {} days in advance",
                max_advance_days
            ),
            BookingError::SlotConflict { .. } => {
                "The chosen slot is no longer available".to_string()
            }
            BookingError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            BookingError::Storage(msg) => format!("Storage error: {}", msg),
        }
    }

    /// Returns true if retrying the same request may succeed.
    ///
    /// A `SlotConflict` is deliberately not retryable as-is: the caller must
    /// re-list slots and pick a fresh one.
    pub fn is_retryable(&self) -> bool {
        matches!(self, BookingError::Storage(_))
    }
}

impl std::fmt::Display for BookingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for BookingError {}

impl From<DomainError> for BookingError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::SlotConflict => {
                let provider_id = err
                    .details
                    .get("provider_id")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_default();
                BookingError::SlotConflict { provider_id }
            }
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => BookingError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => BookingError::Storage(err.to_string()),
        }
    }
}

impl From<BookingError> for DomainError {
    fn from(err: BookingError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
