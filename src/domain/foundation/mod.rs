//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the ClientFlow booking domain.

mod day_of_week;
mod errors;
mod ids;
mod state_machine;
mod time_of_day;
mod timestamp;

pub use day_of_week::DayOfWeek;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{
    AvailabilityWindowId, BookingId, ContactId, OrganizationId, OrganizationSlug, ProviderId,
    ServiceId,
};
pub use state_machine::StateMachine;
pub use time_of_day::TimeOfDay;
pub use timestamp::Timestamp;
