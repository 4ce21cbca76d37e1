//! Booking status state machine.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a booking.
///
/// Only `Pending` and `Confirmed` occupy the provider's time; the other
/// states never block new bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Reserved but awaiting payment capture. Occupies time.
    Pending,

    /// Fully confirmed appointment. Occupies time.
    Confirmed,

    /// Cancelled by either party. Frees the slot.
    Cancelled,

    /// Appointment took place. Only ever set for past bookings, so it never
    /// conflicts with future slots.
    Completed,

    /// Guest did not show up. Frees the slot.
    NoShow,
}

impl BookingStatus {
    /// Returns true if a booking in this status blocks the provider's time.
    pub fn occupies_time(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }
}

impl StateMachine for BookingStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use BookingStatus::*;
        matches!(
            (self, target),
            // From PENDING (payment outcome or guest action)
            (Pending, Confirmed)
                | (Pending, Cancelled)
            // From CONFIRMED (attendance outcome or cancellation)
                | (Confirmed, Cancelled)
                | (Confirmed, Completed)
                | (Confirmed, NoShow)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use BookingStatus::*;
        match self {
            Pending => vec![Confirmed, Cancelled],
            Confirmed => vec![Cancelled, Completed, NoShow],
            Cancelled | Completed | NoShow => vec![],
        }
    }
}
