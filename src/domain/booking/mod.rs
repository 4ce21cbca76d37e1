//! Booking domain module.
//!
//! The Booking aggregate, its status state machine, and the error taxonomy
//! of the public booking surface.
//!
//! # Module Structure
//!
//! - `aggregate` - Booking aggregate entity and guest details
//! - `status` - BookingStatus state machine
//! - `errors` - BookingError taxonomy

mod aggregate;
mod errors;
mod status;

pub use aggregate::{Booking, GuestDetails};
pub use errors::BookingError;
pub use status::BookingStatus;
