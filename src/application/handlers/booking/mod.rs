//! Booking handlers.
//!
//! The public booking facade: the only two operations external callers use.
//!
//! ## Queries
//! - Listing bookable slots for a provider/service/date
//!
//! ## Commands
//! - Committing one chosen slot into a booking

mod create_booking;
mod list_slots;

pub use create_booking::{CreateBookingCommand, CreateBookingHandler, CreateBookingResult};
pub use list_slots::{ListSlotsHandler, ListSlotsQuery, ListSlotsResult};
