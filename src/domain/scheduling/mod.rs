//! Scheduling module - Interval arithmetic and slot computation.
//!
//! Pure domain logic for appointment scheduling: half-open instant
//! intervals, weekly availability windows, and the stateless slot
//! generator. All I/O lives behind the ports; nothing here suspends.

mod availability_window;
mod interval;
mod slot_generator;

pub use availability_window::{occupancy_fetch_range, AvailabilityWindow};
pub use interval::Interval;
pub use slot_generator::{CandidateRejection, SlotGenerator, SlotParameters};
