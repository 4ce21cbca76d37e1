//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `catalog` - Read models for services, providers, and organizations
//! - `scheduling` - Interval arithmetic, availability windows, slot generation
//! - `booking` - Booking aggregate, status lifecycle, and error taxonomy

pub mod booking;
pub mod catalog;
pub mod foundation;
pub mod scheduling;
