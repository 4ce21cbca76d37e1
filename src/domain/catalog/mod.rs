//! Catalog module - Read models for booking configuration.
//!
//! Services, providers, and organizations are owned and mutated by the
//! wider operations suite; this core reads their current values at
//! computation time.

mod organization;
mod service;

pub use organization::Organization;
pub use service::Service;
