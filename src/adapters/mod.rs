//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - database-backed stores and the transactional booking commit
//! - `calendar` - external busy feed client and its Redis cache
//! - `notifications` - signed webhook dispatch for booking confirmations
//! - `memory` - in-memory port implementations for tests and development
//! - `http` - the public booking REST surface

pub mod calendar;
pub mod http;
pub mod memory;
pub mod notifications;
pub mod postgres;
