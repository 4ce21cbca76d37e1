//! In-memory adapters - port implementations backed by process memory.
//!
//! Used by integration tests and local development; the in-memory ledger
//! keeps the same atomic commit contract as the PostgreSQL one.

mod availability;
mod catalog;
mod feed;
mod ledger;
mod notifications;

pub use availability::InMemoryAvailabilityStore;
pub use catalog::{InMemoryOrganizationDirectory, InMemoryServiceCatalog};
pub use feed::InMemoryBusyFeed;
pub use ledger::InMemoryBookingLedger;
pub use notifications::RecordingNotificationDispatcher;
