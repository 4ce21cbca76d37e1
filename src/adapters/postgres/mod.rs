//! PostgreSQL adapters - Database implementations for the scheduling ports.
//!
//! - `PostgresAvailabilityStore` - recurring weekly availability windows
//! - `PostgresServiceCatalog` - service configuration and provider eligibility
//! - `PostgresOrganizationDirectory` - slug to organization resolution
//! - `PostgresBookingLedger` - booking reads plus the atomic commit

mod availability_store;
mod booking_ledger;
mod organization_directory;
mod service_catalog;

pub use availability_store::PostgresAvailabilityStore;
pub use booking_ledger::PostgresBookingLedger;
pub use organization_directory::PostgresOrganizationDirectory;
pub use service_catalog::PostgresServiceCatalog;
