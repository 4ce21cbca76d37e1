//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Read Ports
//!
//! - `AvailabilityStore` - Weekly open hours per provider
//! - `ServiceCatalog` - Service definitions and provider eligibility
//! - `OrganizationDirectory` - Tenant resolution by public slug
//! - `BusyFeed` - External calendar busy intervals (may degrade)
//!
//! ## Write Ports
//!
//! - `BookingLedger` - Busy-time truth plus the atomic booking commit
//! - `NotificationDispatcher` - Fire-and-forget confirmation dispatch

mod availability_store;
mod booking_ledger;
mod busy_feed;
mod notification_dispatcher;
mod organization_directory;
mod service_catalog;

pub use availability_store::AvailabilityStore;
pub use booking_ledger::BookingLedger;
pub use busy_feed::BusyFeed;
pub use notification_dispatcher::NotificationDispatcher;
pub use organization_directory::OrganizationDirectory;
pub use service_catalog::ServiceCatalog;
