//! External busy feed port.
//!
//! Third-party calendar busy intervals for a provider, treated exactly like
//! confirmed bookings for conflict purposes but never bookable or
//! cancelable here.
//!
//! # Degraded Mode
//!
//! The feed is allowed to fail. Callers wrap fetches in a bounded timeout
//! and, on error or timeout, proceed with ledger-only truth while flagging
//! the result as degraded — they never silently drop a feed that previously
//! reported busy time.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ProviderId};
use crate::domain::scheduling::Interval;

/// Read port for externally sourced busy intervals.
#[async_trait]
pub trait BusyFeed: Send + Sync {
    /// Busy spans for a provider intersecting `range`.
    ///
    /// # Errors
    ///
    /// - `FeedUnavailable` when the upstream feed cannot be reached
    async fn busy_intervals_for(
        &self,
        provider_id: &ProviderId,
        range: &Interval,
    ) -> Result<Vec<Interval>, DomainError>;

    /// The maximum age of the data this feed may return.
    ///
    /// Zero for a live feed; the cache TTL for a caching decorator.
    fn staleness_bound(&self) -> Duration;
}
