//! Booking ledger port (the source of truth for provider busy time).
//!
//! The ledger both answers "when is this provider busy" and owns the one
//! mutating operation of the whole core: the atomic booking commit.
//!
//! # Design
//!
//! - **Strong read-after-write**: once `commit` returns, every subsequent
//!   `occupying_intervals` call observes the new booking.
//! - **Per-provider exclusion**: implementations serialize commits per
//!   provider (a transactional lock, never an in-process mutex), so the
//!   check-then-write race between concurrent bookers cannot double-book.
//! - **All-or-nothing**: a failure during commit leaves no partial booking.

use async_trait::async_trait;

use crate::domain::booking::Booking;
use crate::domain::foundation::{DomainError, ProviderId};
use crate::domain::scheduling::Interval;

/// Durable booking store and commit authority.
#[async_trait]
pub trait BookingLedger: Send + Sync {
    /// Raw busy spans of PENDING/CONFIRMED bookings intersecting `range`.
    ///
    /// Cancelled, completed, and no-show bookings never appear.
    async fn occupying_intervals(
        &self,
        provider_id: &ProviderId,
        range: &Interval,
    ) -> Result<Vec<Interval>, DomainError>;

    /// Atomically re-check and insert a booking.
    ///
    /// Inside one unit of work scoped to the booking's provider, the
    /// implementation verifies that no occupying interval collides with the
    /// booking's span expanded by the given buffers, then inserts it.
    ///
    /// # Errors
    ///
    /// - `SlotConflict` if a concurrent writer took the slot first
    /// - `DatabaseError` on persistence failure (nothing was written)
    async fn commit(
        &self,
        booking: &Booking,
        buffer_before_minutes: u32,
        buffer_after_minutes: u32,
    ) -> Result<(), DomainError>;
}
