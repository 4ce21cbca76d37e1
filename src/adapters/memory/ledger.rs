//! In-memory booking ledger.
//!
//! Mirrors the PostgreSQL ledger's commit contract: the overlap re-check
//! and insert happen under one lock, so two concurrent commits for the same
//! slot resolve to exactly one winner.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::booking::Booking;
use crate::domain::foundation::{DomainError, ErrorCode, ProviderId};
use crate::domain::scheduling::Interval;
use crate::ports::BookingLedger;

/// In-memory booking ledger with atomic commits.
#[derive(Clone, Default)]
pub struct InMemoryBookingLedger {
    bookings: Arc<Mutex<Vec<Booking>>>,
}

impl InMemoryBookingLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a pre-existing booking without conflict checking.
    pub async fn insert(&self, booking: Booking) {
        self.bookings.lock().await.push(booking);
    }

    /// All committed bookings, for test assertions.
    pub async fn all(&self) -> Vec<Booking> {
        self.bookings.lock().await.clone()
    }
}

#[async_trait]
impl BookingLedger for InMemoryBookingLedger {
    async fn occupying_intervals(
        &self,
        provider_id: &ProviderId,
        range: &Interval,
    ) -> Result<Vec<Interval>, DomainError> {
        let bookings = self.bookings.lock().await;
        let mut intervals: Vec<Interval> = bookings
            .iter()
            .filter(|b| b.provider_id == *provider_id && b.occupies_time())
            .map(|b| b.interval())
            .filter(|i| i.overlaps(range))
            .collect();
        intervals.sort_by_key(|i| i.start());
        Ok(intervals)
    }

    async fn commit(
        &self,
        booking: &Booking,
        buffer_before_minutes: u32,
        buffer_after_minutes: u32,
    ) -> Result<(), DomainError> {
        // Single lock held across check and insert stands in for the
        // database's per-provider transactional lock.
        let mut bookings = self.bookings.lock().await;

        let candidate = booking.interval();
        let conflict = bookings.iter().any(|existing| {
            existing.provider_id == booking.provider_id
                && existing.occupies_time()
                && existing
                    .interval()
                    .expand(buffer_before_minutes, buffer_after_minutes)
                    .overlaps(&candidate)
        });

        if conflict {
            return Err(DomainError::new(
                ErrorCode::SlotConflict,
                "Requested slot was taken by a concurrent booking",
            )
            .with_detail("provider_id", booking.provider_id.to_string()));
        }

        bookings.push(booking.clone());
        Ok(())
    }
}
