//! ListSlotsHandler - Query handler for bookable start times.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;

use crate::domain::booking::BookingError;
use crate::domain::foundation::{
    DayOfWeek, DomainError, OrganizationSlug, ProviderId, ServiceId, Timestamp,
};
use crate::domain::scheduling::{occupancy_fetch_range, Interval, SlotGenerator};
use crate::ports::{
    AvailabilityStore, BookingLedger, BusyFeed, OrganizationDirectory, ServiceCatalog,
};

/// Query for the bookable start times of one provider/service/date.
#[derive(Debug, Clone)]
pub struct ListSlotsQuery {
    pub organization_slug: OrganizationSlug,
    pub service_id: ServiceId,
    pub provider_id: ProviderId,
    pub date: NaiveDate,
}

/// Result of a successful slot listing.
#[derive(Debug, Clone)]
pub struct ListSlotsResult {
    /// Ascending start instants (UTC).
    pub slots: Vec<Timestamp>,

    /// True when the external busy feed was unavailable and the listing was
    /// computed from ledger truth only.
    pub feed_degraded: bool,
}

/// Handler for listing bookable slots.
///
/// Pure read path: performs no writes and may run with unlimited
/// concurrency. Two calls with no intervening writes return identical
/// results.
pub struct ListSlotsHandler {
    organization_directory: Arc<dyn OrganizationDirectory>,
    service_catalog: Arc<dyn ServiceCatalog>,
    availability_store: Arc<dyn AvailabilityStore>,
    booking_ledger: Arc<dyn BookingLedger>,
    busy_feed: Arc<dyn BusyFeed>,
    feed_timeout: Duration,
}

impl ListSlotsHandler {
    pub fn new(
        organization_directory: Arc<dyn OrganizationDirectory>,
        service_catalog: Arc<dyn ServiceCatalog>,
        availability_store: Arc<dyn AvailabilityStore>,
        booking_ledger: Arc<dyn BookingLedger>,
        busy_feed: Arc<dyn BusyFeed>,
        feed_timeout: Duration,
    ) -> Self {
        Self {
            organization_directory,
            service_catalog,
            availability_store,
            booking_ledger,
            busy_feed,
            feed_timeout,
        }
    }

    pub async fn handle(&self, query: ListSlotsQuery) -> Result<ListSlotsResult, BookingError> {
        // 1. Resolve the tenant and its scheduling timezone
        let organization = self
            .organization_directory
            .find_by_slug(&query.organization_slug)
            .await?
            .ok_or_else(|| BookingError::organization_not_found(&query.organization_slug))?;

        // 2. Fetch the service and check it is bookable
        let service = self
            .service_catalog
            .get(&query.service_id)
            .await?
            .ok_or(BookingError::ServiceNotFound(query.service_id))?;
        if !service.is_active {
            return Err(BookingError::service_inactive(service.id));
        }

        // 3. Check the provider is eligible for this service
        let eligible = self.service_catalog.providers_for(&service.id).await?;
        if !eligible.contains(&query.provider_id) {
            return Err(BookingError::ineligible_provider(
                query.provider_id,
                service.id,
            ));
        }

        // 4. Fetch the weekday's availability windows; an empty weekday is
        //    simply unbookable
        let weekday = DayOfWeek::from(query.date.weekday());
        let windows = self
            .availability_store
            .windows_for(&query.provider_id, weekday)
            .await?;
        if windows.is_empty() {
            return Ok(ListSlotsResult {
                slots: Vec::new(),
                feed_degraded: false,
            });
        }

        // 5. Materialize the windows onto the date in the organization
        //    timezone (DST gaps may collapse some)
        let materialized: Vec<Interval> = windows
            .iter()
            .filter_map(|w| w.materialize(query.date, organization.timezone))
            .collect();
        if materialized.is_empty() {
            return Ok(ListSlotsResult {
                slots: Vec::new(),
                feed_degraded: false,
            });
        }

        // 6. Fetch occupying intervals from ledger and feed concurrently
        let (occupying, feed_degraded) = self
            .fetch_occupying(&query.provider_id, query.date, organization.timezone)
            .await?;

        // 7. Enumerate the surviving candidates
        let slots = SlotGenerator::generate(
            &materialized,
            &occupying,
            &service.slot_parameters(),
            Timestamp::now(),
        );

        Ok(ListSlotsResult {
            slots,
            feed_degraded,
        })
    }

    /// Unions ledger bookings and external busy intervals for the
    /// surrounding days.
    ///
    /// Ledger failures are fatal; feed failures (including timeout) degrade
    /// to ledger-only truth.
    async fn fetch_occupying(
        &self,
        provider_id: &ProviderId,
        date: NaiveDate,
        timezone: Tz,
    ) -> Result<(Vec<Interval>, bool), DomainError> {
        let range = occupancy_fetch_range(date, timezone);

        let (ledger, feed) = futures::join!(
            self.booking_ledger.occupying_intervals(provider_id, &range),
            tokio::time::timeout(
                self.feed_timeout,
                self.busy_feed.busy_intervals_for(provider_id, &range),
            ),
        );

        let mut occupying = ledger?;
        let feed_degraded = match feed {
            Ok(Ok(intervals)) => {
                occupying.extend(intervals);
                false
            }
            Ok(Err(err)) => {
                tracing::warn!(provider_id = %provider_id, error = %err, "busy feed unavailable, using ledger only");
                true
            }
            Err(_) => {
                tracing::warn!(provider_id = %provider_id, timeout_ms = self.feed_timeout.as_millis() as u64, "busy feed timed out, using ledger only");
                true
            }
        };

        Ok((occupying, feed_degraded))
    }
}
