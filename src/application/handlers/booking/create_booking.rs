//! CreateBookingHandler - Command handler for committing a chosen slot.

use std::sync::Arc;
use std::time::Duration;

use chrono::Datelike;

use crate::domain::booking::{Booking, BookingError, GuestDetails};
use crate::domain::catalog::Organization;
use crate::domain::foundation::{
    BookingId, ContactId, DayOfWeek, DomainError, ErrorCode, OrganizationSlug, ProviderId,
    ServiceId, Timestamp,
};
use crate::domain::scheduling::{
    occupancy_fetch_range, CandidateRejection, Interval, SlotGenerator,
};
use crate::ports::{
    AvailabilityStore, BookingLedger, BusyFeed, NotificationDispatcher, OrganizationDirectory,
    ServiceCatalog,
};

/// Command to commit one chosen (provider, service, start) candidate.
#[derive(Debug, Clone)]
pub struct CreateBookingCommand {
    pub organization_slug: OrganizationSlug,
    pub service_id: ServiceId,
    pub provider_id: ProviderId,
    /// Chosen start instant (UTC), normally taken from a prior listing.
    pub start: Timestamp,
    /// Guest's browser timezone; validated here, used only for rendering.
    pub guest_timezone: String,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: Option<String>,
    pub notes: Option<String>,
    /// CRM contact matched upstream, if any.
    pub contact_id: Option<ContactId>,
}

/// Result of a successful booking commit.
#[derive(Debug, Clone)]
pub struct CreateBookingResult {
    pub booking: Booking,

    /// True when the external busy feed was unavailable and the conflict
    /// check ran against ledger truth only.
    pub feed_degraded: bool,
}

/// Handler for committing bookings.
///
/// Validation errors (eligibility, guest fields, timing policy) are
/// resolved before the ledger transaction begins. Conflict and storage
/// errors can only arise inside the ledger's atomic commit, which either
/// persists the booking fully or not at all.
pub struct CreateBookingHandler {
    organization_directory: Arc<dyn OrganizationDirectory>,
    service_catalog: Arc<dyn ServiceCatalog>,
    availability_store: Arc<dyn AvailabilityStore>,
    booking_ledger: Arc<dyn BookingLedger>,
    busy_feed: Arc<dyn BusyFeed>,
    notification_dispatcher: Arc<dyn NotificationDispatcher>,
    feed_timeout: Duration,
}

impl CreateBookingHandler {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        organization_directory: Arc<dyn OrganizationDirectory>,
        service_catalog: Arc<dyn ServiceCatalog>,
        availability_store: Arc<dyn AvailabilityStore>,
        booking_ledger: Arc<dyn BookingLedger>,
        busy_feed: Arc<dyn BusyFeed>,
        notification_dispatcher: Arc<dyn NotificationDispatcher>,
        feed_timeout: Duration,
    ) -> Self {
        Self {
            organization_directory,
            service_catalog,
            availability_store,
            booking_ledger,
            busy_feed,
            notification_dispatcher,
            feed_timeout,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateBookingCommand,
    ) -> Result<CreateBookingResult, BookingError> {
        // 1. Validate the guest form fields at the boundary
        let guest = GuestDetails::try_new(
            cmd.guest_name,
            cmd.guest_email,
            cmd.guest_phone,
            cmd.notes,
        )
        .map_err(DomainError::from)?;
        Organization::parse_timezone(&cmd.guest_timezone).map_err(DomainError::from)?;

        // 2. Resolve the tenant and its scheduling timezone
        let organization = self
            .organization_directory
            .find_by_slug(&cmd.organization_slug)
            .await?
            .ok_or_else(|| BookingError::organization_not_found(&cmd.organization_slug))?;

        // 3. Fetch the service and check it is bookable
        let service = self
            .service_catalog
            .get(&cmd.service_id)
            .await?
            .ok_or(BookingError::ServiceNotFound(cmd.service_id))?;
        if !service.is_active {
            return Err(BookingError::service_inactive(service.id));
        }

        // 4. Check the provider is eligible for this service
        let eligible = self.service_catalog.providers_for(&service.id).await?;
        if !eligible.contains(&cmd.provider_id) {
            return Err(BookingError::ineligible_provider(
                cmd.provider_id,
                service.id,
            ));
        }

        // 5. Materialize the weekday's windows for the candidate's local date
        let local_date = cmd
            .start
            .as_datetime()
            .with_timezone(&organization.timezone)
            .date_naive();
        let weekday = DayOfWeek::from(local_date.weekday());
        let windows: Vec<Interval> = self
            .availability_store
            .windows_for(&cmd.provider_id, weekday)
            .await?
            .iter()
            .filter_map(|w| w.materialize(local_date, organization.timezone))
            .collect();
        if windows.is_empty() {
            return Err(BookingError::no_availability(cmd.provider_id));
        }

        // 6. Gather current occupying truth (feed failures degrade)
        let range = occupancy_fetch_range(local_date, organization.timezone);
        let (ledger_busy, feed) = futures::join!(
            self.booking_ledger
                .occupying_intervals(&cmd.provider_id, &range),
            tokio::time::timeout(
                self.feed_timeout,
                self.busy_feed.busy_intervals_for(&cmd.provider_id, &range),
            ),
        );
        let mut occupying = ledger_busy?;
        let feed_degraded = match feed {
            Ok(Ok(intervals)) => {
                occupying.extend(intervals);
                false
            }
            Ok(Err(err)) => {
                tracing::warn!(provider_id = %cmd.provider_id, error = %err, "busy feed unavailable, committing against ledger only");
                true
            }
            Err(_) => {
                tracing::warn!(provider_id = %cmd.provider_id, "busy feed timed out, committing against ledger only");
                true
            }
        };

        // 7. Re-validate the single candidate against current truth
        let params = service.slot_parameters();
        SlotGenerator::check_candidate(cmd.start, &windows, &occupying, &params, Timestamp::now())
            .map_err(|rejection| match rejection {
                CandidateRejection::OutsideAvailability => {
                    BookingError::no_availability(cmd.provider_id)
                }
                CandidateRejection::Occupied => BookingError::slot_conflict(cmd.provider_id),
                CandidateRejection::NoticeViolation => {
                    BookingError::notice_violation(service.min_notice_minutes)
                }
                CandidateRejection::AdvanceWindowViolation => {
                    BookingError::advance_window_violation(
                        service.max_advance_days.unwrap_or_default(),
                    )
                }
            })?;

        // 8. Build the aggregate; paid services hold the slot as Pending
        let booking = Booking::create(
            BookingId::new(),
            organization.id,
            service.id,
            cmd.provider_id,
            cmd.contact_id,
            cmd.start,
            service.duration_minutes,
            service.initial_booking_status(),
            guest,
        );

        // 9. Atomic check-and-insert; a concurrent winner surfaces as a
        //    conflict, never a double booking
        self.booking_ledger
            .commit(
                &booking,
                service.buffer_before_minutes,
                service.buffer_after_minutes,
            )
            .await
            .map_err(|err| match err.code {
                ErrorCode::SlotConflict => BookingError::slot_conflict(cmd.provider_id),
                _ => BookingError::storage(err.to_string()),
            })?;

        tracing::info!(
            booking_id = %booking.id,
            provider_id = %booking.provider_id,
            service_id = %booking.service_id,
            "booking committed"
        );

        // 10. Fire-and-forget confirmation; dispatch failure never rolls
        //     back the booking
        if let Err(err) = self
            .notification_dispatcher
            .dispatch_booking_confirmation(&booking)
            .await
        {
            tracing::warn!(booking_id = %booking.id, error = %err, "confirmation dispatch failed");
        }

        Ok(CreateBookingResult {
            booking,
            feed_degraded,
        })
    }
}
