//! Service read model.

use serde::{Deserialize, Serialize};

use crate::domain::booking::BookingStatus;
use crate::domain::foundation::{OrganizationId, ServiceId, ValidationError};
use crate::domain::scheduling::SlotParameters;

/// A bookable service as configured by catalog management.
///
/// This core only reads services; all mutation happens in the catalog
/// screens outside it. Values are fetched fresh at computation time —
/// nothing here is cached across requests.
///
/// # Invariants
///
/// - `duration_minutes > 0`
/// - buffers and minimum notice are non-negative (enforced by type)
/// - `price_cents >= 0`, stored as i64 cents, never floats
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Unique identifier for this service.
    pub id: ServiceId,

    /// Organization the service belongs to.
    pub organization_id: OrganizationId,

    /// Display name shown on the booking page.
    pub name: String,

    /// Appointment length in minutes.
    pub duration_minutes: u32,

    /// Price in cents; zero means free.
    pub price_cents: i64,

    /// Dead time required before each appointment, in minutes.
    pub buffer_before_minutes: u32,

    /// Dead time required after each appointment, in minutes.
    pub buffer_after_minutes: u32,

    /// Shortest allowed lead time for a booking, in minutes.
    pub min_notice_minutes: u32,

    /// Furthest allowed lead time in days; `None` means unbounded.
    pub max_advance_days: Option<u32>,

    /// Whether the service is currently bookable.
    pub is_active: bool,
}

impl Service {
    /// Creates a service, validating the numeric invariants.
    #[allow(clippy::too_many_arguments)]
    pub fn try_new(
        id: ServiceId,
        organization_id: OrganizationId,
        name: impl Into<String>,
        duration_minutes: u32,
        price_cents: i64,
        buffer_before_minutes: u32,
        buffer_after_minutes: u32,
        min_notice_minutes: u32,
        max_advance_days: Option<u32>,
        is_active: bool,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if duration_minutes == 0 {
            return Err(ValidationError::out_of_range(
                "duration_minutes",
                1,
                i32::MAX,
                0,
            ));
        }
        if price_cents < 0 {
            return Err(ValidationError::invalid_format(
                "price_cents",
                "price cannot be negative",
            ));
        }
        if max_advance_days == Some(0) {
            return Err(ValidationError::invalid_format(
                "max_advance_days",
                "advance window must be at least one day when set",
            ));
        }
        Ok(Self {
            id,
            organization_id,
            name,
            duration_minutes,
            price_cents,
            buffer_before_minutes,
            buffer_after_minutes,
            min_notice_minutes,
            max_advance_days,
            is_active,
        })
    }

    /// The scheduling parameters the slot generator needs.
    pub fn slot_parameters(&self) -> SlotParameters {
        SlotParameters {
            duration_minutes: self.duration_minutes,
            buffer_before_minutes: self.buffer_before_minutes,
            buffer_after_minutes: self.buffer_after_minutes,
            min_notice_minutes: self.min_notice_minutes,
            max_advance_days: self.max_advance_days,
        }
    }

    /// Whether booking this service involves downstream payment capture.
    pub fn requires_payment(&self) -> bool {
        self.price_cents > 0
    }

    /// Status a freshly committed booking starts in.
    ///
    /// Paid services hold the slot as `Pending` until payment is captured;
    /// free services confirm immediately.
    pub fn initial_booking_status(&self) -> BookingStatus {
        if self.requires_payment() {
            BookingStatus::Pending
        } else {
            BookingStatus::Confirmed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(price_cents: i64) -> Service {
        Service::try_new(
            ServiceId::new(),
            OrganizationId::new(),
            "Consultation",
            60,
            price_cents,
            0,
            15,
            120,
            Some(30),
            true,
        )
        .unwrap()
    }

    #[test]
    fn try_new_rejects_zero_duration() {
        let result = Service::try_new(
            ServiceId::new(),
            OrganizationId::new(),
            "Consultation",
            0,
            0,
            0,
            0,
            0,
            None,
            true,
        );
        assert!(result.is_err());
    }

    #[test]
    fn try_new_rejects_blank_name_and_negative_price() {
        assert!(Service::try_new(
            ServiceId::new(),
            OrganizationId::new(),
            "   ",
            60,
            0,
            0,
            0,
            0,
            None,
            true,
        )
        .is_err());
        assert!(Service::try_new(
            ServiceId::new(),
            OrganizationId::new(),
            "Consultation",
            60,
            -100,
            0,
            0,
            0,
            None,
            true,
        )
        .is_err());
    }

    #[test]
    fn try_new_rejects_zero_day_advance_window() {
        let result = Service::try_new(
            ServiceId::new(),
            OrganizationId::new(),
            "Consultation",
            60,
            0,
            0,
            0,
            0,
            Some(0),
            true,
        );
        assert!(result.is_err());
    }

    #[test]
    fn slot_parameters_mirror_service_fields() {
        let s = service(0);
        let p = s.slot_parameters();
        assert_eq!(p.duration_minutes, 60);
        assert_eq!(p.buffer_after_minutes, 15);
        assert_eq!(p.min_notice_minutes, 120);
        assert_eq!(p.max_advance_days, Some(30));
    }

    #[test]
    fn paid_services_start_pending_free_services_confirm() {
        assert_eq!(
            service(5000).initial_booking_status(),
            BookingStatus::Pending
        );
        assert_eq!(
            service(0).initial_booking_status(),
            BookingStatus::Confirmed
        );
    }
}
