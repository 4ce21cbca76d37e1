//! Booking aggregate entity.
//!
//! A Booking is the durable record of a reserved appointment: one provider,
//! one service, one guest, one time range. It is only ever created through
//! the booking transaction; status transitions afterwards come from
//! confirmation, cancellation, and attendance flows.
//!
//! # Design Decisions
//!
//! - **Denormalized end**: `end_time = start_time + service duration` is
//!   fixed at creation so ledger range queries never join the service table.
//! - **Guest or contact**: a booking always carries guest details; a CRM
//!   contact id is attached when the guest matched an existing contact.
//! - **Raw span only**: buffers are a property of the service at scheduling
//!   time, not of the stored booking.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    BookingId, ContactId, OrganizationId, ProviderId, ServiceId, StateMachine, Timestamp,
    ValidationError,
};
use crate::domain::scheduling::Interval;

use super::BookingStatus;

/// Booking aggregate - a reserved appointment slot.
///
/// # Invariants
///
/// - `start_time < end_time`
/// - `guest_name` and `guest_email` are non-empty; the email carries an `@`
/// - Status transitions follow [`BookingStatus`] state machine rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Unique identifier for this booking.
    pub id: BookingId,

    /// Organization the booking belongs to.
    pub organization_id: OrganizationId,

    /// Service being booked.
    pub service_id: ServiceId,

    /// Provider delivering the service.
    pub provider_id: ProviderId,

    /// CRM contact matched to the guest, if any.
    pub contact_id: Option<ContactId>,

    /// Current lifecycle status.
    pub status: BookingStatus,

    /// Appointment start (UTC).
    pub start_time: Timestamp,

    /// Appointment end (UTC), fixed at `start + duration` on creation.
    pub end_time: Timestamp,

    /// Name supplied by the booking guest.
    pub guest_name: String,

    /// Email supplied by the booking guest.
    pub guest_email: String,

    /// Phone supplied by the booking guest, if any.
    pub guest_phone: Option<String>,

    /// Notes the guest attached to the booking.
    pub notes: Option<String>,

    /// Staff-only notes, never shown to the guest.
    pub internal_notes: Option<String>,

    /// When the booking was created.
    pub created_at: Timestamp,
}

/// Guest details captured on the public booking form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestDetails {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

impl GuestDetails {
    /// Validates the form fields, trimming surrounding whitespace.
    pub fn try_new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: Option<String>,
        notes: Option<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::empty_field("guest_name"));
        }

        let email = email.into().trim().to_string();
        if email.is_empty() {
            return Err(ValidationError::empty_field("guest_email"));
        }
        // Deliverability is the notification service's problem; the domain
        // only rejects obviously malformed addresses.
        if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
            return Err(ValidationError::invalid_format(
                "guest_email",
                "expected an address of the form local@domain",
            ));
        }

        Ok(Self {
            name,
            email,
            phone: phone.filter(|p| !p.trim().is_empty()),
            notes: notes.filter(|n| !n.trim().is_empty()),
        })
    }
}

impl Booking {
    /// Creates a new booking for a validated candidate slot.
    ///
    /// `duration_minutes` is the service duration current at commit time;
    /// the end is denormalized from it and never recomputed.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        id: BookingId,
        organization_id: OrganizationId,
        service_id: ServiceId,
        provider_id: ProviderId,
        contact_id: Option<ContactId>,
        start_time: Timestamp,
        duration_minutes: u32,
        status: BookingStatus,
        guest: GuestDetails,
    ) -> Self {
        Self {
            id,
            organization_id,
            service_id,
            provider_id,
            contact_id,
            status,
            start_time,
            end_time: start_time.plus_minutes(duration_minutes as i64),
            guest_name: guest.name,
            guest_email: guest.email,
            guest_phone: guest.phone,
            notes: guest.notes,
            internal_notes: None,
            created_at: Timestamp::now(),
        }
    }

    /// The raw occupied span `[start, end)`.
    pub fn interval(&self) -> Interval {
        Interval::new(self.start_time, self.end_time)
            .expect("booking construction guarantees start < end")
    }

    /// Returns true if this booking currently blocks the provider's time.
    pub fn occupies_time(&self) -> bool {
        self.status.occupies_time()
    }

    /// Confirms a pending booking (payment captured downstream).
    pub fn confirm(&mut self) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(BookingStatus::Confirmed)?;
        Ok(())
    }

    /// Cancels the booking, freeing its slot.
    pub fn cancel(&mut self) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(BookingStatus::Cancelled)?;
        Ok(())
    }

    /// Marks a confirmed booking as having taken place.
    pub fn complete(&mut self) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(BookingStatus::Completed)?;
        Ok(())
    }

    /// Marks a confirmed booking as a no-show, freeing its slot.
    pub fn mark_no_show(&mut self) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(BookingStatus::NoShow)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guest() -> GuestDetails {
        GuestDetails::try_new("Ada Lovelace", "ada@example.com", None, None).unwrap()
    }

    fn booking(status: BookingStatus) -> Booking {
        Booking::create(
            BookingId::new(),
            OrganizationId::new(),
            ServiceId::new(),
            ProviderId::new(),
            None,
            Timestamp::now().plus_minutes(60),
            45,
            status,
            guest(),
        )
    }

    #[test]
    fn create_denormalizes_end_time_from_duration() {
        let b = booking(BookingStatus::Confirmed);
        assert_eq!(b.end_time, b.start_time.plus_minutes(45));
        assert_eq!(b.interval().start(), b.start_time);
        assert_eq!(b.interval().end(), b.end_time);
    }

    #[test]
    fn guest_details_trims_and_validates() {
        let g = GuestDetails::try_new("  Ada  ", " ada@example.com ", None, None).unwrap();
        assert_eq!(g.name, "Ada");
        assert_eq!(g.email, "ada@example.com");
    }

    #[test]
    fn guest_details_rejects_empty_name_and_email() {
        assert!(GuestDetails::try_new("", "ada@example.com", None, None).is_err());
        assert!(GuestDetails::try_new("Ada", "   ", None, None).is_err());
    }

    #[test]
    fn guest_details_rejects_malformed_email() {
        assert!(GuestDetails::try_new("Ada", "not-an-email", None, None).is_err());
        assert!(GuestDetails::try_new("Ada", "@example.com", None, None).is_err());
        assert!(GuestDetails::try_new("Ada", "ada@", None, None).is_err());
    }

    #[test]
    fn guest_details_drops_blank_optionals() {
        let g = GuestDetails::try_new(
            "Ada",
            "ada@example.com",
            Some("   ".to_string()),
            Some("".to_string()),
        )
        .unwrap();
        assert_eq!(g.phone, None);
        assert_eq!(g.notes, None);
    }

    #[test]
    fn pending_booking_occupies_time_until_cancelled() {
        let mut b = booking(BookingStatus::Pending);
        assert!(b.occupies_time());
        b.cancel().unwrap();
        assert_eq!(b.status, BookingStatus::Cancelled);
        assert!(!b.occupies_time());
    }

    #[test]
    fn confirm_then_complete_follows_the_state_machine() {
        let mut b = booking(BookingStatus::Pending);
        b.confirm().unwrap();
        assert_eq!(b.status, BookingStatus::Confirmed);
        b.complete().unwrap();
        assert_eq!(b.status, BookingStatus::Completed);
    }

    #[test]
    fn invalid_transitions_are_rejected() {
        let mut b = booking(BookingStatus::Pending);
        assert!(b.complete().is_err());
        assert!(b.mark_no_show().is_err());

        let mut done = booking(BookingStatus::Confirmed);
        done.complete().unwrap();
        assert!(done.cancel().is_err());
    }
}
