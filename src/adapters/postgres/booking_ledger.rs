//! PostgreSQL implementation of BookingLedger.
//!
//! The commit path is the only write in the scheduling core, and it is where
//! double-booking is actually prevented: a per-provider advisory lock
//! serializes concurrent commits, and the overlap check re-runs inside the
//! same transaction, so the check-then-insert race between two guests cannot
//! slip through. A partial exclusion constraint on the table backstops the
//! same guarantee at the storage level.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::foundation::{DomainError, ErrorCode, ProviderId, Timestamp};
use crate::domain::scheduling::Interval;
use crate::ports::BookingLedger;

/// PostgreSQL implementation of the BookingLedger port.
#[derive(Clone)]
pub struct PostgresBookingLedger {
    pool: PgPool,
}

impl PostgresBookingLedger {
    /// Creates a new PostgresBookingLedger with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Derives the advisory lock key for a provider.
///
/// `pg_advisory_xact_lock` takes a bigint, so the first eight bytes of the
/// provider UUID (big-endian) are folded into one. Distinct providers may in
/// principle share a key; that only serializes their commits, never corrupts
/// them.
fn provider_lock_key(provider_id: &ProviderId) -> i64 {
    let bytes = provider_id.as_uuid().as_bytes();
    i64::from_be_bytes([
        bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
    ])
}

fn status_to_str(status: BookingStatus) -> &'static str {
    match status {
        BookingStatus::Pending => "pending",
        BookingStatus::Confirmed => "confirmed",
        BookingStatus::Cancelled => "cancelled",
        BookingStatus::Completed => "completed",
        BookingStatus::NoShow => "no_show",
    }
}

/// SQLSTATE raised by an exclusion constraint violation.
const EXCLUSION_VIOLATION: &str = "23P01";

fn database_error(context: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

fn slot_conflict(provider_id: &ProviderId) -> DomainError {
    DomainError::new(
        ErrorCode::SlotConflict,
        "Requested slot was taken by a concurrent booking",
    )
    .with_detail("provider_id", provider_id.to_string())
}

#[async_trait]
impl BookingLedger for PostgresBookingLedger {
    async fn occupying_intervals(
        &self,
        provider_id: &ProviderId,
        range: &Interval,
    ) -> Result<Vec<Interval>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT start_time, end_time
            FROM bookings
            WHERE provider_id = $1
              AND status IN ('pending', 'confirmed')
              AND start_time < $3
              AND end_time > $2
            ORDER BY start_time
            "#,
        )
        .bind(provider_id.as_uuid())
        .bind(range.start().as_datetime())
        .bind(range.end().as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("Failed to fetch occupying bookings", e))?;

        rows.into_iter()
            .map(|row| {
                let start: chrono::DateTime<chrono::Utc> = row.get("start_time");
                let end: chrono::DateTime<chrono::Utc> = row.get("end_time");
                Interval::new(Timestamp::from_datetime(start), Timestamp::from_datetime(end))
                    .map_err(|e| database_error("Invalid booking interval in storage", e))
            })
            .collect()
    }

    async fn commit(
        &self,
        booking: &Booking,
        buffer_before_minutes: u32,
        buffer_after_minutes: u32,
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| database_error("Failed to begin transaction", e))?;

        // Serialize commits for this provider. Released on commit/rollback.
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(provider_lock_key(&booking.provider_id))
            .execute(&mut *tx)
            .await
            .map_err(|e| database_error("Failed to acquire provider lock", e))?;

        // An existing booking blocks the candidate exactly when its span,
        // expanded by the candidate's buffers, intersects the raw candidate
        // span: b.start - before < end AND b.end + after > start.
        let latest_blocking_start = booking.end_time.plus_minutes(buffer_before_minutes as i64);
        let earliest_blocking_end = booking.start_time.minus_minutes(buffer_after_minutes as i64);

        let conflict: Option<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT id
            FROM bookings
            WHERE provider_id = $1
              AND status IN ('pending', 'confirmed')
              AND start_time < $2
              AND end_time > $3
            LIMIT 1
            "#,
        )
        .bind(booking.provider_id.as_uuid())
        .bind(latest_blocking_start.as_datetime())
        .bind(earliest_blocking_end.as_datetime())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| database_error("Failed to re-check slot", e))?;

        if conflict.is_some() {
            return Err(slot_conflict(&booking.provider_id));
        }

        sqlx::query(
            r#"
            INSERT INTO bookings (
                id, organization_id, service_id, provider_id, contact_id,
                status, start_time, end_time,
                guest_name, guest_email, guest_phone, notes, internal_notes,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(booking.id.as_uuid())
        .bind(booking.organization_id.as_uuid())
        .bind(booking.service_id.as_uuid())
        .bind(booking.provider_id.as_uuid())
        .bind(booking.contact_id.as_ref().map(|id| *id.as_uuid()))
        .bind(status_to_str(booking.status))
        .bind(booking.start_time.as_datetime())
        .bind(booking.end_time.as_datetime())
        .bind(&booking.guest_name)
        .bind(&booking.guest_email)
        .bind(booking.guest_phone.as_deref())
        .bind(booking.notes.as_deref())
        .bind(booking.internal_notes.as_deref())
        .bind(booking.created_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.code().as_deref() == Some(EXCLUSION_VIOLATION) => {
                slot_conflict(&booking.provider_id)
            }
            _ => database_error("Failed to insert booking", e),
        })?;

        tx.commit()
            .await
            .map_err(|e| database_error("Failed to commit transaction", e))?;

        Ok(())
    }
}
