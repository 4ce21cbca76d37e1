//! PostgreSQL implementation of AvailabilityStore.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    AvailabilityWindowId, DayOfWeek, DomainError, ErrorCode, ProviderId, TimeOfDay,
};
use crate::domain::scheduling::AvailabilityWindow;
use crate::ports::AvailabilityStore;

/// PostgreSQL implementation of the AvailabilityStore port.
///
/// Window edges are stored as integer minutes since midnight; the "HH:MM"
/// string form never leaves the API edge.
pub struct PostgresAvailabilityStore {
    pool: PgPool,
}

impl PostgresAvailabilityStore {
    /// Creates a new PostgresAvailabilityStore with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of an availability window.
#[derive(Debug, sqlx::FromRow)]
struct AvailabilityWindowRow {
    id: Uuid,
    provider_id: Uuid,
    day_of_week: i16,
    start_minutes: i16,
    end_minutes: i16,
    is_active: bool,
}

impl TryFrom<AvailabilityWindowRow> for AvailabilityWindow {
    type Error = DomainError;

    fn try_from(row: AvailabilityWindowRow) -> Result<Self, Self::Error> {
        let day = DayOfWeek::from_index(row.day_of_week as u8).map_err(invalid_row)?;
        let start = TimeOfDay::try_new(row.start_minutes as u16).map_err(invalid_row)?;
        let end = TimeOfDay::try_new(row.end_minutes as u16).map_err(invalid_row)?;

        AvailabilityWindow::new(
            AvailabilityWindowId::from_uuid(row.id),
            ProviderId::from_uuid(row.provider_id),
            day,
            start,
            end,
            row.is_active,
        )
        .map_err(invalid_row)
    }
}

fn invalid_row(err: impl std::fmt::Display) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Invalid availability window row: {}", err),
    )
}

#[async_trait]
impl AvailabilityStore for PostgresAvailabilityStore {
    async fn windows_for(
        &self,
        provider_id: &ProviderId,
        day: DayOfWeek,
    ) -> Result<Vec<AvailabilityWindow>, DomainError> {
        let rows: Vec<AvailabilityWindowRow> = sqlx::query_as(
            r#"
            SELECT id, provider_id, day_of_week, start_minutes, end_minutes, is_active
            FROM availability_windows
            WHERE provider_id = $1 AND day_of_week = $2 AND is_active = TRUE
            "#,
        )
        .bind(provider_id.as_uuid())
        .bind(day.as_index() as i16)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch availability windows: {}", e),
            )
        })?;

        rows.into_iter().map(AvailabilityWindow::try_from).collect()
    }
}
