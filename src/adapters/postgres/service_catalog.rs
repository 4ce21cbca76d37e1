//! PostgreSQL implementation of ServiceCatalog.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::catalog::Service;
use crate::domain::foundation::{DomainError, ErrorCode, OrganizationId, ProviderId, ServiceId};
use crate::ports::ServiceCatalog;

/// PostgreSQL implementation of the ServiceCatalog port.
///
/// Reads go straight to the database on every call; the "read current
/// config, then compute" pattern is intentional for correctness.
pub struct PostgresServiceCatalog {
    pool: PgPool,
}

impl PostgresServiceCatalog {
    /// Creates a new PostgresServiceCatalog with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a service.
#[derive(Debug, sqlx::FromRow)]
struct ServiceRow {
    id: Uuid,
    organization_id: Uuid,
    name: String,
    duration_minutes: i32,
    price_cents: i64,
    buffer_before_minutes: i32,
    buffer_after_minutes: i32,
    min_notice_minutes: i32,
    max_advance_days: Option<i32>,
    is_active: bool,
}

impl TryFrom<ServiceRow> for Service {
    type Error = DomainError;

    fn try_from(row: ServiceRow) -> Result<Self, Self::Error> {
        Service::try_new(
            ServiceId::from_uuid(row.id),
            OrganizationId::from_uuid(row.organization_id),
            row.name,
            row.duration_minutes as u32,
            row.price_cents,
            row.buffer_before_minutes as u32,
            row.buffer_after_minutes as u32,
            row.min_notice_minutes as u32,
            row.max_advance_days.map(|d| d as u32),
            row.is_active,
        )
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid service row: {}", e),
            )
        })
    }
}

#[async_trait]
impl ServiceCatalog for PostgresServiceCatalog {
    async fn get(&self, service_id: &ServiceId) -> Result<Option<Service>, DomainError> {
        let row: Option<ServiceRow> = sqlx::query_as(
            r#"
            SELECT id, organization_id, name, duration_minutes, price_cents,
                   buffer_before_minutes, buffer_after_minutes, min_notice_minutes,
                   max_advance_days, is_active
            FROM services
            WHERE id = $1
            "#,
        )
        .bind(service_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch service: {}", e),
            )
        })?;

        row.map(Service::try_from).transpose()
    }

    async fn providers_for(
        &self,
        service_id: &ServiceId,
    ) -> Result<Vec<ProviderId>, DomainError> {
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT provider_id
            FROM service_providers
            WHERE service_id = $1
            ORDER BY position
            "#,
        )
        .bind(service_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch service providers: {}", e),
            )
        })?;

        Ok(rows
            .into_iter()
            .map(|(id,)| ProviderId::from_uuid(id))
            .collect())
    }
}
