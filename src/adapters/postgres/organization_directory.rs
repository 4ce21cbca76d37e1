//! PostgreSQL implementation of OrganizationDirectory.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::catalog::Organization;
use crate::domain::foundation::{DomainError, ErrorCode, OrganizationId, OrganizationSlug};
use crate::ports::OrganizationDirectory;

/// PostgreSQL implementation of the OrganizationDirectory port.
pub struct PostgresOrganizationDirectory {
    pool: PgPool,
}

impl PostgresOrganizationDirectory {
    /// Creates a new PostgresOrganizationDirectory with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of an organization.
#[derive(Debug, sqlx::FromRow)]
struct OrganizationRow {
    id: Uuid,
    slug: String,
    name: String,
    timezone: String,
}

impl TryFrom<OrganizationRow> for Organization {
    type Error = DomainError;

    fn try_from(row: OrganizationRow) -> Result<Self, Self::Error> {
        let slug = OrganizationSlug::new(row.slug).map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid organization row: {}", e),
            )
        })?;
        let timezone = Organization::parse_timezone(&row.timezone).map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid organization row: {}", e),
            )
        })?;
        Ok(Organization {
            id: OrganizationId::from_uuid(row.id),
            slug,
            name: row.name,
            timezone,
        })
    }
}

#[async_trait]
impl OrganizationDirectory for PostgresOrganizationDirectory {
    async fn find_by_slug(
        &self,
        slug: &OrganizationSlug,
    ) -> Result<Option<Organization>, DomainError> {
        let row: Option<OrganizationRow> = sqlx::query_as(
            r#"
            SELECT id, slug, name, timezone
            FROM organizations
            WHERE slug = $1
            "#,
        )
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch organization: {}", e),
            )
        })?;

        row.map(Organization::try_from).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_conversion_parses_timezone() {
        let row = OrganizationRow {
            id: Uuid::new_v4(),
            slug: "acme-dental".to_string(),
            name: "Acme Dental".to_string(),
            timezone: "America/Chicago".to_string(),
        };
        let org = Organization::try_from(row).unwrap();
        assert_eq!(org.timezone, chrono_tz::America::Chicago);
        assert_eq!(org.slug.as_str(), "acme-dental");
    }

    #[test]
    fn row_conversion_rejects_unknown_timezone() {
        let row = OrganizationRow {
            id: Uuid::new_v4(),
            slug: "acme-dental".to_string(),
            name: "Acme Dental".to_string(),
            timezone: "Not/A_Zone".to_string(),
        };
        let err = Organization::try_from(row).unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
