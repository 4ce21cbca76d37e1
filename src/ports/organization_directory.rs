//! Organization directory port (read side).
//!
//! Resolves the public booking surface's slug to tenant identity and the
//! timezone all slot arithmetic runs in.

use async_trait::async_trait;

use crate::domain::catalog::Organization;
use crate::domain::foundation::{DomainError, OrganizationSlug};

/// Read port for tenant resolution.
#[async_trait]
pub trait OrganizationDirectory: Send + Sync {
    /// Fetch an organization by its public slug. Returns `None` if no such
    /// tenant exists.
    async fn find_by_slug(
        &self,
        slug: &OrganizationSlug,
    ) -> Result<Option<Organization>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn organization_directory_is_object_safe() {
        fn _accepts_dyn(_directory: &dyn OrganizationDirectory) {}
    }
}
