//! Service catalog port (read side).
//!
//! Current booking parameters and provider assignments for each service.
//! Values are read fresh per request; any caching an implementation adds
//! must be invalidated on configuration writes.

use async_trait::async_trait;

use crate::domain::catalog::Service;
use crate::domain::foundation::{DomainError, ProviderId, ServiceId};

/// Read port for service definitions and eligibility.
#[async_trait]
pub trait ServiceCatalog: Send + Sync {
    /// Fetch a service by id. Returns `None` if it does not exist.
    async fn get(&self, service_id: &ServiceId) -> Result<Option<Service>, DomainError>;

    /// The ordered set of providers eligible to deliver a service.
    ///
    /// Empty for an unknown service or one with no assignments.
    async fn providers_for(
        &self,
        service_id: &ServiceId,
    ) -> Result<Vec<ProviderId>, DomainError>;
}
