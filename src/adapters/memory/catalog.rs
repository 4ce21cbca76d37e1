//! In-memory organization directory and service catalog.
//!
//! Useful for integration tests and local development without a database.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::catalog::{Organization, Service};
use crate::domain::foundation::{DomainError, OrganizationSlug, ProviderId, ServiceId};
use crate::ports::{OrganizationDirectory, ServiceCatalog};

/// In-memory organization directory.
#[derive(Clone, Default)]
pub struct InMemoryOrganizationDirectory {
    organizations: Arc<RwLock<HashMap<OrganizationSlug, Organization>>>,
}

impl InMemoryOrganizationDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an organization under its slug.
    pub async fn insert(&self, organization: Organization) {
        self.organizations
            .write()
            .await
            .insert(organization.slug.clone(), organization);
    }
}

#[async_trait]
impl OrganizationDirectory for InMemoryOrganizationDirectory {
    async fn find_by_slug(
        &self,
        slug: &OrganizationSlug,
    ) -> Result<Option<Organization>, DomainError> {
        Ok(self.organizations.read().await.get(slug).cloned())
    }
}

/// In-memory service catalog with explicit provider eligibility.
#[derive(Clone, Default)]
pub struct InMemoryServiceCatalog {
    services: Arc<RwLock<HashMap<ServiceId, Service>>>,
    eligible: Arc<RwLock<HashMap<ServiceId, Vec<ProviderId>>>>,
}

impl InMemoryServiceCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a service with its ordered eligible providers.
    pub async fn insert(&self, service: Service, providers: Vec<ProviderId>) {
        let id = service.id;
        self.services.write().await.insert(id, service);
        self.eligible.write().await.insert(id, providers);
    }
}

#[async_trait]
impl ServiceCatalog for InMemoryServiceCatalog {
    async fn get(&self, service_id: &ServiceId) -> Result<Option<Service>, DomainError> {
        Ok(self.services.read().await.get(service_id).cloned())
    }

    async fn providers_for(
        &self,
        service_id: &ServiceId,
    ) -> Result<Vec<ProviderId>, DomainError> {
        Ok(self
            .eligible
            .read()
            .await
            .get(service_id)
            .cloned()
            .unwrap_or_default())
    }
}
