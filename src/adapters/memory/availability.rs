//! In-memory availability store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DayOfWeek, DomainError, ProviderId};
use crate::domain::scheduling::AvailabilityWindow;
use crate::ports::AvailabilityStore;

/// In-memory availability store keyed by provider and weekday.
#[derive(Clone, Default)]
pub struct InMemoryAvailabilityStore {
    windows: Arc<RwLock<HashMap<(ProviderId, DayOfWeek), Vec<AvailabilityWindow>>>>,
}

impl InMemoryAvailabilityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a window to a provider's weekly schedule.
    pub async fn insert(&self, window: AvailabilityWindow) {
        self.windows
            .write()
            .await
            .entry((window.provider_id, window.day_of_week))
            .or_default()
            .push(window);
    }
}

#[async_trait]
impl AvailabilityStore for InMemoryAvailabilityStore {
    async fn windows_for(
        &self,
        provider_id: &ProviderId,
        day: DayOfWeek,
    ) -> Result<Vec<AvailabilityWindow>, DomainError> {
        Ok(self
            .windows
            .read()
            .await
            .get(&(*provider_id, day))
            .map(|windows| {
                windows
                    .iter()
                    .filter(|w| w.is_active)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
