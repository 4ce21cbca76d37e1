//! In-memory busy feed with a failure toggle.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, ProviderId};
use crate::domain::scheduling::Interval;
use crate::ports::BusyFeed;

/// In-memory busy feed for tests and local development.
///
/// `set_failing` simulates an upstream outage so degraded-mode handling can
/// be exercised end to end.
#[derive(Clone, Default)]
pub struct InMemoryBusyFeed {
    busy: Arc<RwLock<HashMap<ProviderId, Vec<Interval>>>>,
    failing: Arc<RwLock<bool>>,
}

impl InMemoryBusyFeed {
    /// Create an empty feed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a busy span for a provider.
    pub async fn insert(&self, provider_id: ProviderId, interval: Interval) {
        self.busy
            .write()
            .await
            .entry(provider_id)
            .or_default()
            .push(interval);
    }

    /// Make every fetch fail (or recover) from now on.
    pub async fn set_failing(&self, failing: bool) {
        *self.failing.write().await = failing;
    }
}

#[async_trait]
impl BusyFeed for InMemoryBusyFeed {
    async fn busy_intervals_for(
        &self,
        provider_id: &ProviderId,
        range: &Interval,
    ) -> Result<Vec<Interval>, DomainError> {
        if *self.failing.read().await {
            return Err(DomainError::new(
                ErrorCode::FeedUnavailable,
                "Busy feed is unavailable",
            ));
        }

        Ok(self
            .busy
            .read()
            .await
            .get(provider_id)
            .map(|intervals| {
                intervals
                    .iter()
                    .filter(|i| i.overlaps(range))
                    .copied()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn staleness_bound(&self) -> Duration {
        Duration::ZERO
    }
}
