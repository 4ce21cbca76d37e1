//! Read-through cache decorator for a busy feed.
//!
//! Slot listings hammer the busy feed (one fetch per page view), while the
//! underlying calendars change rarely. This decorator keeps recent fetches
//! in Redis for a short TTL and reports that TTL as its staleness bound.
//!
//! Cache failures are never fatal: a Redis error on read falls through to
//! the inner feed, and a Redis error on write only loses the caching.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::domain::foundation::{DomainError, ProviderId};
use crate::domain::scheduling::Interval;
use crate::ports::BusyFeed;

/// Redis read-through cache over another busy feed.
pub struct CachedBusyFeed {
    inner: Arc<dyn BusyFeed>,
    conn: MultiplexedConnection,
    ttl: Duration,
}

impl CachedBusyFeed {
    /// Wraps `inner` with a cache holding entries for `ttl`.
    pub fn new(inner: Arc<dyn BusyFeed>, conn: MultiplexedConnection, ttl: Duration) -> Self {
        Self { inner, conn, ttl }
    }

    /// Cache key scoped to provider and requested range.
    fn cache_key(provider_id: &ProviderId, range: &Interval) -> String {
        format!(
            "busy_feed:{}:{}:{}",
            provider_id,
            range.start().as_unix_secs(),
            range.end().as_unix_secs()
        )
    }
}

#[async_trait]
impl BusyFeed for CachedBusyFeed {
    async fn busy_intervals_for(
        &self,
        provider_id: &ProviderId,
        range: &Interval,
    ) -> Result<Vec<Interval>, DomainError> {
        let key = Self::cache_key(provider_id, range);
        let mut conn = self.conn.clone();

        match conn.get::<_, Option<String>>(&key).await {
            Ok(Some(cached)) => match serde_json::from_str::<Vec<Interval>>(&cached) {
                Ok(intervals) => return Ok(intervals),
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "Discarding undecodable busy cache entry");
                }
            },
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Busy cache read failed, using live feed");
            }
        }

        let intervals = self.inner.busy_intervals_for(provider_id, range).await?;

        if let Ok(serialized) = serde_json::to_string(&intervals) {
            if let Err(e) = conn
                .set_ex::<_, _, ()>(&key, serialized, self.ttl.as_secs())
                .await
            {
                tracing::warn!(key = %key, error = %e, "Busy cache write failed");
            }
        }

        Ok(intervals)
    }

    fn staleness_bound(&self) -> Duration {
        self.ttl
    }
}
