//! HTTP busy feed adapter.
//!
//! Implements the `BusyFeed` trait against a calendar-sync service that
//! mirrors providers' external calendars (Google, Outlook) and exposes their
//! busy time over a small JSON API.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use crate::domain::foundation::{DomainError, ErrorCode, ProviderId, Timestamp};
use crate::domain::scheduling::Interval;
use crate::ports::BusyFeed;

/// Calendar-sync service configuration.
#[derive(Clone)]
pub struct CalendarFeedConfig {
    /// Bearer token for the calendar-sync API.
    api_token: SecretString,

    /// Base URL of the calendar-sync service.
    base_url: String,
}

impl CalendarFeedConfig {
    /// Create a new calendar feed configuration.
    pub fn new(base_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            api_token: SecretString::new(api_token.into()),
            base_url: base_url.into(),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

/// Live HTTP busy feed.
///
/// Every call hits the calendar-sync service, so the staleness bound is
/// zero. Wrap in [`super::CachedBusyFeed`] to trade freshness for latency.
pub struct CalendarHttpFeed {
    config: CalendarFeedConfig,
    http_client: reqwest::Client,
}

impl CalendarHttpFeed {
    /// Create a new feed with the given configuration.
    pub fn new(config: CalendarFeedConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }
}

/// One busy span as the calendar-sync service reports it.
#[derive(Debug, Deserialize)]
struct BusySpanDto {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct BusyResponse {
    busy: Vec<BusySpanDto>,
}

fn feed_unavailable(message: impl Into<String>) -> DomainError {
    DomainError::new(ErrorCode::FeedUnavailable, message)
}

#[async_trait]
impl BusyFeed for CalendarHttpFeed {
    async fn busy_intervals_for(
        &self,
        provider_id: &ProviderId,
        range: &Interval,
    ) -> Result<Vec<Interval>, DomainError> {
        let url = format!(
            "{}/providers/{}/busy",
            self.config.base_url, provider_id
        );

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(self.config.api_token.expose_secret())
            .query(&[
                ("from", range.start().as_datetime().to_rfc3339()),
                ("to", range.end().as_datetime().to_rfc3339()),
            ])
            .send()
            .await
            .map_err(|e| feed_unavailable(format!("Calendar feed request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!(
                provider_id = %provider_id,
                status = %status,
                "Calendar feed returned an error status"
            );
            return Err(feed_unavailable(format!(
                "Calendar feed returned {}",
                status
            )));
        }

        let body: BusyResponse = response
            .json()
            .await
            .map_err(|e| feed_unavailable(format!("Invalid calendar feed response: {}", e)))?;

        // Malformed spans (start >= end) are dropped rather than failing the
        // whole fetch; one bad upstream event must not blank out busy time.
        let mut intervals = Vec::with_capacity(body.busy.len());
        for span in body.busy {
            match Interval::new(
                Timestamp::from_datetime(span.start),
                Timestamp::from_datetime(span.end),
            ) {
                Ok(interval) => intervals.push(interval),
                Err(_) => tracing::warn!(
                    provider_id = %provider_id,
                    start = %span.start,
                    end = %span.end,
                    "Dropping malformed busy span from calendar feed"
                ),
            }
        }

        Ok(intervals)
    }

    fn staleness_bound(&self) -> Duration {
        Duration::ZERO
    }
}
