//! External calendar feed configuration

use std::time::Duration;

use serde::Deserialize;

use super::error::ValidationError;

/// External calendar busy-feed configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    /// Base URL of the calendar provider API
    pub base_url: String,

    /// API token for the calendar provider
    pub api_token: String,

    /// Per-request timeout for busy-feed fetches (seconds)
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

fn default_fetch_timeout_secs() -> u64 {
    3
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_token: String::new(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

impl CalendarConfig {
    /// Get the fetch timeout as a Duration
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Validate calendar configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_url.is_empty() {
            return Err(ValidationError::MissingRequired("CALENDAR_BASE_URL"));
        }
        if self.api_token.is_empty() {
            return Err(ValidationError::MissingRequired("CALENDAR_API_TOKEN"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidCalendarUrl);
        }
        if self.fetch_timeout_secs == 0 {
            return Err(ValidationError::InvalidFeedTimeout);
        }

        Ok(())
    }
}
