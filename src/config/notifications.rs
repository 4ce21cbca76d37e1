//! Outbound notification configuration

use std::time::Duration;

use serde::Deserialize;

use super::error::ValidationError;

/// Webhook notification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationsConfig {
    /// Tenant-facing webhook endpoint for booking events
    pub webhook_url: String,

    /// Secret used to sign webhook payloads
    pub signing_secret: String,

    /// Per-request timeout for webhook delivery (seconds)
    #[serde(default = "default_dispatch_timeout_secs")]
    pub dispatch_timeout_secs: u64,
}

fn default_dispatch_timeout_secs() -> u64 {
    5
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            signing_secret: String::new(),
            dispatch_timeout_secs: default_dispatch_timeout_secs(),
        }
    }
}

impl NotificationsConfig {
    /// Get the dispatch timeout as a Duration
    pub fn dispatch_timeout(&self) -> Duration {
        Duration::from_secs(self.dispatch_timeout_secs)
    }

    /// Validate notifications configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.webhook_url.is_empty() {
            return Err(ValidationError::MissingRequired("WEBHOOK_URL"));
        }
        if self.signing_secret.is_empty() {
            return Err(ValidationError::MissingRequired("WEBHOOK_SIGNING_SECRET"));
        }
        if !self.webhook_url.starts_with("http://") && !self.webhook_url.starts_with("https://") {
            return Err(ValidationError::InvalidWebhookUrl);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_missing_url() {
        let config = NotificationsConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_missing_secret() {
        let config = NotificationsConfig {
            webhook_url: "https://hooks.example.com/bookings".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_url_scheme() {
        let config = NotificationsConfig {
            webhook_url: "hooks.example.com/bookings".to_string(),
            signing_secret: "whsec_xyz".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidWebhookUrl)
        ));
    }

    #[test]
    fn test_validation_valid_config() {
        let config = NotificationsConfig {
            webhook_url: "https://hooks.example.com/bookings".to_string(),
            signing_secret: "whsec_xyz".to_string(),
            dispatch_timeout_secs: 5,
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.dispatch_timeout(), Duration::from_secs(5));
    }
}
