//! Webhook notification dispatcher.
//!
//! Posts booking confirmations to a configured notifications endpoint (the
//! service that fans out guest email/SMS). The body is signed with
//! HMAC-SHA256 so the receiver can authenticate the sender; the signature
//! scheme matches the one our own inbound webhooks expect:
//!
//! `X-ClientFlow-Signature: t=<unix-seconds>,v1=<hex hmac of "t.body">`

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use sha2::Sha256;

use crate::domain::booking::Booking;
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::ports::NotificationDispatcher;

type HmacSha256 = Hmac<Sha256>;

/// Signature header name.
const SIGNATURE_HEADER: &str = "X-ClientFlow-Signature";

/// Notifications endpoint configuration.
#[derive(Clone)]
pub struct WebhookConfig {
    /// Endpoint booking confirmations are posted to.
    url: String,

    /// HMAC signing secret shared with the receiver.
    signing_secret: SecretString,
}

impl WebhookConfig {
    /// Create a new webhook configuration.
    pub fn new(url: impl Into<String>, signing_secret: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            signing_secret: SecretString::new(signing_secret.into()),
        }
    }

    /// Set a custom endpoint URL (for testing).
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

/// Booking confirmation payload posted to the notifications endpoint.
#[derive(Debug, Serialize)]
struct ConfirmationPayload<'a> {
    event: &'static str,
    booking_id: String,
    organization_id: String,
    service_id: String,
    provider_id: String,
    status: &'a crate::domain::booking::BookingStatus,
    start_time: &'a Timestamp,
    end_time: &'a Timestamp,
    guest_name: &'a str,
    guest_email: &'a str,
}

/// Signed webhook dispatcher for booking confirmations.
pub struct WebhookNotificationDispatcher {
    config: WebhookConfig,
    http_client: reqwest::Client,
}

impl WebhookNotificationDispatcher {
    /// Create a new dispatcher with the given configuration.
    pub fn new(config: WebhookConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Computes the signature header value for `body` at `timestamp`.
    fn sign(&self, timestamp: i64, body: &str) -> String {
        let signed_payload = format!("{}.{}", timestamp, body);
        let mut mac = HmacSha256::new_from_slice(
            self.config.signing_secret.expose_secret().as_bytes(),
        )
        .expect("HMAC can take key of any size");
        mac.update(signed_payload.as_bytes());
        let signature = hex_encode(&mac.finalize().into_bytes());
        format!("t={},v1={}", timestamp, signature)
    }
}

/// Encode bytes to hex string.
fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[async_trait]
impl NotificationDispatcher for WebhookNotificationDispatcher {
    async fn dispatch_booking_confirmation(&self, booking: &Booking) -> Result<(), DomainError> {
        let payload = ConfirmationPayload {
            event: "booking.confirmed",
            booking_id: booking.id.to_string(),
            organization_id: booking.organization_id.to_string(),
            service_id: booking.service_id.to_string(),
            provider_id: booking.provider_id.to_string(),
            status: &booking.status,
            start_time: &booking.start_time,
            end_time: &booking.end_time,
            guest_name: &booking.guest_name,
            guest_email: &booking.guest_email,
        };

        let body = serde_json::to_string(&payload).map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Failed to serialize confirmation payload: {}", e),
            )
        })?;

        let timestamp = chrono::Utc::now().timestamp();
        let signature = self.sign(timestamp, &body);

        let response = self
            .http_client
            .post(&self.config.url)
            .header("Content-Type", "application/json")
            .header(SIGNATURE_HEADER, signature)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::InternalError,
                    format!("Notification request failed: {}", e),
                )
            })?;

        if !response.status().is_success() {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                format!("Notification endpoint returned {}", response.status()),
            ));
        }

        Ok(())
    }
}
