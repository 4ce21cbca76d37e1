//! HTTP handlers for the public booking endpoints.
//!
//! These handlers connect Axum routes to the application layer facade:
//! slot listing and booking creation.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::booking::{
    CreateBookingCommand, CreateBookingHandler, ListSlotsHandler, ListSlotsQuery,
};
use crate::domain::booking::BookingError;
use crate::domain::foundation::{
    ContactId, OrganizationSlug, ProviderId, ServiceId, Timestamp,
};
use crate::ports::{
    AvailabilityStore, BookingLedger, BusyFeed, NotificationDispatcher, OrganizationDirectory,
    ServiceCatalog,
};

use super::dto::{
    BookingResponse, CreateBookingRequest, ErrorResponse, SlotsQuery, SlotsResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct BookingAppState {
    pub organization_directory: Arc<dyn OrganizationDirectory>,
    pub service_catalog: Arc<dyn ServiceCatalog>,
    pub availability_store: Arc<dyn AvailabilityStore>,
    pub booking_ledger: Arc<dyn BookingLedger>,
    pub busy_feed: Arc<dyn BusyFeed>,
    pub notification_dispatcher: Arc<dyn NotificationDispatcher>,
    pub feed_timeout: Duration,
}

impl BookingAppState {
    pub fn list_slots_handler(&self) -> ListSlotsHandler {
        ListSlotsHandler::new(
            self.organization_directory.clone(),
            self.service_catalog.clone(),
            self.availability_store.clone(),
            self.booking_ledger.clone(),
            self.busy_feed.clone(),
            self.feed_timeout,
        )
    }

    pub fn create_booking_handler(&self) -> CreateBookingHandler {
        CreateBookingHandler::new(
            self.organization_directory.clone(),
            self.service_catalog.clone(),
            self.availability_store.clone(),
            self.booking_ledger.clone(),
            self.busy_feed.clone(),
            self.notification_dispatcher.clone(),
            self.feed_timeout,
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/public/:org_slug/services/:service_id/providers/:provider_id/slots
pub async fn list_slots(
    State(state): State<BookingAppState>,
    Path((org_slug, service_id, provider_id)): Path<(String, String, String)>,
    Query(query): Query<SlotsQuery>,
) -> Result<impl IntoResponse, BookingApiError> {
    let organization_slug = parse_slug(&org_slug)?;
    let service_id: ServiceId = service_id
        .parse()
        .map_err(|_| BookingApiError::BadRequest("Invalid service ID format".to_string()))?;
    let provider_id: ProviderId = provider_id
        .parse()
        .map_err(|_| BookingApiError::BadRequest("Invalid provider ID format".to_string()))?;

    let handler = state.list_slots_handler();
    let result = handler
        .handle(ListSlotsQuery {
            organization_slug,
            service_id,
            provider_id,
            date: query.date,
        })
        .await?;

    let response = SlotsResponse {
        slots: result.slots.iter().map(Timestamp::to_string).collect(),
        feed_degraded: result.feed_degraded,
    };

    Ok(Json(response))
}

/// POST /api/public/:org_slug/bookings
pub async fn create_booking(
    State(state): State<BookingAppState>,
    Path(org_slug): Path<String>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, BookingApiError> {
    let organization_slug = parse_slug(&org_slug)?;
    let service_id: ServiceId = request
        .service_id
        .parse()
        .map_err(|_| BookingApiError::BadRequest("Invalid service ID format".to_string()))?;
    let provider_id: ProviderId = request
        .provider_id
        .parse()
        .map_err(|_| BookingApiError::BadRequest("Invalid provider ID format".to_string()))?;
    let contact_id: Option<ContactId> = request
        .contact_id
        .as_deref()
        .map(str::parse)
        .transpose()
        .map_err(|_| BookingApiError::BadRequest("Invalid contact ID format".to_string()))?;

    let handler = state.create_booking_handler();
    let result = handler
        .handle(CreateBookingCommand {
            organization_slug,
            service_id,
            provider_id,
            start: Timestamp::from_datetime(request.start),
            guest_timezone: request.guest_timezone,
            guest_name: request.guest_name,
            guest_email: request.guest_email,
            guest_phone: request.guest_phone,
            notes: request.notes,
            contact_id,
        })
        .await?;

    let response = BookingResponse::from_booking(&result.booking, result.feed_degraded);
    Ok((StatusCode::CREATED, Json(response)))
}

fn parse_slug(raw: &str) -> Result<OrganizationSlug, BookingApiError> {
    OrganizationSlug::new(raw)
        .map_err(|_| BookingApiError::BadRequest("Invalid organization slug".to_string()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts booking errors to HTTP responses.
#[derive(Debug)]
pub enum BookingApiError {
    BadRequest(String),
    Booking(BookingError),
}

impl From<BookingError> for BookingApiError {
    fn from(err: BookingError) -> Self {
        BookingApiError::Booking(err)
    }
}

fn booking_error_status(err: &BookingError) -> StatusCode {
    match err {
        BookingError::OrganizationNotFound(_) | BookingError::ServiceNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        BookingError::ServiceInactive(_)
        | BookingError::IneligibleProvider { .. }
        | BookingError::SlotConflict { .. } => StatusCode::CONFLICT,
        BookingError::NoAvailability { .. }
        | BookingError::NoticeViolation { .. }
        | BookingError::AdvanceWindowViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        BookingError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
        BookingError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn booking_error_details(err: &BookingError) -> Option<serde_json::Value> {
    match err {
        BookingError::SlotConflict { provider_id } | BookingError::NoAvailability { provider_id } => {
            Some(serde_json::json!({ "provider_id": provider_id.to_string() }))
        }
        BookingError::ValidationFailed { field, .. } => {
            Some(serde_json::json!({ "field": field }))
        }
        BookingError::NoticeViolation { min_notice_minutes } => {
            Some(serde_json::json!({ "min_notice_minutes": min_notice_minutes }))
        }
        BookingError::AdvanceWindowViolation { max_advance_days } => {
            Some(serde_json::json!({ "max_advance_days": max_advance_days }))
        }
        _ => None,
    }
}

impl IntoResponse for BookingApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            BookingApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg))
            }
            BookingApiError::Booking(err) => {
                let status = booking_error_status(&err);
                // Storage details stay in the logs, not the response body.
                let message = if matches!(err, BookingError::Storage(_)) {
                    tracing::error!(error = %err, "Booking request failed on storage");
                    "Internal server error".to_string()
                } else {
                    err.message()
                };
                let mut body = ErrorResponse::new(err.code().to_string(), message);
                if let Some(details) = booking_error_details(&err) {
                    body = body.with_details(details);
                }
                (status, body)
            }
        };

        (status, Json(error)).into_response()
    }
}
