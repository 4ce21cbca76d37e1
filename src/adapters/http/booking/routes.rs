//! Route configuration for the public booking endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{create_booking, list_slots, BookingAppState};

/// Creates the public booking router.
///
/// Routes:
/// - `GET /api/public/:org_slug/services/:service_id/providers/:provider_id/slots?date=YYYY-MM-DD`
/// - `POST /api/public/:org_slug/bookings`
pub fn booking_router() -> Router<BookingAppState> {
    Router::new()
        .route(
            "/api/public/:org_slug/services/:service_id/providers/:provider_id/slots",
            get(list_slots),
        )
        .route("/api/public/:org_slug/bookings", post(create_booking))
}
