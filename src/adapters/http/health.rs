//! Health endpoint reporting process liveness and database reachability.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use sqlx::PgPool;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    database: &'static str,
}

/// GET /health
async fn health(State(pool): State<PgPool>) -> impl IntoResponse {
    let database_ok = sqlx::query("SELECT 1").execute(&pool).await.is_ok();

    let (status_code, body) = if database_ok {
        (
            StatusCode::OK,
            HealthResponse {
                status: "ok",
                database: "reachable",
            },
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            HealthResponse {
                status: "degraded",
                database: "unreachable",
            },
        )
    };

    (status_code, Json(body))
}

/// Creates the health router bound to a database pool.
pub fn health_router(pool: PgPool) -> Router {
    Router::new().route("/health", get(health)).with_state(pool)
}
