//! ClientFlow booking service entry point
//!
//! Loads configuration, connects infrastructure (PostgreSQL, Redis, the
//! external calendar API and the tenant webhook endpoint), and serves the
//! public booking API over HTTP.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use clientflow_booking::adapters::calendar::{CachedBusyFeed, CalendarFeedConfig, CalendarHttpFeed};
use clientflow_booking::adapters::http::{booking_router, health_router, BookingAppState};
use clientflow_booking::adapters::notifications::{WebhookConfig, WebhookNotificationDispatcher};
use clientflow_booking::adapters::postgres::{
    PostgresAvailabilityStore, PostgresBookingLedger, PostgresOrganizationDirectory,
    PostgresServiceCatalog,
};
use clientflow_booking::config::AppConfig;
use clientflow_booking::ports::BusyFeed;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    info!(
        environment = ?config.server.environment,
        "Starting ClientFlow booking service"
    );

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .max_lifetime(config.database.max_lifetime())
        .connect(&config.database.url)
        .await?;
    info!("Connected to PostgreSQL");

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("Database migrations applied");
    }

    let redis_client = redis::Client::open(config.redis.url.as_str())?;
    let redis_conn = redis_client.get_multiplexed_async_connection().await?;
    info!("Connected to Redis");

    let calendar_feed = CalendarHttpFeed::new(CalendarFeedConfig::new(
        &config.calendar.base_url,
        &config.calendar.api_token,
    ));
    let busy_feed: Arc<dyn BusyFeed> = Arc::new(CachedBusyFeed::new(
        Arc::new(calendar_feed),
        redis_conn,
        config.redis.busy_cache_ttl(),
    ));

    let dispatcher = WebhookNotificationDispatcher::new(WebhookConfig::new(
        &config.notifications.webhook_url,
        &config.notifications.signing_secret,
    ));

    let state = BookingAppState {
        organization_directory: Arc::new(PostgresOrganizationDirectory::new(pool.clone())),
        service_catalog: Arc::new(PostgresServiceCatalog::new(pool.clone())),
        availability_store: Arc::new(PostgresAvailabilityStore::new(pool.clone())),
        booking_ledger: Arc::new(PostgresBookingLedger::new(pool.clone())),
        busy_feed,
        notification_dispatcher: Arc::new(dispatcher),
        feed_timeout: config.calendar.fetch_timeout(),
    };

    let app = Router::new()
        .merge(booking_router().with_state(state))
        .merge(health_router(pool))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(cors_layer(&config))
        .layer(CompressionLayer::new())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

    let addr = config.server.socket_addr();
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .init();
    }
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
