//! # SalonBook API
//!
//! The API crate provides the web server for the SalonBook booking service.
//! It exposes the back-office endpoints used by an establishment's staff and
//! the public endpoints used by customers to book online.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Parse and validate requests, shape responses
//! - **Services**: Availability computation and transactional booking writes
//! - **Middleware**: Establishment scoping and error mapping
//! - **Config**: Environment configuration
//!
//! The API uses Axum as the web framework and SQLx for database interactions.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Establishment scoping and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;
/// Logic shared by several handlers
pub mod services;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method, header},
};
use eyre::Result;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::middleware::scope::ESTABLISHMENT_HEADER;

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use salonbook_api::{ApiState, build_router};
/// use sqlx::postgres::PgPoolOptions;
///
/// # fn example() -> eyre::Result<()> {
/// let db_pool = PgPoolOptions::new().connect_lazy("postgres://localhost/salonbook")?;
/// let state = Arc::new(ApiState::new(db_pool, 30));
/// let app = build_router(state, None, 30);
/// # Ok(())
/// # }
/// ```
pub struct ApiState {
    /// PostgreSQL connection pool for database operations
    pub db_pool: PgPool,

    /// Minutes between candidate slot starts
    pub slot_interval_minutes: u32,
}

impl ApiState {
    pub fn new(db_pool: PgPool, slot_interval_minutes: u32) -> Self {
        Self {
            db_pool,
            slot_interval_minutes,
        }
    }
}

/// Assembles every route with the shared layers applied.
pub fn build_router(
    state: Arc<ApiState>,
    cors_origins: Option<&[String]>,
    request_timeout_seconds: u64,
) -> Router {
    let app = Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Establishment profile and onboarding
        .merge(routes::establishment::routes())
        // Categories and services
        .merge(routes::catalog::routes())
        // Employees and their unavailabilities
        .merge(routes::employee::routes())
        .merge(routes::customer::routes())
        .merge(routes::appointment::routes())
        .merge(routes::store_hours::routes())
        .merge(routes::package::routes())
        .merge(routes::loyalty::routes())
        .merge(routes::metrics::routes())
        // Unauthenticated booking flow
        .merge(routes::public::routes())
        .with_state(state);

    let app = match cors_origins {
        Some(origins) => app.layer(cors_layer(origins)),
        None => app,
    };

    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(request_timeout_seconds))),
    )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static(ESTABLISHMENT_HEADER),
        ])
        .allow_origin(allowed)
}

/// Starts the API server with the provided configuration and database connection
///
/// # Example
///
/// ```no_run
/// use salonbook_api::{config::ApiConfig, start_server};
///
/// # async fn example() -> eyre::Result<()> {
/// let config = ApiConfig::from_env()?;
/// let db_pool = salonbook_db::create_pool(&config.database_url).await?;
/// start_server(config, db_pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    // RUST_LOG wins over LOG_LEVEL when set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string().to_lowercase()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| eyre::eyre!(e))?;

    let state = Arc::new(ApiState::new(db_pool, config.slot_interval_minutes));
    let app = build_router(
        state,
        config.cors_origins.as_deref(),
        config.request_timeout,
    );

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
