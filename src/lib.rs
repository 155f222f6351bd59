//! Tour request estimation service.
//!
//! The [`estimator`] module holds the only business logic: budget, travel
//! time and itinerary bounds for a custom tour request. Everything else
//! wires it to HTTP, Postgres and a small cache.

pub mod cache;
pub mod config;
pub mod error;
pub mod estimator;
pub mod tour_requests;

use axum::{extract::State, http::HeaderValue, routing::get, Json, Router};
use serde::Serialize;
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::warn;

use crate::cache::{AppCache, CacheStats};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub cache: AppCache,
}

/// Response for the health endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub cache: CacheStats,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        cache: state.cache.stats(),
    })
}

/// Build the application router with permissive CORS
pub fn build_router(state: AppState) -> Router {
    build_router_with_cors(state, None)
}

/// Build the application router. `cors_origin` restricts browser access to a
/// single origin; `None` allows any.
pub fn build_router_with_cors(state: AppState, cors_origin: Option<&str>) -> Router {
    let cors = match cors_origin.map(HeaderValue::from_str) {
        Some(Ok(origin)) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any),
        Some(Err(e)) => {
            warn!("Invalid CORS origin, cross-origin requests disabled: {}", e);
            CorsLayer::new()
        }
        None => CorsLayer::permissive(),
    };

    Router::new()
        .route("/health", get(health))
        .merge(tour_requests::router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        )
        .with_state(state)
}
