//! Inventory API: suppliers, their products, and supplier notifications by mail.

pub mod config;
pub mod database;
pub mod dtos;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod mail;
pub mod models;
pub mod routes;
pub mod state;

use axum::{routing::get, Router};
use http::HeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::root::{health_check, index};
use crate::state::AppState;

/// Assembles the full router: resources, root/health, CORS and request tracing.
pub fn build_app(state: AppState, cors_origins: Vec<HeaderValue>) -> Router {
    // Credentials rule out wildcards, so methods and headers mirror the request.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(cors_origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    routes::create_router()
        .route("/", get(index))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
