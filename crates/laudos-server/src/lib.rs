//! laudos-server
//!
//! HTTP surface for the report editor: report generation, block
//! structuring and the section/enhancement assistants.

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use state::AppState;

/// Build the router with all routes and layers applied.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api/generate-report", post(routes::reports::generate_report))
        .route("/api/structure", post(routes::reports::structure_blocks))
        .route(
            "/api/classify-section",
            post(routes::assist::classify_section),
        )
        .route("/api/enhance-text", post(routes::assist::enhance_text))
        .layer(
            ServiceBuilder::new()
                .layer(cors)
                .layer(axum_mw::from_fn(middleware::request_log::request_log)),
        )
        .with_state(state)
}
