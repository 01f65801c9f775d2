//! HTTP server module

mod api;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;

use crate::AppState;

pub use api::{ApiError, HealthResponse, ModelListResponse, ValidationErrorBody};

/// Create the HTTP router with all routes configured
pub fn create_router(state: Arc<AppState>) -> Router {
    let index = ServeFile::new(state.static_dir.join("index.html"));

    Router::new()
        .route_service("/", index)
        .route("/api/models", get(api::list_models))
        .route("/api/invoke", post(api::invoke))
        .route("/api/health", get(api::health))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
