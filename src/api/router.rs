use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::service::SearchService;

use super::handlers::*;

/// Application state shared across all handlers
pub struct AppState {
    pub service: SearchService,
}

/// Create the HTTP router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let state = Arc::new(state);

    Router::new()
        // Search
        .route("/v1/search", post(search))
        // Panel configuration
        .route("/v1/configs/:config_id", get(panel))
        .route(
            "/v1/configs/:config_id/fields/:field_id/choices",
            get(field_choices),
        )
        // Health
        .route("/health", get(health_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
