use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::error::SiftError;
use crate::service::SearchRequest;

use super::router::AppState;
use super::types::*;

/// Error wrapper for API handlers
pub enum ApiError {
    Sift(SiftError),
}

impl From<SiftError> for ApiError {
    fn from(e: SiftError) -> Self {
        ApiError::Sift(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let ApiError::Sift(e) = self;
        let (status, message) = if e.is_not_found() {
            (StatusCode::NOT_FOUND, e.to_string())
        } else if e.is_invalid_input() {
            (StatusCode::BAD_REQUEST, e.to_string())
        } else {
            // Never leak internal structure beyond a short generic string
            tracing::error!(error = %e, "internal error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

/// Execute a configured search
pub async fn search(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchRequestApi>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = state.service.search(&SearchRequest {
        config_id: req.config_id,
        content_type_id: req.content_type_id,
        search_data: req.search_data,
        limit: req.limit,
        order_by: req.order_by,
    })?;

    Ok(Json(SearchResponse {
        success: true,
        results: outcome.results,
        total: outcome.total,
        has_more: outcome.has_more,
        show_count: outcome.show_count,
        search_id: outcome.search_id,
    }))
}

/// Get a panel configuration with its visible fields
pub async fn panel(
    State(state): State<Arc<AppState>>,
    Path(config_id): Path<u64>,
) -> Result<impl IntoResponse, ApiError> {
    let view = state.service.panel(config_id)?;
    Ok(Json(PanelResponse {
        success: true,
        config: view.config,
        fields: view.fields,
    }))
}

/// Resolve the choice list for one field
pub async fn field_choices(
    State(state): State<Arc<AppState>>,
    Path((config_id, field_id)): Path<(u64, u64)>,
) -> Result<impl IntoResponse, ApiError> {
    let resolved = state.service.field_choices(config_id, field_id)?;
    Ok(Json(ChoicesResponse {
        success: true,
        choices: resolved
            .choices
            .into_iter()
            .map(|c| ChoiceItem {
                value: c.value,
                label: c.label,
            })
            .collect(),
        field_type: resolved.field_type.to_string(),
    }))
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: crate::VERSION.to_string(),
    })
}
