//! REST API handlers

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use bedrox_core::catalog::{ModelDescriptor, MODELS};
use bedrox_core::error::VALIDATION_MESSAGE;
use bedrox_core::types::{InvocationRequest, InvocationResult};
use bedrox_core::InvokeError;

use crate::AppState;

/// Response for `GET /api/models`
#[derive(Debug, Serialize)]
pub struct ModelListResponse {
    pub models: &'static [ModelDescriptor],
}

/// Body of a 400 response
#[derive(Debug, Serialize, Deserialize)]
pub struct ValidationErrorBody {
    pub error: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Status of the server
    pub status: String,
    /// Server version
    pub version: String,
    /// Whether the Bedrock credential currently resolves
    pub credential_configured: bool,
}

/// An `InvokeError` rendered as an HTTP response.
///
/// Validation failures are `400 {error}`; everything else is
/// `500 {success: false, error}`.
#[derive(Debug)]
pub struct ApiError(pub InvokeError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            InvokeError::Validation => (
                StatusCode::BAD_REQUEST,
                Json(ValidationErrorBody {
                    error: VALIDATION_MESSAGE.to_string(),
                }),
            )
                .into_response(),
            err => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(InvocationResult::from(&err)),
            )
                .into_response(),
        }
    }
}

/// GET /api/models - List the model catalog
pub async fn list_models() -> Json<ModelListResponse> {
    Json(ModelListResponse { models: MODELS })
}

/// POST /api/invoke - Forward a prompt to the selected model
///
/// A body that parses but lacks `model_id` or `prompt` is a 400; a body that
/// cannot be decoded at all is a server error.
pub async fn invoke(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<InvocationRequest>, JsonRejection>,
) -> Result<Json<InvocationResult>, ApiError> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            error!(error = ?rejection, "Failed to decode invoke body");
            return Err(ApiError(InvokeError::Unexpected(rejection.body_text())));
        }
    };

    let model_id = request.model_id.unwrap_or_default();
    let prompt = request.prompt.unwrap_or_default();

    let output = state
        .gateway
        .try_invoke(&model_id, &prompt)
        .await
        .map_err(ApiError)?;

    Ok(Json(output.into()))
}

/// GET /api/health - Liveness probe; never calls Bedrock
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        credential_configured: state.gateway.credential_available(),
    })
}
