//! HTTP error handling for the API layer.
//!
//! Every failure leaves the server as `{"error": "<message>"}` with a status
//! code reflecting the failure kind: 404 for missing maps/nodes/links, 400
//! for conflicts, limits, and invalid payloads, 500 for store failures.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use sysmap_core::MapServiceError;

/// API error response carrying its status code.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<MapServiceError> for ApiError {
    fn from(err: MapServiceError) -> Self {
        let status = match &err {
            MapServiceError::MapNotFound { .. }
            | MapServiceError::NodeNotFound { .. }
            | MapServiceError::LinkNotFound { .. } => StatusCode::NOT_FOUND,
            MapServiceError::DuplicateNode { .. }
            | MapServiceError::NodeLimitExceeded { .. }
            | MapServiceError::MapLimitExceeded { .. }
            | MapServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            MapServiceError::Store(source) => {
                tracing::error!("Store failure: {source}");
                return Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
            }
        };

        Self::new(status, err.to_string())
    }
}
