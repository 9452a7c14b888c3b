use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::ServiceError;
use thiserror::Error;
use tracing::error;

/// Everything a resource route can fail with.
///
/// Nothing is recovered: every kind surfaces as a 500 with the message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("malformed request body: {0}")]
    MalformedBody(#[source] serde_json::Error),
    #[error("request body must be a JSON object")]
    NotAnObject,
    #[error(transparent)]
    Store(#[from] ServiceError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let msg = self.to_string();
        error!(error = %msg, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, Json(serde_json::json!({"error": msg}))).into_response()
    }
}
