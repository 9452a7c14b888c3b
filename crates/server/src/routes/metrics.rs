use axum::http::StatusCode;
use service::observability::encode_metrics;

pub async fn metrics() -> (StatusCode, String) {
    match encode_metrics() {
        Ok(body) => (StatusCode::OK, body),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e),
    }
}
