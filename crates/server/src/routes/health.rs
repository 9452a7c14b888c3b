use axum::Json;
use common::types::Health;

#[utoipa::path(get, path = "/api/health", tag = "health", responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::now("Property management API is running"))
}
