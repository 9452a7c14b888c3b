use axum::{http::StatusCode, routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use service::Resource;

use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod health;
pub mod metrics;
pub mod resources;
pub mod stats;

async fn api_not_found() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::NOT_FOUND, Json(serde_json::json!({"error": "not found"})))
}

/// Routes under `/api`: health, dashboard stats and one gateway per resource.
pub fn api_router() -> Router<AppState> {
    let mut api = Router::new()
        .route("/health", get(health::health))
        .route("/admin/stats", get(stats::admin_stats))
        .route("/manager/stats", get(stats::manager_stats));
    for resource in Resource::ALL {
        api = api.merge(resources::resource_routes(resource));
    }
    api.fallback(api_not_found)
}

/// Build the full application router: API, metrics, docs and static pages
pub fn build_router(state: AppState, cors: CorsLayer, frontend_dir: &str) -> Router {
    let static_dir = ServeDir::new(frontend_dir)
        .fallback(ServeFile::new(format!("{frontend_dir}/index.html")));

    Router::new()
        .nest("/api", api_router())
        .route("/metrics", get(metrics::metrics))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback_service(static_dir)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx responses
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
