use utoipa::OpenApi;
use utoipa::ToSchema;

use service::stats::{AdminStats, ManagerStats, RevenuePoint, WeeklyPoint};

#[derive(ToSchema)]
pub struct HealthResponse {
    pub ok: bool,
    pub message: String,
    pub timestamp: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health,
        crate::routes::stats::admin_stats,
        crate::routes::stats::manager_stats,
        crate::routes::resources::list_records,
        crate::routes::resources::create_record,
    ),
    components(
        schemas(
            HealthResponse,
            AdminStats,
            ManagerStats,
            RevenuePoint,
            WeeklyPoint,
        )
    ),
    tags(
        (name = "health"),
        (name = "stats"),
        (name = "resources")
    )
)]
pub struct ApiDoc;
