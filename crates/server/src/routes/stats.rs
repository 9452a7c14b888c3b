use axum::Json;
use service::stats::{self, AdminStats, ManagerStats};

#[utoipa::path(get, path = "/api/admin/stats", tag = "stats", responses((status = 200, description = "Admin dashboard figures", body = AdminStats)))]
pub async fn admin_stats() -> Json<AdminStats> {
    Json(stats::admin_stats())
}

#[utoipa::path(get, path = "/api/manager/stats", tag = "stats", responses((status = 200, description = "Manager dashboard figures", body = ManagerStats)))]
pub async fn manager_stats() -> Json<ManagerStats> {
    Json(stats::manager_stats())
}
