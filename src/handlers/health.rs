use axum::Json;

use crate::{errors::ApiError, schemas::common::HealthResponse};

/// 健康检查，不访问数据库
#[utoipa::path(
    get,
    path = "/api/health",
    responses((status = 200, description = "服务运行中", body = HealthResponse)),
    tag = "health"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// 未匹配任何路由
pub async fn not_found() -> ApiError {
    ApiError::NotFound("找不到！什么都没有，一片空气".to_string())
}
