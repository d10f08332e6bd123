use axum::{extract::State, Json};

use crate::{
    errors::{ApiErrorResponse, ApiResult},
    extractors::{BotAuth, ValidatedJson},
    schemas::{
        common::SuccessResponse,
        stats::{BotStatistics, RecordStatsRequest},
    },
    services::StatsService,
    AppState,
};

/// 获取最新统计快照
#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "最新统计快照，无记录时各项为 0", body = BotStatistics),
        (status = 500, description = "数据库错误", body = ApiErrorResponse,
         example = json!({"error": "Database error", "status": 500}))
    ),
    tag = "stats"
)]
pub async fn get_latest_stats(State(app_state): State<AppState>) -> ApiResult<Json<BotStatistics>> {
    let stats = StatsService::latest(&app_state.db).await?;
    Ok(Json(stats))
}

/// 机器人进程上报统计快照
#[utoipa::path(
    post,
    path = "/api/stats",
    request_body = RecordStatsRequest,
    responses(
        (status = 200, description = "记录成功", body = SuccessResponse),
        (status = 400, description = "请求体格式错误或字段为负数", body = ApiErrorResponse),
        (status = 401, description = "缺少令牌", body = ApiErrorResponse),
        (status = 403, description = "令牌无效", body = ApiErrorResponse),
        (status = 500, description = "数据库错误", body = ApiErrorResponse)
    ),
    tag = "stats",
    security(("bearer_auth" = []))
)]
pub async fn record_stats(
    State(app_state): State<AppState>,
    _auth: BotAuth,
    ValidatedJson(snapshot): ValidatedJson<RecordStatsRequest>,
) -> ApiResult<Json<SuccessResponse>> {
    StatsService::record(&app_state.db, &snapshot).await?;
    Ok(Json(SuccessResponse::ok()))
}
