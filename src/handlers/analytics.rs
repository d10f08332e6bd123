use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    errors::{ApiErrorResponse, ApiResult},
    extractors::WindowQuery,
    schemas::stats::{BotStatistics, CommandAnalytics},
    services::StatsService,
    AppState,
};

/// 获取统计窗口内的全部快照
#[utoipa::path(
    get,
    path = "/api/analytics",
    params(WindowQuery),
    responses(
        (status = 200, description = "按时间升序排列的快照", body = [BotStatistics]),
        (status = 400, description = "days 不是 1~365 之间的整数", body = ApiErrorResponse,
         example = json!({"error": "days 必须是 1~365 之间的整数", "status": 400})),
        (status = 500, description = "数据库错误", body = ApiErrorResponse)
    ),
    tag = "analytics"
)]
pub async fn list_analytics(
    State(app_state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> ApiResult<Json<Vec<BotStatistics>>> {
    let days = query.window_days()?;
    let snapshots = StatsService::list_window(&app_state.db, days).await?;
    Ok(Json(snapshots))
}

/// 指令使用分析
///
/// 机器人尚未上报指令明细，暂时返回空数据
#[utoipa::path(
    get,
    path = "/api/analytics/commands",
    responses((status = 200, description = "指令使用分析", body = CommandAnalytics)),
    tag = "analytics"
)]
pub async fn command_analytics() -> Json<CommandAnalytics> {
    Json(CommandAnalytics::placeholder())
}
