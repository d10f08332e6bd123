use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    entities::ServerConfigModel,
    errors::{ApiErrorResponse, ApiResult},
    extractors::{BotAuth, GuildIdPath, ValidatedJson},
    schemas::{common::SuccessResponse, servers::UpsertServerConfigRequest},
    services::ServerConfigService,
    AppState,
};

/// 获取全部服务器配置
#[utoipa::path(
    get,
    path = "/api/servers",
    responses(
        (status = 200, description = "按服务器名称升序排列", body = [ServerConfigModel]),
        (status = 500, description = "数据库错误", body = ApiErrorResponse)
    ),
    tag = "servers"
)]
pub async fn list_servers(
    State(app_state): State<AppState>,
) -> ApiResult<Json<Vec<ServerConfigModel>>> {
    let configs = ServerConfigService::list(&app_state.db).await?;
    Ok(Json(configs))
}

/// 写入服务器配置（不存在则创建，存在则覆盖）
#[utoipa::path(
    post,
    path = "/api/servers/{guild_id}",
    request_body = UpsertServerConfigRequest,
    responses(
        (status = 200, description = "写入成功", body = SuccessResponse),
        (status = 400, description = "guild_id 或请求体无效", body = ApiErrorResponse,
         example = json!({"error": "无效的 guild_id: abc", "status": 400})),
        (status = 401, description = "缺少令牌", body = ApiErrorResponse),
        (status = 403, description = "令牌无效", body = ApiErrorResponse),
        (status = 500, description = "数据库错误", body = ApiErrorResponse)
    ),
    params(("guild_id" = String, Path, description = "Discord 服务器 ID")),
    tag = "servers",
    security(("bearer_auth" = []))
)]
pub async fn upsert_server(
    State(app_state): State<AppState>,
    Path(path): Path<GuildIdPath>,
    _auth: BotAuth,
    ValidatedJson(fields): ValidatedJson<UpsertServerConfigRequest>,
) -> ApiResult<Json<SuccessResponse>> {
    let guild_id = path.guild_id()?;
    ServerConfigService::upsert(&app_state.db, guild_id, &fields).await?;
    Ok(Json(SuccessResponse::ok()))
}
