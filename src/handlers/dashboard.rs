//! 控制台页面
//!
//! 每个页面返回 `{ title, page, data }` 形式的页面上下文，
//! 除登录接口外都需要已登录的会话。

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tower_sessions::Session;

use crate::{
    entities::ServerConfigModel,
    errors::{ApiError, ApiResult},
    extractors::{
        auth::tokens_match, DashboardSession, DashboardUser, GuildIdPath, ValidatedJson,
        WindowQuery,
    },
    schemas::{
        common::SuccessResponse,
        dashboard::{AnalyticsPage, DashboardPage, LoginRequest, ServerListPage, SettingsPage},
        servers::UpsertServerConfigRequest,
        stats::BotStatistics,
    },
    services::{ServerConfigService, StatsService},
    AppState,
};

pub async fn login(
    State(app_state): State<AppState>,
    session: Session,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<SuccessResponse>> {
    let Some(expected) = app_state.config.auth.dashboard_token.as_deref() else {
        tracing::warn!("DASHBOARD_TOKEN 未配置，拒绝控制台登录");
        return Err(ApiError::Unauthorized("控制台登录未启用".to_string()));
    };

    if !tokens_match(&request.token, expected) {
        tracing::warn!("控制台登录失败：令牌错误");
        return Err(ApiError::Unauthorized("令牌错误".to_string()));
    }

    DashboardSession::new(&session).login().await?;
    tracing::info!("控制台登录成功");

    Ok(Json(SuccessResponse::ok()))
}

pub async fn logout(session: Session) -> ApiResult<Json<SuccessResponse>> {
    DashboardSession::new(&session).logout().await?;
    Ok(Json(SuccessResponse::ok()))
}

pub async fn home(
    State(app_state): State<AppState>,
    _user: DashboardUser,
) -> ApiResult<Json<DashboardPage<BotStatistics>>> {
    let stats = StatsService::latest(&app_state.db).await?;
    Ok(Json(DashboardPage::new("Dashboard", stats)))
}

pub async fn servers(
    State(app_state): State<AppState>,
    _user: DashboardUser,
) -> ApiResult<Json<DashboardPage<ServerListPage>>> {
    let servers = ServerConfigService::list(&app_state.db).await?;
    Ok(Json(DashboardPage::new(
        "Servers",
        ServerListPage {
            total: servers.len(),
            servers,
        },
    )))
}

pub async fn server_detail(
    State(app_state): State<AppState>,
    Path(path): Path<GuildIdPath>,
    _user: DashboardUser,
) -> ApiResult<Json<DashboardPage<ServerConfigModel>>> {
    let guild_id = path.guild_id()?;
    let config = ServerConfigService::find(&app_state.db, guild_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("服务器配置不存在".to_string()))?;

    let title = config.guild_name.clone();
    Ok(Json(DashboardPage::new(&title, config)))
}

pub async fn update_server(
    State(app_state): State<AppState>,
    Path(path): Path<GuildIdPath>,
    _user: DashboardUser,
    ValidatedJson(fields): ValidatedJson<UpsertServerConfigRequest>,
) -> ApiResult<Json<DashboardPage<ServerConfigModel>>> {
    let guild_id = path.guild_id()?;
    let config = ServerConfigService::upsert(&app_state.db, guild_id, &fields).await?;

    let title = config.guild_name.clone();
    Ok(Json(DashboardPage::new(&title, config)))
}

pub async fn analytics(
    State(app_state): State<AppState>,
    Query(query): Query<WindowQuery>,
    _user: DashboardUser,
) -> ApiResult<Json<DashboardPage<AnalyticsPage>>> {
    let window_days = query.window_days()?;
    let snapshots = StatsService::list_window(&app_state.db, window_days).await?;
    let latest = StatsService::latest(&app_state.db).await?;

    Ok(Json(DashboardPage::new(
        "Analytics",
        AnalyticsPage {
            window_days,
            latest,
            snapshots,
        },
    )))
}

pub async fn settings(_user: DashboardUser) -> Json<DashboardPage<SettingsPage>> {
    Json(DashboardPage::new("Settings", SettingsPage::current()))
}
