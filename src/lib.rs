pub mod config;
pub mod entities;
pub mod errors;
pub mod extractors;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod schemas;
pub mod services;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use sha2::{Digest, Sha512};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_sessions::{
    cookie::{Key, SameSite},
    Expiry, SessionManagerLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::handlers::{analytics, dashboard, health, servers, stats};
use crate::middleware::{error_detail_middleware, http_logging_middleware};
use crate::services::database::{establish_connection, initialize_database, DatabaseConnection};
use crate::services::SeaOrmSessionStore;

pub const SESSION_COOKIE_NAME: &str = "ultrabot.sid";

/// 所有请求共享的状态：数据库连接池与配置
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<Config>,
}

impl AppState {
    /// 读取环境变量、连接数据库并初始化表结构
    pub async fn new() -> anyhow::Result<Self> {
        let config = Config::from_env()?;
        logging::log_startup_info(&config);

        let db = establish_connection(&config.database).await?;
        initialize_database(db.as_ref()).await?;

        Ok(Self::from_parts(db, config))
    }

    pub fn from_parts(db: DatabaseConnection, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    pub fn session_store(&self) -> SeaOrmSessionStore {
        SeaOrmSessionStore::new(self.db.clone())
    }
}

/// OpenAPI安全配置插件
pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert(Default::default());
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some("机器人进程使用的 BOT_API_TOKEN"))
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        stats::get_latest_stats,
        stats::record_stats,
        servers::list_servers,
        servers::upsert_server,
        analytics::list_analytics,
        analytics::command_analytics,
        health::health_check
    ),
    components(
        schemas(
            schemas::stats::BotStatistics,
            schemas::stats::RecordStatsRequest,
            schemas::stats::CommandAnalytics,
            schemas::stats::CommandUsage,
            schemas::servers::UpsertServerConfigRequest,
            schemas::common::SuccessResponse,
            schemas::common::HealthResponse,
            entities::ServerConfigModel,
            crate::errors::ApiErrorResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "stats", description = "机器人统计快照"),
        (name = "servers", description = "服务器配置"),
        (name = "analytics", description = "统计分析"),
        (name = "health", description = "健康检查")
    )
)]
pub struct ApiDoc;

/// 由会话密钥派生 64 字节的 cookie 签名密钥
fn session_key(secret: &str) -> Key {
    Key::from(&Sha512::digest(secret.as_bytes())[..])
}

pub fn create_app(state: AppState) -> Router {
    let config = state.config.clone();

    let session_layer = SessionManagerLayer::new(state.session_store())
        .with_name(SESSION_COOKIE_NAME)
        .with_secure(!config.environment.is_development())
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::days(
            config.session.max_age_days,
        )))
        .with_signed(session_key(&config.session.secret));

    Router::new()
        // JSON API
        .route(
            "/api/stats",
            get(stats::get_latest_stats).post(stats::record_stats),
        )
        .route("/api/servers", get(servers::list_servers))
        .route("/api/servers/{guild_id}", post(servers::upsert_server))
        .route("/api/analytics", get(analytics::list_analytics))
        .route("/api/analytics/commands", get(analytics::command_analytics))
        .route("/api/health", get(health::health_check))
        // Dashboard
        .route("/dashboard", get(dashboard::home))
        .route("/dashboard/login", post(dashboard::login))
        .route("/dashboard/logout", post(dashboard::logout))
        .route("/dashboard/servers", get(dashboard::servers))
        .route(
            "/dashboard/servers/{guild_id}",
            get(dashboard::server_detail).post(dashboard::update_server),
        )
        .route("/dashboard/analytics", get(dashboard::analytics))
        .route("/dashboard/settings", get(dashboard::settings))
        // Swagger UI
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .fallback(health::not_found)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                // Add HTTP logging middleware
                .layer(axum_middleware::from_fn(http_logging_middleware))
                .layer(axum_middleware::from_fn_with_state(
                    config.environment,
                    error_detail_middleware,
                ))
                .layer(session_layer),
        )
}
