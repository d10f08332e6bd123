#![allow(dead_code)]

use std::{collections::HashMap, net::SocketAddr, sync::Arc};

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, Database, DatabaseBackend, DbErr, MockDatabase, Set,
};
use ultrabot_web::{
    config::{Config, Environment},
    create_app,
    entities::{bot_stats, BotStatsModel},
    services::database::{initialize_database, DatabaseConnection},
    AppState,
};

pub const BOT_TOKEN: &str = "test-bot-token";
pub const DASHBOARD_TOKEN: &str = "test-dashboard-token";

pub fn test_config(environment: Environment) -> Config {
    let mut vars = HashMap::new();
    vars.insert("DATABASE_URL", "sqlite::memory:".to_string());
    vars.insert("APP_ENV", environment.as_str().to_string());
    vars.insert("SESSION_SECRET", "integration-test-session-secret".to_string());
    vars.insert("BOT_API_TOKEN", BOT_TOKEN.to_string());
    vars.insert("DASHBOARD_TOKEN", DASHBOARD_TOKEN.to_string());

    Config::from_lookup(|key| vars.get(key).cloned()).expect("test config")
}

/// 已建表的内存 SQLite 数据库（包含一条默认的全零统计）
pub async fn sqlite_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("connect sqlite");
    initialize_database(&db).await.expect("initialize schema");
    Arc::new(db)
}

/// 已建表但统计表为空的数据库
pub async fn empty_sqlite_db() -> DatabaseConnection {
    use sea_orm::EntityTrait;

    let db = sqlite_db().await;
    ultrabot_web::entities::BotStatsEntity::delete_many()
        .exec(db.as_ref())
        .await
        .expect("clear bot_stats");
    db
}

/// 每次查询都失败的数据库，模拟连接中断
pub fn failing_db() -> DatabaseConnection {
    let errors = (0..8).map(|_| DbErr::Custom("connection refused (os error 111)".to_string()));
    Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors(errors)
            .append_exec_errors(
                (0..8).map(|_| DbErr::Custom("connection refused (os error 111)".to_string())),
            )
            .into_connection(),
    )
}

/// 删除数据表，让依赖它的查询失败，会话表保持可用
pub async fn drop_table(db: &DatabaseConnection, table: &str) {
    db.execute_unprepared(&format!("DROP TABLE {table}"))
        .await
        .expect("drop table");
}

pub async fn insert_snapshot(
    db: &DatabaseConnection,
    guild_count: i64,
    updated_at: DateTime<Utc>,
) -> BotStatsModel {
    bot_stats::ActiveModel {
        guild_count: Set(guild_count),
        user_count: Set(guild_count * 100),
        message_count: Set(0),
        command_count: Set(0),
        uptime: Set(0),
        updated_at: Set(updated_at),
        ..Default::default()
    }
    .insert(db.as_ref())
    .await
    .expect("insert snapshot")
}

/// 在随机端口上运行完整路由，供 reqwest 调用
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
}

impl TestServer {
    pub async fn start(db: DatabaseConnection, environment: Environment) -> Self {
        let state = AppState::from_parts(db, test_config(environment));
        let app = create_app(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("local addr");

        tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .expect("test server");
        });

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .expect("reqwest client");

        Self { addr, client }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request")
    }

    pub async fn post_json(
        &self,
        path: &str,
        token: Option<&str>,
        body: &serde_json::Value,
    ) -> reqwest::Response {
        let mut request = self.client.post(self.url(path)).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("POST request")
    }

    pub async fn login_dashboard(&self) -> reqwest::Response {
        self.post_json(
            "/dashboard/login",
            None,
            &serde_json::json!({ "token": DASHBOARD_TOKEN }),
        )
        .await
    }
}
