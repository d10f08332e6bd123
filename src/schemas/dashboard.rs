use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::ServerConfigModel;
use crate::schemas::stats::BotStatistics;

/// 控制台页面上下文：页面标题、导航标识与页面数据
#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardPage<T> {
    pub title: String,
    pub page: String,
    pub data: T,
}

impl<T> DashboardPage<T> {
    pub fn new(title: &str, data: T) -> Self {
        Self {
            title: format!("{title} - UltraBot"),
            page: "dashboard".to_string(),
            data,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "token 不能为空"))]
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ServerListPage {
    pub total: usize,
    pub servers: Vec<ServerConfigModel>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyticsPage {
    pub window_days: u32,
    /// 当前统计，不受统计窗口限制
    pub latest: BotStatistics,
    /// 窗口内的快照，按时间升序
    pub snapshots: Vec<BotStatistics>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SettingsPage {
    pub bot_name: String,
    pub status: String,
    pub prefix: String,
    pub modules: Vec<ModuleStatus>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ModuleStatus {
    pub name: String,
    pub enabled: bool,
    pub status: String,
}

impl SettingsPage {
    pub fn current() -> Self {
        let modules = [
            ("AI Intelligence", "limited"),
            ("Advanced Moderation", "active"),
            ("Gaming Suite", "active"),
            ("Content Creation", "active"),
            ("Community Revival", "active"),
            ("Developer Tools", "active"),
        ]
        .into_iter()
        .map(|(name, status)| ModuleStatus {
            name: name.to_string(),
            enabled: true,
            status: status.to_string(),
        })
        .collect();

        Self {
            bot_name: "UltraBot".to_string(),
            status: "online".to_string(),
            prefix: crate::entities::server_config::DEFAULT_PREFIX.to_string(),
            modules,
        }
    }
}
