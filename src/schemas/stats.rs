use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::entities::BotStatsModel;

/// 机器人统计快照
///
/// 统计表为空时返回全零记录，此时 `updated_at` 为 null
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BotStatistics {
    #[schema(example = 42)]
    pub guild_count: i64,
    #[schema(example = 18750)]
    pub user_count: i64,
    #[schema(example = 250000)]
    pub message_count: i64,
    #[schema(example = 15420)]
    pub command_count: i64,
    /// 运行时长（秒）
    #[schema(example = 86400)]
    pub uptime: i64,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<BotStatsModel> for BotStatistics {
    fn from(model: BotStatsModel) -> Self {
        Self {
            guild_count: model.guild_count,
            user_count: model.user_count,
            message_count: model.message_count,
            command_count: model.command_count,
            uptime: model.uptime,
            updated_at: Some(model.updated_at),
        }
    }
}

/// 机器人进程上报的统计数据，缺省字段按 0 处理
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct RecordStatsRequest {
    #[serde(default)]
    #[validate(range(min = 0, message = "guild_count 不能为负数"))]
    pub guild_count: i64,
    #[serde(default)]
    #[validate(range(min = 0, message = "user_count 不能为负数"))]
    pub user_count: i64,
    #[serde(default)]
    #[validate(range(min = 0, message = "message_count 不能为负数"))]
    pub message_count: i64,
    #[serde(default)]
    #[validate(range(min = 0, message = "command_count 不能为负数"))]
    pub command_count: i64,
    #[serde(default)]
    #[validate(range(min = 0, message = "uptime 不能为负数"))]
    pub uptime: i64,
}

/// 指令使用分析（占位数据）
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CommandAnalytics {
    pub total: i64,
    pub top_commands: Vec<CommandUsage>,
    pub recent_activity: Vec<CommandUsage>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CommandUsage {
    #[schema(example = "/ai_chat")]
    pub name: String,
    #[schema(example = 1340)]
    pub count: i64,
}

impl CommandAnalytics {
    pub fn placeholder() -> Self {
        Self {
            total: 0,
            top_commands: Vec::new(),
            recent_activity: Vec::new(),
        }
    }
}
