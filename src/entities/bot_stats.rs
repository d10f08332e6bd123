use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 机器人统计快照，只追加不修改
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "bot_stats")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(default_value = 0)]
    pub guild_count: i64,
    #[sea_orm(default_value = 0)]
    pub user_count: i64,
    #[sea_orm(default_value = 0)]
    pub message_count: i64,
    #[sea_orm(default_value = 0)]
    pub command_count: i64,
    /// 运行时长（秒）
    #[sea_orm(default_value = 0)]
    pub uptime: i64,
    #[sea_orm(indexed)]
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
