use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_PREFIX: &str = "/";

/// 单个 Discord 服务器（guild）的机器人配置
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "server_configs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[schema(example = 123456789012345678_i64)]
    pub guild_id: i64,
    #[schema(example = "Gaming Hub")]
    pub guild_name: String,
    #[sea_orm(default_value = "/")]
    #[schema(example = "/")]
    pub prefix: String,
    pub welcome_channel: Option<i64>,
    pub log_channel: Option<i64>,
    pub auto_role: Option<i64>,
    /// 任意键值配置，不做结构校验
    #[sea_orm(column_type = "JsonBinary")]
    #[schema(value_type = Object)]
    pub settings: Json,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
