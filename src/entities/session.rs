//! 会话表，由 `SeaOrmSessionStore` 读写
//!
//! | 列     | 说明                         |
//! |--------|------------------------------|
//! | sid    | 会话 ID（主键）              |
//! | sess   | JSON 序列化后的会话记录      |
//! | expire | 过期时间，过期后不再加载     |

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "session")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub sid: String,
    #[sea_orm(column_type = "Text")]
    pub sess: String,
    #[sea_orm(indexed)]
    pub expire: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
