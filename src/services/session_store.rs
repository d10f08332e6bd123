//! 基于 sea-orm 的 tower-sessions 会话存储
//!
//! 会话记录以 JSON 形式写入 `session` 表。读取时忽略已过期的行，
//! 过期行由 [`SeaOrmSessionStore::continuously_delete_expired`] 定期清理。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{sea_query::OnConflict, ColumnTrait, EntityTrait, QueryFilter, Set, SqlErr};
use time::OffsetDateTime;
use tower_sessions::{
    session::{Id, Record},
    session_store, SessionStore,
};

use crate::{
    entities::{session, SessionColumn, SessionEntity},
    services::database::DatabaseConnection,
};

#[derive(Debug, Clone)]
pub struct SeaOrmSessionStore {
    db: DatabaseConnection,
}

impl SeaOrmSessionStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// 删除所有已过期的会话，返回删除的行数
    pub async fn delete_expired(&self) -> session_store::Result<u64> {
        let result = SessionEntity::delete_many()
            .filter(SessionColumn::Expire.lt(Utc::now()))
            .exec(self.db.as_ref())
            .await
            .map_err(backend_error)?;
        Ok(result.rows_affected)
    }

    /// 按固定周期清理过期会话，清理失败只记录日志
    pub async fn continuously_delete_expired(self, period: std::time::Duration) {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            match self.delete_expired().await {
                Ok(0) => {}
                Ok(count) => tracing::debug!("已清理过期会话 {} 条", count),
                Err(e) => tracing::warn!("⚠️  过期会话清理失败: {}", e),
            }
        }
    }
}

#[async_trait]
impl SessionStore for SeaOrmSessionStore {
    /// 插入新行，ID 冲突时换一个 ID 重试，不覆盖已有会话
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        loop {
            let result = SessionEntity::insert(to_active_model(record)?)
                .exec_without_returning(self.db.as_ref())
                .await;

            match result {
                Ok(_) => return Ok(()),
                Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                    tracing::debug!("会话 ID 冲突，重新生成");
                    record.id = Id::default();
                }
                Err(e) => return Err(backend_error(e)),
            }
        }
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        SessionEntity::insert(to_active_model(record)?)
            .on_conflict(
                OnConflict::column(SessionColumn::Sid)
                    .update_columns([SessionColumn::Sess, SessionColumn::Expire])
                    .to_owned(),
            )
            .exec_without_returning(self.db.as_ref())
            .await
            .map_err(backend_error)?;

        Ok(())
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        let row = SessionEntity::find_by_id(session_id.to_string())
            .filter(SessionColumn::Expire.gt(Utc::now()))
            .one(self.db.as_ref())
            .await
            .map_err(backend_error)?;

        row.map(|row| {
            serde_json::from_str::<Record>(&row.sess)
                .map_err(|e| session_store::Error::Decode(e.to_string()))
        })
        .transpose()
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        SessionEntity::delete_by_id(session_id.to_string())
            .exec(self.db.as_ref())
            .await
            .map_err(backend_error)?;
        Ok(())
    }
}

fn to_active_model(record: &Record) -> session_store::Result<session::ActiveModel> {
    let sess =
        serde_json::to_string(record).map_err(|e| session_store::Error::Encode(e.to_string()))?;

    Ok(session::ActiveModel {
        sid: Set(record.id.to_string()),
        sess: Set(sess),
        expire: Set(to_utc(record.expiry_date)?),
    })
}

fn backend_error(err: sea_orm::DbErr) -> session_store::Error {
    session_store::Error::Backend(err.to_string())
}

fn to_utc(at: OffsetDateTime) -> session_store::Result<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(at.unix_timestamp(), at.nanosecond())
        .ok_or_else(|| session_store::Error::Encode(format!("会话过期时间超出范围: {at}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::database::initialize_database;
    use sea_orm::{Database, PaginatorTrait};
    use std::{collections::HashMap, sync::Arc};

    async fn store() -> SeaOrmSessionStore {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        initialize_database(&db).await.unwrap();
        SeaOrmSessionStore::new(Arc::new(db))
    }

    fn record(expires_in: time::Duration) -> Record {
        let mut data = HashMap::new();
        data.insert("dashboard:authenticated".to_string(), serde_json::json!(true));
        Record {
            id: Id::default(),
            data,
            expiry_date: OffsetDateTime::now_utc() + expires_in,
        }
    }

    #[tokio::test]
    async fn saves_and_loads_session() {
        let store = store().await;
        let mut rec = record(time::Duration::hours(1));

        store.create(&mut rec).await.unwrap();
        let loaded = store.load(&rec.id).await.unwrap().unwrap();

        assert_eq!(loaded.id, rec.id);
        assert_eq!(
            loaded.data.get("dashboard:authenticated"),
            Some(&serde_json::json!(true))
        );
    }

    #[tokio::test]
    async fn save_overwrites_existing_row() {
        let store = store().await;
        let mut rec = record(time::Duration::hours(1));
        store.create(&mut rec).await.unwrap();

        rec.data.insert("theme".to_string(), serde_json::json!("dark"));
        store.save(&rec).await.unwrap();

        let loaded = store.load(&rec.id).await.unwrap().unwrap();
        assert_eq!(loaded.data.get("theme"), Some(&serde_json::json!("dark")));
        assert_eq!(SessionEntity::find().count(store.db.as_ref()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn expired_sessions_are_not_loaded_and_get_swept() {
        let store = store().await;
        let mut expired = record(time::Duration::hours(-1));
        let mut live = record(time::Duration::hours(1));
        store.create(&mut expired).await.unwrap();
        store.create(&mut live).await.unwrap();

        assert!(store.load(&expired.id).await.unwrap().is_none());

        assert_eq!(store.delete_expired().await.unwrap(), 1);
        assert!(store.load(&live.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn create_does_not_overwrite_existing_id() {
        let store = store().await;
        let mut first = record(time::Duration::hours(1));
        store.create(&mut first).await.unwrap();

        let mut second = record(time::Duration::hours(1));
        second.id = first.id;
        second.data.insert("theme".to_string(), serde_json::json!("dark"));
        store.create(&mut second).await.unwrap();

        assert_ne!(second.id, first.id);
        let kept = store.load(&first.id).await.unwrap().unwrap();
        assert!(kept.data.get("theme").is_none());
        let created = store.load(&second.id).await.unwrap().unwrap();
        assert_eq!(created.data.get("theme"), Some(&serde_json::json!("dark")));
        assert_eq!(SessionEntity::find().count(store.db.as_ref()).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn deletes_session() {
        let store = store().await;
        let mut rec = record(time::Duration::hours(1));
        store.create(&mut rec).await.unwrap();

        store.delete(&rec.id).await.unwrap();
        assert!(store.load(&rec.id).await.unwrap().is_none());
    }
}
