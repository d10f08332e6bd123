use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ConnectOptions, ConnectionTrait, Database,
    DatabaseConnection as SeaOrmDatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    Schema, Set,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::entities::{bot_stats, BotStatsEntity, ServerConfigEntity, SessionEntity};

pub type DatabaseConnection = Arc<SeaOrmDatabaseConnection>;

pub async fn establish_connection(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(&config.url);

    opt.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(config.connect_timeout))
        .acquire_timeout(Duration::from_secs(config.acquire_timeout))
        .idle_timeout(Duration::from_secs(config.idle_timeout))
        .max_lifetime(Duration::from_secs(28800))
        .sqlx_logging(false);

    info!(
        "配置数据库连接池: 最小连接数={}, 最大连接数={}",
        config.min_connections, config.max_connections
    );

    let db = Database::connect(opt).await?;
    let connection = Arc::new(db);

    if let Err(e) = warm_up_connection_pool(&connection).await {
        tracing::warn!("⚠️  连接池预热失败: {}", e);
    } else {
        info!("数据库连接池预热成功");
    }

    Ok(connection)
}

async fn warm_up_connection_pool(db: &DatabaseConnection) -> Result<(), DbErr> {
    use sea_orm::Statement;

    let stmt = Statement::from_string(db.get_database_backend(), "SELECT 1".to_owned());

    for i in 1..=3 {
        match db.execute(stmt.clone()).await {
            Ok(_) => {
                tracing::debug!("连接池预热查询 {} 完成", i);
            }
            Err(e) => {
                tracing::warn!("⚠️  连接池预热查询 {} 失败: {}", i, e);
                return Err(e);
            }
        }
    }

    Ok(())
}

/// 建表（已存在则跳过），并在统计表为空时写入一条全零记录
pub async fn initialize_database(db: &SeaOrmDatabaseConnection) -> Result<(), DbErr> {
    create_table_if_missing(db, SessionEntity).await?;
    create_table_if_missing(db, BotStatsEntity).await?;
    create_table_if_missing(db, ServerConfigEntity).await?;

    if seed_default_stats(db).await? {
        info!("统计表为空，已写入默认统计记录");
    }

    info!("数据库初始化完成");
    Ok(())
}

async fn create_table_if_missing<E>(db: &SeaOrmDatabaseConnection, entity: E) -> Result<(), DbErr>
where
    E: EntityTrait + Copy,
{
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut table = schema.create_table_from_entity(entity);
    table.if_not_exists();
    db.execute(backend.build(&table)).await?;

    for mut index in schema.create_index_from_entity(entity) {
        index.if_not_exists();
        db.execute(backend.build(&index)).await?;
    }

    tracing::debug!("数据表就绪: {}", entity.table_name());
    Ok(())
}

async fn seed_default_stats(db: &SeaOrmDatabaseConnection) -> Result<bool, DbErr> {
    if BotStatsEntity::find().count(db).await? > 0 {
        return Ok(false);
    }

    bot_stats::ActiveModel {
        guild_count: Set(0),
        user_count: Set(0),
        message_count: Set(0),
        command_count: Set(0),
        uptime: Set(0),
        updated_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn initialization_is_idempotent() -> Result<(), DbErr> {
        let db = Database::connect("sqlite::memory:").await?;

        initialize_database(&db).await?;
        initialize_database(&db).await?;

        assert_eq!(BotStatsEntity::find().count(&db).await?, 1);
        assert_eq!(ServerConfigEntity::find().count(&db).await?, 0);
        assert_eq!(SessionEntity::find().count(&db).await?, 0);

        let seeded = BotStatsEntity::find().one(&db).await?.unwrap();
        assert_eq!(seeded.guild_count, 0);
        assert_eq!(seeded.uptime, 0);
        Ok(())
    }
}
