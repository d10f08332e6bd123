use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::{
    entities::{bot_stats, BotStatsColumn, BotStatsEntity, BotStatsModel},
    errors::ApiResult,
    schemas::stats::{BotStatistics, RecordStatsRequest},
    services::database::DatabaseConnection,
};

/// 统计窗口缺省天数
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

pub struct StatsService;

impl StatsService {
    /// 最新一条统计快照；表为空时返回全零记录
    pub async fn latest(db: &DatabaseConnection) -> ApiResult<BotStatistics> {
        let latest = BotStatsEntity::find()
            .order_by_desc(BotStatsColumn::UpdatedAt)
            .order_by_desc(BotStatsColumn::Id)
            .one(db.as_ref())
            .await?;

        Ok(latest.map(BotStatistics::from).unwrap_or_default())
    }

    /// 追加一条快照，`updated_at` 由服务端写入
    pub async fn record(
        db: &DatabaseConnection,
        snapshot: &RecordStatsRequest,
    ) -> ApiResult<BotStatsModel> {
        let model = bot_stats::ActiveModel {
            guild_count: Set(snapshot.guild_count),
            user_count: Set(snapshot.user_count),
            message_count: Set(snapshot.message_count),
            command_count: Set(snapshot.command_count),
            uptime: Set(snapshot.uptime),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db.as_ref())
        .await?;

        tracing::debug!(
            "记录统计快照: guilds={}, users={}, commands={}",
            model.guild_count,
            model.user_count,
            model.command_count
        );

        Ok(model)
    }

    /// 最近 `window_days` 天内的快照，按时间升序
    pub async fn list_window(
        db: &DatabaseConnection,
        window_days: u32,
    ) -> ApiResult<Vec<BotStatistics>> {
        let since = Utc::now() - Duration::days(i64::from(window_days));

        let snapshots = BotStatsEntity::find()
            .filter(BotStatsColumn::UpdatedAt.gte(since))
            .order_by_asc(BotStatsColumn::UpdatedAt)
            .order_by_asc(BotStatsColumn::Id)
            .all(db.as_ref())
            .await?;

        Ok(snapshots.into_iter().map(BotStatistics::from).collect())
    }
}
