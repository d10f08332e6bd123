use chrono::Utc;
use sea_orm::{sea_query::OnConflict, EntityTrait, QueryOrder, Set};

use crate::{
    entities::{server_config, ServerConfigColumn, ServerConfigEntity, ServerConfigModel},
    errors::ApiResult,
    schemas::servers::UpsertServerConfigRequest,
    services::database::DatabaseConnection,
};

pub struct ServerConfigService;

impl ServerConfigService {
    /// 全部配置，按服务器名称升序（排序规则取决于数据库）
    pub async fn list(db: &DatabaseConnection) -> ApiResult<Vec<ServerConfigModel>> {
        let configs = ServerConfigEntity::find()
            .order_by_asc(ServerConfigColumn::GuildName)
            .all(db.as_ref())
            .await?;
        Ok(configs)
    }

    pub async fn find(
        db: &DatabaseConnection,
        guild_id: i64,
    ) -> ApiResult<Option<ServerConfigModel>> {
        let config = ServerConfigEntity::find_by_id(guild_id)
            .one(db.as_ref())
            .await?;
        Ok(config)
    }

    /// 单条 INSERT ... ON CONFLICT 语句完成插入或覆盖
    ///
    /// 冲突时覆盖除 `created_at` 以外的全部字段
    pub async fn upsert(
        db: &DatabaseConnection,
        guild_id: i64,
        fields: &UpsertServerConfigRequest,
    ) -> ApiResult<ServerConfigModel> {
        let now = Utc::now();

        let model = ServerConfigEntity::insert(server_config::ActiveModel {
            guild_id: Set(guild_id),
            guild_name: Set(fields.guild_name.clone()),
            prefix: Set(fields.prefix_or_default()),
            welcome_channel: Set(fields.welcome_channel),
            log_channel: Set(fields.log_channel),
            auto_role: Set(fields.auto_role),
            settings: Set(fields.settings_document()),
            created_at: Set(now),
            updated_at: Set(now),
        })
        .on_conflict(
            OnConflict::column(ServerConfigColumn::GuildId)
                .update_columns([
                    ServerConfigColumn::GuildName,
                    ServerConfigColumn::Prefix,
                    ServerConfigColumn::WelcomeChannel,
                    ServerConfigColumn::LogChannel,
                    ServerConfigColumn::AutoRole,
                    ServerConfigColumn::Settings,
                    ServerConfigColumn::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_with_returning(db.as_ref())
        .await?;

        tracing::info!("服务器配置已写入: {} ({})", model.guild_name, model.guild_id);

        Ok(model)
    }
}
