use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    errors::{ApiError, ApiResult},
    services::stats::DEFAULT_WINDOW_DAYS,
};

/// 允许查询的最大天数
pub const MAX_WINDOW_DAYS: u32 = 365;

/// `/{guild_id}` 路径参数，Discord 雪花 ID
#[derive(Debug, Deserialize)]
pub struct GuildIdPath {
    pub guild_id: String,
}

impl GuildIdPath {
    pub fn guild_id(&self) -> ApiResult<i64> {
        self.guild_id
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| ApiError::BadRequest(format!("无效的 guild_id: {}", self.guild_id)))
    }
}

/// 统计窗口查询参数
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct WindowQuery {
    /// 统计最近 N 天，默认 30，范围 1~365
    #[param(example = "7")]
    pub days: Option<String>,
}

impl WindowQuery {
    pub fn window_days(&self) -> ApiResult<u32> {
        let Some(raw) = self.days.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(DEFAULT_WINDOW_DAYS);
        };

        match raw.parse::<u32>() {
            Ok(days) if (1..=MAX_WINDOW_DAYS).contains(&days) => Ok(days),
            _ => Err(ApiError::BadRequest(format!(
                "days 必须是 1~{MAX_WINDOW_DAYS} 之间的整数"
            ))),
        }
    }
}
