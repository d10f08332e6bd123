use serde::Deserialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::entities::server_config::DEFAULT_PREFIX;

/// 写入服务器配置的请求体
///
/// 已存在的配置会被整体覆盖，`created_at` 保持不变
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpsertServerConfigRequest {
    #[schema(example = "Gaming Hub")]
    #[validate(length(min = 1, max = 255, message = "guild_name 长度限制为 1~255"))]
    pub guild_name: String,
    /// 指令前缀，缺省为 "/"
    #[schema(example = "/")]
    #[validate(length(min = 1, max = 10, message = "prefix 长度限制为 1~10"))]
    pub prefix: Option<String>,
    pub welcome_channel: Option<i64>,
    pub log_channel: Option<i64>,
    pub auto_role: Option<i64>,
    /// 任意 JSON 对象，缺省或为 null 时存为 {}
    #[schema(value_type = Option<Object>)]
    #[validate(custom(function = "validate_settings"))]
    pub settings: Option<Value>,
}

fn validate_settings(settings: &Value) -> Result<(), ValidationError> {
    if settings.is_object() || settings.is_null() {
        Ok(())
    } else {
        Err(ValidationError::new("settings").with_message("settings 必须是 JSON 对象".into()))
    }
}

impl UpsertServerConfigRequest {
    pub fn prefix_or_default(&self) -> String {
        self.prefix
            .clone()
            .unwrap_or_else(|| DEFAULT_PREFIX.to_string())
    }

    pub fn settings_document(&self) -> Value {
        match &self.settings {
            Some(Value::Object(map)) => Value::Object(map.clone()),
            _ => Value::Object(Map::new()),
        }
    }
}
