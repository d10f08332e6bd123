//! 访问控制
//!
//! - [`BotAuth`]：写接口使用，校验 `Authorization: Bearer <BOT_API_TOKEN>`
//! - [`DashboardUser`]：控制台页面使用，要求会话已登录
//!
//! 对应令牌未配置时一律拒绝。

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use sha2::{Digest, Sha256};
use tower_sessions::Session;

use crate::{errors::ApiError, AppState};

const SESSION_DASHBOARD_AUTHENTICATED: &str = "dashboard:authenticated";

/// 比较两段令牌的摘要，避免按字节提前返回
pub fn tokens_match(provided: &str, expected: &str) -> bool {
    Sha256::digest(provided.as_bytes()) == Sha256::digest(expected.as_bytes())
}

/// 已通过机器人令牌校验的请求
#[derive(Debug, Clone, Copy)]
pub struct BotAuth;

impl FromRequestParts<AppState> for BotAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.config.auth.bot_api_token.as_deref() else {
            tracing::warn!("BOT_API_TOKEN 未配置，拒绝写入请求");
            return Err(ApiError::Unauthorized("API 令牌未配置".to_string()));
        };

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::Unauthorized("缺少 Bearer 令牌".to_string()))?;

        if !tokens_match(bearer.token(), expected) {
            tracing::warn!("拒绝无效的 API 令牌: {} {}", parts.method, parts.uri);
            return Err(ApiError::Forbidden("API 令牌无效".to_string()));
        }

        Ok(BotAuth)
    }
}

/// 控制台登录状态，封装对会话键的读写
pub struct DashboardSession<'a> {
    session: &'a Session,
}

impl<'a> DashboardSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// 登录成功后轮换会话 ID 并写入登录标记
    pub async fn login(&self) -> Result<(), ApiError> {
        self.session.cycle_id().await?;
        self.session
            .insert(SESSION_DASHBOARD_AUTHENTICATED, true)
            .await?;
        Ok(())
    }

    pub async fn is_authenticated(&self) -> Result<bool, ApiError> {
        let authenticated = self
            .session
            .get::<bool>(SESSION_DASHBOARD_AUTHENTICATED)
            .await?
            .unwrap_or(false);
        Ok(authenticated)
    }

    /// 清空会话数据并删除存储中的记录
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.session.flush().await?;
        Ok(())
    }
}

/// 已登录的控制台用户
#[derive(Debug, Clone, Copy)]
pub struct DashboardUser;

impl FromRequestParts<AppState> for DashboardUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| ApiError::Internal(msg.to_string()))?;

        if !DashboardSession::new(&session).is_authenticated().await? {
            return Err(ApiError::Unauthorized("请先登录控制台".to_string()));
        }

        Ok(DashboardUser)
    }
}
