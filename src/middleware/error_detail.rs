use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::{config::Environment, errors::ErrorDetail};

/// 开发环境下把 5xx 的原始错误信息写入响应体的 `message` 字段
///
/// 生产环境只返回通用错误信息
pub async fn error_detail_middleware(
    State(environment): State<Environment>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    let Some(detail) = response.extensions_mut().remove::<ErrorDetail>() else {
        return response;
    };

    if !environment.is_development() {
        return response;
    }

    let status = response.status();
    let body = Json(json!({
        "error": detail.error,
        "status": status.as_u16(),
        "message": detail.message,
    }));

    (status, body).into_response()
}
