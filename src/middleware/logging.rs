use axum::{
    extract::{ConnectInfo, Request},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::{net::SocketAddr, time::Instant};

use crate::logging::HttpLogFormatter;

/// 获取真实的客户端 IP 地址
fn get_real_ip(addr: Option<SocketAddr>, headers: &HeaderMap) -> Option<String> {
    // X-Forwarded-For 可能包含多个IP，取第一个
    let forwarded_for = headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty());

    let real_ip = || {
        headers
            .get("x-real-ip")
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
    };

    forwarded_for
        .or_else(real_ip)
        .map(str::to_string)
        .or_else(|| addr.map(|a| a.ip().to_string()))
}

/// HTTP 请求日志中间件
///
/// 未通过 `into_make_service_with_connect_info` 启动时只依赖代理头获取 IP
pub async fn http_logging_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let uri = request.uri().to_string();
    let addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let real_ip = get_real_ip(addr, request.headers());

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status().as_u16();

    let log_message =
        HttpLogFormatter::format_request(&method, &uri, status, duration, real_ip.as_deref());

    if status >= 500 {
        tracing::warn!("{}", log_message);
    } else {
        tracing::info!("{}", log_message);
    }

    response
}
