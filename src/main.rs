use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use ultrabot_web::{
    create_app,
    logging::{init_logging, log_server_ready, log_shutdown},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    let app_state = AppState::new().await?;

    tracing::info!("启动过期会话清理任务...");
    let sweep_interval = Duration::from_secs(app_state.config.session.sweep_interval.max(60));
    tokio::spawn(
        app_state
            .session_store()
            .continuously_delete_expired(sweep_interval),
    );

    tracing::info!("创建应用程序...");
    let app = create_app(app_state.clone());

    let server = &app_state.config.server;
    let addr: SocketAddr = format!("{}:{}", server.host, server.port)
        .parse()
        .with_context(|| format!("无效的监听地址: {}:{}", server.host, server.port))?;

    tracing::info!("启动 HTTP 服务器...");
    let listener = tokio::net::TcpListener::bind(addr).await?;

    log_server_ready(&addr);

    let result = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await;

    log_shutdown();
    result.map_err(Into::into)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("监听 Ctrl-C 失败: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("监听 SIGTERM 失败: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("收到关闭信号");
}
