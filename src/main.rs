// ==========================================
// Pentwheel 跟踪服务 - 主入口
// ==========================================
// 流程: .env -> 配置 -> 日志 -> 建表 -> 装配 -> 监听
// ==========================================

use anyhow::Context;
use pentwheel_api::app::{build_router, AppState};
use pentwheel_api::config::ServerConfig;
use pentwheel_api::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 为可选文件
    let dotenv = dotenvy::dotenv();

    let config = ServerConfig::from_env().context("加载配置失败")?;

    // 初始化日志系统
    logging::init(config.log_format);

    tracing::info!("==================================================");
    tracing::info!("{} v{}", pentwheel_api::APP_NAME, pentwheel_api::VERSION);
    tracing::info!("==================================================");
    if let Ok(path) = dotenv {
        tracing::info!("已加载 .env: {}", path.display());
    }
    tracing::info!(
        db_path = %config.db_path,
        bind_addr = %config.bind_addr,
        log_format = %config.log_format,
        max_page_size = config.max_page_size,
        "服务配置"
    );

    let state = AppState::open(&config.db_path, config.max_page_size)
        .with_context(|| format!("无法初始化数据库: {}", config.db_path))?;
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("无法监听 {}", config.bind_addr))?;
    tracing::info!("服务已启动: http://{}", config.bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP 服务异常退出")?;

    tracing::info!("服务已停止");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("无法监听退出信号: {}", e);
        std::future::pending::<()>().await;
    }
}
