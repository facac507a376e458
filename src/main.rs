//! Sonos Hub
//!
//! 启动 HTTP API，按需拉起 soco-cli 命令服务器，退出时将其停止。

use std::sync::Arc;
use std::time::Duration;

use sonos_hub::application::{CommandServerPort, SpeakerCommandPort};
use sonos_hub::config::{load_config, print_config};
use sonos_hub::infrastructure::adapters::{
    HttpCommandClientConfig, HttpSpeakerCommandClient, RequestGate,
};
use sonos_hub::infrastructure::http::{AppState, HttpServer};
use sonos_hub::infrastructure::process::{
    resolve_executable, SocoCliSupervisor, SocoCliSupervisorConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},sonos_hub={},soco_cli={},tower_http=debug",
        config.log.level, config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Sonos Hub v{}", env!("CARGO_PKG_VERSION"));
    print_config(&config);

    // 命令服务器 Supervisor（首次请求时才启动）
    let soco = &config.soco_cli;
    let executable = resolve_executable(soco.executable_path.as_deref());
    tracing::info!(executable = %executable.display(), "Resolved soco-cli executable");

    let mut supervisor_config = SocoCliSupervisorConfig::new(executable, soco.port).with_startup(
        soco.startup_attempts,
        Duration::from_millis(soco.startup_interval_ms),
    );
    if let Some(path) = &soco.macros_path {
        supervisor_config = supervisor_config.with_macros(path);
    }
    supervisor_config.use_local_cache = soco.use_local_cache;
    supervisor_config.stop_timeout = Duration::from_secs(soco.stop_timeout_secs);

    let supervisor: Arc<dyn CommandServerPort> =
        Arc::new(SocoCliSupervisor::new(supervisor_config));

    // 命令网关：所有命令共享一个闸门，命令服务器一次只处理一个请求
    let client_config = HttpCommandClientConfig::default()
        .with_timeout(Duration::from_secs(soco.request_timeout_secs));
    let commands: Arc<dyn SpeakerCommandPort> = Arc::new(HttpSpeakerCommandClient::new(
        client_config,
        supervisor.clone(),
        RequestGate::new(),
    )?);

    let state = Arc::new(AppState::new(supervisor.clone(), commands));
    let server = HttpServer::new(&config.server, state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    if supervisor.stop().await {
        tracing::info!("soco-cli server stopped");
    }

    tracing::info!("Server shutdown complete");

    Ok(())
}
