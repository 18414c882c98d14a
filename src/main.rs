//! Stillreel - 静态图片字幕旁白生成服务
//!
//! - Domain: generation/ (Bounded Context)
//! - Application: orchestrator, ports
//! - Infrastructure: http, adapters, events

use std::sync::Arc;
use std::time::Duration;

use stillreel::application::{GenerationRunner, OrchestratorConfig, RemoteServices};
use stillreel::config::{load_config, print_config};
use stillreel::infrastructure::adapters::{
    BroadcastAudioPlayer, HttpImageClient, HttpScriptClient, HttpTtsClient, RemoteClientConfig,
};
use stillreel::infrastructure::events::EventPublisher;
use stillreel::infrastructure::http::{AppState, HttpServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},stillreel={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Stillreel - still image subtitle narration");
    print_config(&config);

    // 远程生成服务
    let timeout_secs = config.endpoints.timeout_secs;
    let client_config = |url: &str| RemoteClientConfig::new(url).with_timeout(timeout_secs);
    let services = RemoteServices {
        image: Arc::new(HttpImageClient::new(client_config(&config.endpoints.image_url))?),
        script: Arc::new(HttpScriptClient::new(client_config(&config.endpoints.script_url))?),
        speech: Arc::new(HttpTtsClient::new(client_config(&config.endpoints.tts_url))?),
    };

    // 事件发布器，播放指令也经由它推送给客户端
    let event_publisher = Arc::new(EventPublisher::new());
    let player = Arc::new(BroadcastAudioPlayer::new(event_publisher.clone()));

    let orchestrator_config = OrchestratorConfig {
        strategy: config.generation.tts_strategy,
        max_input_chars: config.generation.max_input_chars,
        call_timeout: Duration::from_secs(timeout_secs),
        ai_model: config.generation.ai_model.clone(),
        system_message: config.generation.system_message.clone(),
        ..Default::default()
    };
    let orchestrator = GenerationRunner::spawn(
        orchestrator_config,
        services,
        player,
        event_publisher.clone(),
    );

    let state = AppState::new(orchestrator.clone(), event_publisher);
    let server = HttpServer::new(config.server.clone(), state);

    // 启动服务器（带优雅关闭）
    let shutdown = orchestrator.clone();
    server
        .run_with_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
            }
            tracing::info!("Received shutdown signal");
            shutdown.shutdown();
        })
        .await?;

    orchestrator.shutdown();
    tracing::info!("Server shutdown complete");

    Ok(())
}
