//! Voxcache - 语音合成缓存服务

use std::sync::Arc;

use voxcache::application::SpeechSynthesizerPort;
use voxcache::config::{load_config, print_config, LogConfig, TtsConfig, TtsProvider};
use voxcache::infrastructure::adapters::{
    FakeTtsClient, FakeTtsClientConfig, GoogleTtsClient, GoogleTtsClientConfig,
};
use voxcache::infrastructure::http::{AppState, HttpServer, ServerConfig};
use voxcache::infrastructure::memory::{InMemorySynthesisCache, SynthesisCacheConfig};

fn init_tracing(log: &LogConfig) {
    let log_filter = format!("{},voxcache={},tower_http=debug", log.level, log.level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn build_synthesizer(tts: &TtsConfig) -> anyhow::Result<Arc<dyn SpeechSynthesizerPort>> {
    Ok(match tts.provider {
        TtsProvider::Google => {
            let config = GoogleTtsClientConfig::new(tts.api_key.clone().unwrap_or_default())
                .with_api_url(tts.api_url.clone())
                .with_timeout(tts.timeout_secs);
            Arc::new(GoogleTtsClient::new(config)?)
        }
        TtsProvider::Fake => {
            tracing::warn!("Using the fake synthesizer, audio is not real speech");
            Arc::new(FakeTtsClient::new(FakeTtsClientConfig::default()))
        }
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);

    tracing::info!("Voxcache - speech synthesis cache");
    print_config(&config);

    let synthesizer = build_synthesizer(&config.tts)?;
    let cache = Arc::new(InMemorySynthesisCache::with_system_clock(
        SynthesisCacheConfig::from(&config.cache),
    ));

    let state = AppState::new(
        cache,
        synthesizer,
        config.tts.synthesis_defaults(),
        config.tts.audio_encoding,
        config.server.max_text_length,
    );

    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let server = HttpServer::new(server_config, state);

    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
