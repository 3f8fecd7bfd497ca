//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::{AppConfig, TtsProvider};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// # 环境变量示例
/// - `VOXCACHE_SERVER__PORT=8080`
/// - `VOXCACHE_TTS__API_KEY=...`
/// - `VOXCACHE_TTS__DEFAULT_VOICE=en-US-Neural2-J`
/// - `VOXCACHE_CACHE__ENABLED=false`
/// - `VOXCACHE_CACHE__MAX_SIZE=500`
/// - `VOXCACHE_CACHE__TTL_HOURS=12`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000)?
        .set_default("server.max_text_length", 5000)?
        .set_default("tts.provider", "google")?
        .set_default("tts.api_url", "https://texttospeech.googleapis.com")?
        .set_default("tts.timeout_secs", 30)?
        .set_default("tts.audio_encoding", "MP3")?
        .set_default("tts.default_language_code", "en-US")?
        .set_default("tts.default_voice", "en-US-Neural2-F")?
        .set_default("tts.default_speaking_rate", 1.0)?
        .set_default("tts.default_pitch", 0.0)?
        .set_default("cache.enabled", true)?
        .set_default("cache.max_size", 100)?
        .set_default("cache.ttl_hours", 24)?
        .set_default("cache.eviction_ratio", 0.2)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 前缀: VOXCACHE_，层级分隔符: __
    builder = builder.add_source(
        Environment::with_prefix("VOXCACHE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.server.max_text_length == 0 {
        return Err(ConfigError::ValidationError(
            "Max text length cannot be 0".to_string(),
        ));
    }

    if config.tts.provider == TtsProvider::Google
        && config.tts.api_key.as_deref().map_or(true, str::is_empty)
    {
        return Err(ConfigError::ValidationError(
            "TTS API key is required for the google provider".to_string(),
        ));
    }

    if !(config.tts.default_speaking_rate.is_finite() && config.tts.default_speaking_rate > 0.0) {
        return Err(ConfigError::ValidationError(
            "Default speaking rate must be a positive number".to_string(),
        ));
    }

    if !config.tts.default_pitch.is_finite() {
        return Err(ConfigError::ValidationError(
            "Default pitch must be a finite number".to_string(),
        ));
    }

    if config.cache.enabled && config.cache.max_size == 0 {
        return Err(ConfigError::ValidationError(
            "Cache max size cannot be 0 when the cache is enabled".to_string(),
        ));
    }

    if config.cache.ttl_hours == 0 {
        return Err(ConfigError::ValidationError(
            "Cache TTL cannot be 0".to_string(),
        ));
    }

    let ratio = config.cache.eviction_ratio;
    if !(ratio > 0.0 && ratio <= 1.0) {
        return Err(ConfigError::ValidationError(format!(
            "Cache eviction ratio must be in (0, 1], got {}",
            ratio
        )));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("Max Text Length: {}", config.server.max_text_length);
    tracing::info!("TTS Provider: {:?}", config.tts.provider);
    tracing::info!("TTS API URL: {}", config.tts.api_url);
    tracing::info!("TTS Timeout: {}s", config.tts.timeout_secs);
    tracing::info!("Audio Encoding: {}", config.tts.audio_encoding);
    tracing::info!(
        "Default Voice: {} ({})",
        config.tts.default_voice, config.tts.default_language_code
    );
    tracing::info!("Cache Enabled: {}", config.cache.enabled);
    if config.cache.enabled {
        tracing::info!("Cache Max Size: {}", config.cache.max_size);
        tracing::info!("Cache TTL: {}h", config.cache.ttl_hours);
        tracing::info!("Cache Eviction Ratio: {}", config.cache.eviction_ratio);
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
