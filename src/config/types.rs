//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::time::Duration;

use crate::domain::{AudioEncoding, SynthesisDefaults};
use crate::infrastructure::memory::SynthesisCacheConfig;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// TTS 合成器配置
    #[serde(default)]
    pub tts: TtsConfig,

    /// 合成缓存配置
    #[serde(default)]
    pub cache: CacheConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 单次合成允许的最大文本长度（字符数）
    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_max_text_length() -> usize {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_text_length: default_max_text_length(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 合成器实现
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TtsProvider {
    /// Google Cloud Text-to-Speech
    #[default]
    Google,
    /// 离线 Fake 合成器（开发用）
    Fake,
}

/// TTS 合成器配置
#[derive(Debug, Clone, Deserialize)]
pub struct TtsConfig {
    #[serde(default)]
    pub provider: TtsProvider,

    /// Google TTS API 基础 URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Google TTS API key
    #[serde(default)]
    pub api_key: Option<String>,

    /// 请求超时时间（秒）
    #[serde(default = "default_tts_timeout")]
    pub timeout_secs: u64,

    /// 输出编码: MP3 / LINEAR16 / OGG_OPUS
    #[serde(default)]
    pub audio_encoding: AudioEncoding,

    #[serde(default = "default_language_code")]
    pub default_language_code: String,

    #[serde(default = "default_voice")]
    pub default_voice: String,

    #[serde(default = "default_speaking_rate")]
    pub default_speaking_rate: f64,

    #[serde(default)]
    pub default_pitch: f64,
}

fn default_api_url() -> String {
    "https://texttospeech.googleapis.com".to_string()
}

fn default_tts_timeout() -> u64 {
    30
}

fn default_language_code() -> String {
    "en-US".to_string()
}

fn default_voice() -> String {
    "en-US-Neural2-F".to_string()
}

fn default_speaking_rate() -> f64 {
    1.0
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            provider: TtsProvider::default(),
            api_url: default_api_url(),
            api_key: None,
            timeout_secs: default_tts_timeout(),
            audio_encoding: AudioEncoding::default(),
            default_language_code: default_language_code(),
            default_voice: default_voice(),
            default_speaking_rate: default_speaking_rate(),
            default_pitch: 0.0,
        }
    }
}

impl TtsConfig {
    /// 可选字段的默认值
    pub fn synthesis_defaults(&self) -> SynthesisDefaults {
        SynthesisDefaults {
            language_code: self.default_language_code.clone(),
            voice: self.default_voice.clone(),
            speaking_rate: self.default_speaking_rate,
            pitch: self.default_pitch,
        }
    }
}

/// 合成缓存配置
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// 是否启用缓存
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,

    /// 最大条目数
    #[serde(default = "default_cache_max_size")]
    pub max_size: usize,

    /// 条目有效期（小时）
    #[serde(default = "default_cache_ttl_hours")]
    pub ttl_hours: u64,

    /// 容量满时每次淘汰的比例
    #[serde(default = "default_eviction_ratio")]
    pub eviction_ratio: f64,
}

fn default_cache_enabled() -> bool {
    true
}

fn default_cache_max_size() -> usize {
    100
}

fn default_cache_ttl_hours() -> u64 {
    24
}

fn default_eviction_ratio() -> f64 {
    0.2
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            max_size: default_cache_max_size(),
            ttl_hours: default_cache_ttl_hours(),
            eviction_ratio: default_eviction_ratio(),
        }
    }
}

impl CacheConfig {
    /// 超大的小时数饱和到 u64::MAX 秒
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_hours.saturating_mul(60 * 60))
    }
}

impl From<&CacheConfig> for SynthesisCacheConfig {
    fn from(config: &CacheConfig) -> Self {
        Self {
            enabled: config.enabled,
            max_size: config.max_size,
            ttl: config.ttl(),
            eviction_ratio: config.eviction_ratio,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
