//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::application::CacheStats;
use crate::domain::{SynthesisRequest, VoiceDescriptor};

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

/// 空数据响应
#[derive(Debug, Serialize)]
pub struct Empty {}

impl ApiResponse<Empty> {
    /// 成功但无数据
    pub fn ok() -> Self {
        Self::success(Empty {})
    }
}

// ============================================================================
// Synthesis DTOs
// ============================================================================

/// 音频返回形式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// JSON 中的 base64 字符串
    #[default]
    Base64,
    /// 原始音频字节
    Binary,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizeRequest {
    pub text: String,
    pub voice: Option<String>,
    pub language_code: Option<String>,
    pub speaking_rate: Option<f64>,
    pub pitch: Option<f64>,
    #[serde(default)]
    pub format: ResponseFormat,
}

impl From<SynthesizeRequest> for SynthesisRequest {
    fn from(req: SynthesizeRequest) -> Self {
        Self {
            text: req.text,
            voice: req.voice,
            language_code: req.language_code,
            speaking_rate: req.speaking_rate,
            pitch: req.pitch,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizeResponse {
    pub audio_content: String,
    pub voice: String,
    pub cached: bool,
    pub encoding: String,
    pub size: usize,
}

// ============================================================================
// Voice DTOs
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListVoicesRequest {
    pub language_code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VoicesResponse {
    pub total: usize,
    pub voices: Vec<VoiceDescriptor>,
}

// ============================================================================
// Cache DTOs
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatsResponse {
    pub enabled: bool,
    pub size: usize,
    pub max_size: usize,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: String,
}

impl From<CacheStats> for CacheStatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate_display(),
            enabled: stats.enabled,
            size: stats.size,
            max_size: stats.max_size,
            hits: stats.hits,
            misses: stats.misses,
        }
    }
}
