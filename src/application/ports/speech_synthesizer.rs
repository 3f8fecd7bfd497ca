//! Speech Synthesizer Port - 外部语音合成服务抽象
//!
//! 付费、限流、走网络的合成调用。具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::domain::{AudioEncoding, ResolvedSynthesis, VoiceDescriptor};

/// 合成错误
///
/// 原样传给调用方，不缓存、不重试
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Provider error (HTTP {status}): {message}")]
    Provider { status: u16, message: String },

    #[error("Synthesizer returned no audio")]
    EmptyAudio,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 合成结果
#[derive(Debug, Clone)]
pub struct SynthesizedAudio {
    /// 原始音频数据（编码由请求决定）
    pub audio: Bytes,
    /// 实际使用的音色
    pub voice: String,
}

/// Speech Synthesizer Port
#[async_trait]
pub trait SpeechSynthesizerPort: Send + Sync {
    /// 合成语音
    ///
    /// `request` 已填充默认值；语速、音调原样透传，不做范围校验
    async fn synthesize(
        &self,
        request: &ResolvedSynthesis,
        encoding: AudioEncoding,
    ) -> Result<SynthesizedAudio, SynthesisError>;

    /// 列出可用音色，可按语言过滤
    async fn list_voices(
        &self,
        language_code: Option<&str>,
    ) -> Result<Vec<VoiceDescriptor>, SynthesisError>;

    /// 检查合成服务是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}
