//! Fake TTS Client - 离线合成器
//!
//! 不调用任何外部服务，按输入参数生成确定性的“音频”字节。
//! 用于本地开发（`tts.provider = "fake"`）和测试

use async_trait::async_trait;
use bytes::Bytes;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::application::ports::{SpeechSynthesizerPort, SynthesisError, SynthesizedAudio};
use crate::domain::{AudioEncoding, ResolvedSynthesis, VoiceDescriptor, VoiceGender};

/// Fake TTS Client 配置
#[derive(Debug, Clone)]
pub struct FakeTtsClientConfig {
    /// 模拟的合成延迟（毫秒）
    pub latency_ms: u64,
    /// 目录中音色的采样率
    pub sample_rate_hz: u32,
}

impl Default for FakeTtsClientConfig {
    fn default() -> Self {
        Self {
            latency_ms: 50,
            sample_rate_hz: 24000,
        }
    }
}

/// 内置音色目录（故意不按名称排序）
const CATALOG: &[(&str, &str, VoiceGender)] = &[
    ("en-US-Neural2-J", "en-US", VoiceGender::Male),
    ("en-US-Neural2-F", "en-US", VoiceGender::Female),
    ("de-DE-Neural2-B", "de-DE", VoiceGender::Male),
    ("en-GB-Neural2-A", "en-GB", VoiceGender::Female),
    ("de-DE-Neural2-A", "de-DE", VoiceGender::Female),
    ("fr-FR-Neural2-A", "fr-FR", VoiceGender::Female),
];

/// Fake TTS Client
pub struct FakeTtsClient {
    config: FakeTtsClientConfig,
    calls: AtomicU64,
    failing: AtomicBool,
}

impl FakeTtsClient {
    pub fn new(config: FakeTtsClientConfig) -> Self {
        tracing::info!(
            latency_ms = config.latency_ms,
            "FakeTtsClient initialized"
        );
        Self {
            config,
            calls: AtomicU64::new(0),
            failing: AtomicBool::new(false),
        }
    }

    /// 使用默认配置创建
    pub fn with_defaults() -> Self {
        Self::new(FakeTtsClientConfig::default())
    }

    /// 累计的 synthesize 调用次数（包括失败的调用）
    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    /// 之后的合成调用全部失败（模拟服务故障）
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl SpeechSynthesizerPort for FakeTtsClient {
    async fn synthesize(
        &self,
        request: &ResolvedSynthesis,
        encoding: AudioEncoding,
    ) -> Result<SynthesizedAudio, SynthesisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        tracing::debug!(
            text_len = request.text.len(),
            voice = %request.voice,
            encoding = %encoding,
            "FakeTtsClient: generating audio"
        );

        if self.config.latency_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(self.config.latency_ms)).await;
        }

        if self.failing.load(Ordering::SeqCst) {
            return Err(SynthesisError::Provider {
                status: 503,
                message: "fake synthesizer unavailable".to_string(),
            });
        }

        let audio = format!(
            "{}|{}|{}|{}|{}|{}",
            encoding, request.voice, request.language_code, request.speaking_rate, request.pitch, request.text
        );

        Ok(SynthesizedAudio {
            audio: Bytes::from(audio),
            voice: request.voice.clone(),
        })
    }

    async fn list_voices(
        &self,
        language_code: Option<&str>,
    ) -> Result<Vec<VoiceDescriptor>, SynthesisError> {
        Ok(CATALOG
            .iter()
            .filter(|(_, lang, _)| language_code.map_or(true, |wanted| *lang == wanted))
            .map(|(name, lang, gender)| VoiceDescriptor {
                name: name.to_string(),
                language_code: lang.to_string(),
                gender: *gender,
                sample_rate_hz: self.config.sample_rate_hz,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SynthesisDefaults, SynthesisRequest};

    #[tokio::test]
    async fn test_fake_audio_is_deterministic() {
        let client = FakeTtsClient::new(FakeTtsClientConfig {
            latency_ms: 0,
            ..Default::default()
        });
        let resolved = SynthesisRequest::new("Hi").resolve(&SynthesisDefaults::default());

        let a = client.synthesize(&resolved, AudioEncoding::Mp3).await.unwrap();
        let b = client.synthesize(&resolved, AudioEncoding::Mp3).await.unwrap();

        assert_eq!(a.audio, b.audio);
        assert_eq!(a.voice, "en-US-Neural2-F");
        assert_eq!(client.call_count(), 2);
    }

    #[tokio::test]
    async fn test_fake_failure_mode() {
        let client = FakeTtsClient::new(FakeTtsClientConfig {
            latency_ms: 0,
            ..Default::default()
        });
        client.set_failing(true);
        let resolved = SynthesisRequest::new("Hi").resolve(&SynthesisDefaults::default());

        let err = client.synthesize(&resolved, AudioEncoding::Mp3).await.unwrap_err();
        assert!(matches!(err, SynthesisError::Provider { status: 503, .. }));
        assert_eq!(client.call_count(), 1);
    }
}
