//! Synthesis Command Handlers

use std::sync::Arc;

use crate::application::commands::{ClearCache, SynthesisResult, Synthesize};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    SpeechSynthesizerPort, SynthesisCachePort, SynthesisError, SynthesizedAudio,
};
use crate::domain::{AudioEncoding, Fingerprint, ResolvedSynthesis, SynthesisDefaults};

// ============================================================================
// Synthesize
// ============================================================================

/// Synthesize Handler - 带缓存的语音合成
///
/// 并发的同一指纹冷请求不做合并：各自调用合成器，后写入者覆盖先写入者
pub struct SynthesizeHandler {
    cache: Arc<dyn SynthesisCachePort>,
    synthesizer: Arc<dyn SpeechSynthesizerPort>,
    defaults: SynthesisDefaults,
    encoding: AudioEncoding,
}

impl SynthesizeHandler {
    pub fn new(
        cache: Arc<dyn SynthesisCachePort>,
        synthesizer: Arc<dyn SpeechSynthesizerPort>,
        defaults: SynthesisDefaults,
        encoding: AudioEncoding,
    ) -> Self {
        Self {
            cache,
            synthesizer,
            defaults,
            encoding,
        }
    }

    pub async fn handle(&self, command: Synthesize) -> Result<SynthesisResult, ApplicationError> {
        let resolved = command.request.resolve(&self.defaults);
        validate(&resolved)?;

        if !self.cache.is_enabled() {
            let synthesized =
                synthesize_checked(self.synthesizer.as_ref(), &resolved, self.encoding).await?;
            return Ok(self.fresh(synthesized));
        }

        let fingerprint = Fingerprint::compute(&resolved);

        if let Some(entry) = self.cache.lookup(&fingerprint) {
            tracing::debug!(
                fingerprint = %fingerprint,
                voice = %entry.voice,
                audio_size = entry.audio.len(),
                "Synthesis cache hit"
            );
            return Ok(SynthesisResult {
                audio: entry.audio,
                voice: entry.voice,
                cached: true,
                encoding: self.encoding,
            });
        }

        tracing::debug!(
            fingerprint = %fingerprint,
            text_len = resolved.text.len(),
            voice = %resolved.voice,
            "Synthesis cache miss"
        );

        // 未命中路径放进独立任务：调用方放弃请求后合成与写缓存仍会完成
        let cache = self.cache.clone();
        let synthesizer = self.synthesizer.clone();
        let encoding = self.encoding;
        let task = tokio::spawn(async move {
            let synthesized = match synthesize_checked(synthesizer.as_ref(), &resolved, encoding).await {
                Ok(synthesized) => synthesized,
                Err(e) => {
                    tracing::warn!(fingerprint = %fingerprint, error = %e, "Synthesis failed, nothing cached");
                    return Err(ApplicationError::from(e));
                }
            };
            cache.insert(
                fingerprint,
                synthesized.audio.clone(),
                synthesized.voice.clone(),
            )?;
            Ok(synthesized)
        });

        let synthesized = task
            .await
            .map_err(|e| ApplicationError::internal(format!("Synthesis task aborted: {}", e)))??;

        Ok(self.fresh(synthesized))
    }

    fn fresh(&self, synthesized: SynthesizedAudio) -> SynthesisResult {
        SynthesisResult {
            audio: synthesized.audio,
            voice: synthesized.voice,
            cached: false,
            encoding: self.encoding,
        }
    }
}

/// 缓存与合成器都假定请求有效：非法请求不计入命中/未命中
fn validate(resolved: &ResolvedSynthesis) -> Result<(), ApplicationError> {
    if resolved.text.trim().is_empty() {
        return Err(ApplicationError::validation("Text cannot be empty"));
    }

    if !(resolved.speaking_rate.is_finite() && resolved.speaking_rate > 0.0) {
        return Err(ApplicationError::validation(format!(
            "Speaking rate must be a positive number, got {}",
            resolved.speaking_rate
        )));
    }

    if !resolved.pitch.is_finite() {
        return Err(ApplicationError::validation(format!(
            "Pitch must be a finite number, got {}",
            resolved.pitch
        )));
    }

    Ok(())
}

/// 调用合成器，空音频视为失败
async fn synthesize_checked(
    synthesizer: &dyn SpeechSynthesizerPort,
    resolved: &ResolvedSynthesis,
    encoding: AudioEncoding,
) -> Result<SynthesizedAudio, SynthesisError> {
    let synthesized = synthesizer.synthesize(resolved, encoding).await?;
    if synthesized.audio.is_empty() {
        return Err(SynthesisError::EmptyAudio);
    }
    Ok(synthesized)
}

// ============================================================================
// ClearCache
// ============================================================================

/// ClearCache Handler
pub struct ClearCacheHandler {
    cache: Arc<dyn SynthesisCachePort>,
}

impl ClearCacheHandler {
    pub fn new(cache: Arc<dyn SynthesisCachePort>) -> Self {
        Self { cache }
    }

    pub async fn handle(&self, _command: ClearCache) -> Result<(), ApplicationError> {
        self.cache.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::Clock;
    use crate::domain::SynthesisRequest;
    use crate::infrastructure::adapters::{FakeTtsClient, FakeTtsClientConfig, ManualClock};
    use crate::infrastructure::memory::{InMemorySynthesisCache, SynthesisCacheConfig};
    use chrono::{Duration, Utc};

    struct Fixture {
        handler: SynthesizeHandler,
        cache: Arc<InMemorySynthesisCache>,
        tts: Arc<FakeTtsClient>,
        clock: Arc<ManualClock>,
    }

    fn fixture(config: SynthesisCacheConfig) -> Fixture {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let cache = Arc::new(InMemorySynthesisCache::new(config, clock.clone() as Arc<dyn Clock>));
        let tts = Arc::new(FakeTtsClient::new(FakeTtsClientConfig {
            latency_ms: 0,
            ..Default::default()
        }));
        let handler = SynthesizeHandler::new(
            cache.clone(),
            tts.clone(),
            SynthesisDefaults::default(),
            AudioEncoding::Mp3,
        );
        Fixture {
            handler,
            cache,
            tts,
            clock,
        }
    }

    fn synth(text: &str) -> Synthesize {
        Synthesize {
            request: SynthesisRequest::new(text),
        }
    }

    #[tokio::test]
    async fn test_second_call_is_served_from_cache() {
        let f = fixture(SynthesisCacheConfig::default());

        let first = f.handler.handle(synth("Hello there")).await.unwrap();
        let second = f.handler.handle(synth("  hello THERE ")).await.unwrap();

        assert!(!first.cached);
        assert!(second.cached);
        assert_eq!(first.audio, second.audio);
        assert_eq!(first.voice, second.voice);
        assert_eq!(f.tts.call_count(), 1);

        let stats = f.cache.stats();
        assert_eq!((stats.hits, stats.misses, stats.size), (1, 1, 1));
    }

    #[tokio::test]
    async fn test_expired_entry_is_resynthesized() {
        let f = fixture(SynthesisCacheConfig::default());

        f.handler.handle(synth("expiring")).await.unwrap();
        f.clock.advance(Duration::hours(24) + Duration::seconds(1));

        let again = f.handler.handle(synth("expiring")).await.unwrap();
        assert!(!again.cached);
        assert_eq!(f.tts.call_count(), 2);
        // 覆盖旧条目，不占用新槽位
        assert_eq!(f.cache.stats().size, 1);
    }

    #[tokio::test]
    async fn test_disabled_cache_always_calls_synthesizer() {
        let f = fixture(SynthesisCacheConfig {
            enabled: false,
            ..Default::default()
        });

        for _ in 0..3 {
            let result = f.handler.handle(synth("same text")).await.unwrap();
            assert!(!result.cached);
        }

        assert_eq!(f.tts.call_count(), 3);
        let stats = f.cache.stats();
        assert!(!stats.enabled);
        assert_eq!((stats.size, stats.hits, stats.misses), (0, 0, 0));
    }

    #[tokio::test]
    async fn test_failure_is_propagated_and_not_cached() {
        let f = fixture(SynthesisCacheConfig::default());
        f.handler.handle(synth("kept")).await.unwrap();

        f.tts.set_failing(true);
        let err = f.handler.handle(synth("broken")).await.unwrap_err();
        assert!(matches!(err, ApplicationError::SynthesisFailed(_)));

        let stats = f.cache.stats();
        assert_eq!(stats.size, 1);
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 2);

        // 已缓存条目不受影响
        let kept = f.handler.handle(synth("kept")).await.unwrap();
        assert!(kept.cached);
    }

    #[tokio::test]
    async fn test_clear_cache_handler() {
        let f = fixture(SynthesisCacheConfig::default());
        f.handler.handle(synth("one")).await.unwrap();
        f.handler.handle(synth("one")).await.unwrap();

        ClearCacheHandler::new(f.cache.clone())
            .handle(ClearCache)
            .await
            .unwrap();

        let stats = f.cache.stats();
        assert_eq!((stats.size, stats.hits, stats.misses), (0, 0, 0));

        let after = f.handler.handle(synth("one")).await.unwrap();
        assert!(!after.cached);
    }

    #[tokio::test]
    async fn test_invalid_request_is_rejected_before_lookup() {
        let f = fixture(SynthesisCacheConfig::default());

        let invalid = [
            SynthesisRequest::new("   "),
            SynthesisRequest::new("fast").with_speaking_rate(0.0),
            SynthesisRequest::new("fast").with_speaking_rate(f64::NAN),
            SynthesisRequest::new("high").with_pitch(f64::INFINITY),
        ];
        for request in invalid {
            let err = f.handler.handle(Synthesize { request }).await.unwrap_err();
            assert!(matches!(err, ApplicationError::ValidationError(_)));
        }

        assert_eq!(f.tts.call_count(), 0);
        let stats = f.cache.stats();
        assert_eq!((stats.size, stats.hits, stats.misses), (0, 0, 0));
    }
}
