//! Synthesis cache behaviour driven through the command/query handlers

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};
use futures_util::future::join_all;

use voxcache::application::{
    ApplicationError, ClearCache, ClearCacheHandler, Clock, GetCacheStats, GetCacheStatsHandler,
    SynthesisCachePort, Synthesize, SynthesizeHandler,
};
use voxcache::domain::{AudioEncoding, SynthesisDefaults, SynthesisRequest};
use voxcache::infrastructure::adapters::{FakeTtsClient, FakeTtsClientConfig, ManualClock};
use voxcache::infrastructure::memory::{InMemorySynthesisCache, SynthesisCacheConfig};

struct Harness {
    handler: Arc<SynthesizeHandler>,
    cache: Arc<InMemorySynthesisCache>,
    tts: Arc<FakeTtsClient>,
    clock: Arc<ManualClock>,
}

fn harness(max_size: usize, latency_ms: u64) -> Harness {
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let cache = Arc::new(InMemorySynthesisCache::new(
        SynthesisCacheConfig {
            max_size,
            ..Default::default()
        },
        clock.clone() as Arc<dyn Clock>,
    ));
    let tts = Arc::new(FakeTtsClient::new(FakeTtsClientConfig {
        latency_ms,
        ..Default::default()
    }));
    let handler = Arc::new(SynthesizeHandler::new(
        cache.clone(),
        tts.clone(),
        SynthesisDefaults::default(),
        AudioEncoding::Mp3,
    ));
    Harness {
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
async fn capacity_five_scenario() {
    let h = harness(5, 0);

    for text in ["A", "B", "C", "D", "E"] {
        let result = h.handler.handle(synth(text)).await.unwrap();
        assert!(!result.cached);
        h.clock.advance(Duration::seconds(1));
    }
    assert_eq!(h.cache.stats().size, 5);

    // F 触发淘汰：ceil(5 * 0.2) = 1 条，最旧的 A 被移除
    h.handler.handle(synth("F")).await.unwrap();
    h.clock.advance(Duration::seconds(1));
    assert_eq!(h.cache.stats().size, 5);
    assert_eq!(h.tts.call_count(), 6);

    let b = h.handler.handle(synth("B")).await.unwrap();
    assert!(b.cached);
    assert_eq!(h.tts.call_count(), 6);

    let a = h.handler.handle(synth("A")).await.unwrap();
    assert!(!a.cached);
    assert_eq!(h.tts.call_count(), 7);
    assert_eq!(h.cache.stats().size, 5);

    // A 重新插入时挤掉了当时最旧的 B
    let b_again = h.handler.handle(synth("B")).await.unwrap();
    assert!(!b_again.cached);
}

#[tokio::test]
async fn newest_entries_survive_overflow() {
    let h = harness(10, 0);

    for i in 0..25 {
        h.handler.handle(synth(&format!("line {}", i))).await.unwrap();
        h.clock.advance(Duration::seconds(1));
        assert!(h.cache.stats().size <= 10);
    }

    let newest = h.handler.handle(synth("line 24")).await.unwrap();
    assert!(newest.cached);
    let oldest = h.handler.handle(synth("line 0")).await.unwrap();
    assert!(!oldest.cached);
}

#[tokio::test]
async fn ttl_expiry_counts_as_miss() {
    let h = harness(10, 0);

    h.handler.handle(synth("good morning")).await.unwrap();
    h.clock.advance(Duration::hours(24) + Duration::milliseconds(1));

    let stale = h.handler.handle(synth("Good Morning")).await.unwrap();
    assert!(!stale.cached);
    assert_eq!(h.tts.call_count(), 2);

    let stats = h.cache.stats();
    assert_eq!((stats.hits, stats.misses, stats.size), (0, 2, 1));
}

#[tokio::test]
async fn stats_track_hits_and_misses() {
    let h = harness(50, 0);
    let stats_handler = GetCacheStatsHandler::new(h.cache.clone());

    let initial = stats_handler.handle(GetCacheStats).await.unwrap();
    assert_eq!(initial.hit_rate_display(), "N/A");

    // 3 个不同文本各请求 3 次：3 次未命中 + 6 次命中
    for _ in 0..3 {
        for text in ["one", "two", "three"] {
            h.handler.handle(synth(text)).await.unwrap();
        }
    }

    let stats = stats_handler.handle(GetCacheStats).await.unwrap();
    assert_eq!(stats.hits, 6);
    assert_eq!(stats.misses, 3);
    assert_eq!(stats.size, 3);
    assert_eq!(stats.max_size, 50);
    assert_eq!(stats.hit_rate_display(), "66.67%");
}

#[tokio::test]
async fn clear_makes_previous_entries_miss() {
    let h = harness(10, 0);
    h.handler.handle(synth("remember me")).await.unwrap();
    assert!(h.handler.handle(synth("remember me")).await.unwrap().cached);

    ClearCacheHandler::new(h.cache.clone())
        .handle(ClearCache)
        .await
        .unwrap();

    let stats = h.cache.stats();
    assert_eq!((stats.size, stats.hits, stats.misses), (0, 0, 0));
    assert!(!h.handler.handle(synth("remember me")).await.unwrap().cached);
}

#[tokio::test]
async fn failure_leaves_cache_untouched() {
    let h = harness(10, 0);
    let kept = h.handler.handle(synth("kept")).await.unwrap();

    h.tts.set_failing(true);
    let err = h.handler.handle(synth("lost")).await.unwrap_err();
    assert!(matches!(err, ApplicationError::SynthesisFailed(_)));

    let stats = h.cache.stats();
    assert_eq!((stats.size, stats.hits, stats.misses), (1, 0, 2));

    h.tts.set_failing(false);
    let again = h.handler.handle(synth("kept")).await.unwrap();
    assert!(again.cached);
    assert_eq!(again.audio, kept.audio);
}

#[tokio::test]
async fn concurrent_cold_misses_race_last_write_wins() {
    let h = harness(10, 20);

    let results = join_all((0..8).map(|_| h.handler.handle(synth("same words")))).await;

    for result in results {
        assert!(!result.unwrap().cached);
    }
    // 不合并请求：每个调用都各自合成
    assert_eq!(h.tts.call_count(), 8);
    let stats = h.cache.stats();
    assert_eq!(stats.misses, 8);
    assert_eq!(stats.size, 1);

    assert!(h.handler.handle(synth("same words")).await.unwrap().cached);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn size_never_exceeds_capacity_under_load() {
    let h = harness(10, 2);

    let watcher_cache = h.cache.clone();
    let watcher = tokio::spawn(async move {
        for _ in 0..200 {
            let size = watcher_cache.stats().size;
            assert!(size <= 10, "observed size {} above capacity", size);
            tokio::time::sleep(StdDuration::from_micros(200)).await;
        }
    });

    let tasks: Vec<_> = (0..300)
        .map(|i| {
            let handler = h.handler.clone();
            tokio::spawn(async move { handler.handle(synth(&format!("phrase {}", i % 37))).await })
        })
        .collect();

    for task in join_all(tasks).await {
        // IntegrityViolation 会以 CacheError 的形式出现在这里
        task.unwrap().unwrap();
    }
    watcher.await.unwrap();

    let stats = h.cache.stats();
    assert!(stats.size <= 10);
    assert_eq!(stats.hits + stats.misses, 300);
}

#[tokio::test]
async fn abandoned_request_still_populates_cache() {
    let h = harness(10, 50);

    let abandoned = tokio::time::timeout(
        StdDuration::from_millis(5),
        h.handler.handle(synth("paid for already")),
    )
    .await;
    assert!(abandoned.is_err());

    tokio::time::sleep(StdDuration::from_millis(150)).await;
    assert_eq!(h.cache.stats().size, 1);

    let later = h.handler.handle(synth("paid for already")).await.unwrap();
    assert!(later.cached);
    assert_eq!(h.tts.call_count(), 1);
}

#[tokio::test]
async fn disabled_cache_is_a_passthrough() {
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let cache = Arc::new(InMemorySynthesisCache::new(
        SynthesisCacheConfig {
            enabled: false,
            ..Default::default()
        },
        clock as Arc<dyn Clock>,
    ));
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

    for _ in 0..4 {
        assert!(!handler.handle(synth("again")).await.unwrap().cached);
    }
    assert_eq!(tts.call_count(), 4);
    assert_eq!(cache.stats().size, 0);
}
