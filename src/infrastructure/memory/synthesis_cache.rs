//! In-Memory Synthesis Cache Implementation
//!
//! 条目与命中/未命中计数器放在同一把锁里：
//! clear 一次性重置两者，stats 读到的是一致快照

use bytes::Bytes;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{CacheEntry, CacheError, CacheStats, Clock, SynthesisCachePort};
use crate::domain::Fingerprint;
use crate::infrastructure::adapters::SystemClock;

/// 内存缓存配置
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisCacheConfig {
    /// 是否启用缓存
    pub enabled: bool,
    /// 最大条目数
    pub max_size: usize,
    /// 条目有效期
    pub ttl: Duration,
    /// 每次淘汰的批量（占容量比例）
    pub eviction_ratio: f64,
}

impl Default for SynthesisCacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_size: 100,
            ttl: Duration::from_secs(24 * 60 * 60), // 24 小时
            eviction_ratio: 0.2,
        }
    }
}

impl SynthesisCacheConfig {
    /// 单次淘汰批量：ceil(max_size * eviction_ratio)，至少 1
    pub fn eviction_batch(&self) -> usize {
        let batch = (self.max_size as f64 * self.eviction_ratio).ceil() as usize;
        batch.max(1)
    }
}

/// 内部条目：带插入序号，用于创建时间相同时的稳定排序
#[derive(Debug, Clone)]
struct StoredEntry {
    entry: CacheEntry,
    sequence: u64,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<Fingerprint, StoredEntry>,
    next_sequence: u64,
    hits: u64,
    misses: u64,
}

/// 内存合成缓存
pub struct InMemorySynthesisCache {
    config: SynthesisCacheConfig,
    ttl: chrono::Duration,
    clock: Arc<dyn Clock>,
    state: Mutex<CacheState>,
}

impl InMemorySynthesisCache {
    /// 创建新的缓存实例
    pub fn new(config: SynthesisCacheConfig, clock: Arc<dyn Clock>) -> Self {
        let ttl = chrono::Duration::from_std(config.ttl).unwrap_or(chrono::Duration::MAX);

        tracing::info!(
            enabled = config.enabled,
            max_size = config.max_size,
            ttl_secs = config.ttl.as_secs(),
            eviction_batch = config.eviction_batch(),
            "InMemorySynthesisCache initialized"
        );

        Self {
            config,
            ttl,
            clock,
            state: Mutex::new(CacheState::default()),
        }
    }

    /// 使用系统时钟创建
    pub fn with_system_clock(config: SynthesisCacheConfig) -> Self {
        Self::new(config, Arc::new(SystemClock))
    }

    fn is_valid(&self, entry: &CacheEntry, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(entry.created_at) < self.ttl
    }

    /// 按 (created_at, sequence) 从旧到新淘汰
    ///
    /// 淘汰数量取批量与“降到容量以下所需数量”的较大值
    fn evict_oldest(&self, state: &mut CacheState) -> usize {
        let required = (state.entries.len() + 1).saturating_sub(self.config.max_size);
        let count = self
            .config
            .eviction_batch()
            .max(required)
            .min(state.entries.len());

        let mut order: Vec<(DateTime<Utc>, u64, Fingerprint)> = state
            .entries
            .iter()
            .map(|(key, stored)| (stored.entry.created_at, stored.sequence, key.clone()))
            .collect();
        order.sort_unstable();

        for (_, _, key) in order.into_iter().take(count) {
            state.entries.remove(&key);
            tracing::debug!(fingerprint = %key, "Evicted cache entry");
        }

        count
    }
}

impl SynthesisCachePort for InMemorySynthesisCache {
    fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    fn lookup(&self, fingerprint: &Fingerprint) -> Option<CacheEntry> {
        let now = self.clock.now();
        let mut state = self.state.lock();

        let valid = match state.entries.get(fingerprint) {
            Some(stored) if self.is_valid(&stored.entry, now) => Some(stored.entry.clone()),
            Some(_) => {
                tracing::debug!(fingerprint = %fingerprint, "Cache entry expired");
                None
            }
            None => None,
        };

        if valid.is_some() {
            state.hits += 1;
        } else {
            state.misses += 1;
        }
        valid
    }

    fn insert(
        &self,
        fingerprint: Fingerprint,
        audio: Bytes,
        voice: String,
    ) -> Result<CacheEntry, CacheError> {
        let entry = CacheEntry {
            audio,
            voice,
            created_at: self.clock.now(),
        };

        let mut state = self.state.lock();

        // 覆盖已有 key 不增加条目数，无需淘汰
        if !state.entries.contains_key(&fingerprint) && state.entries.len() >= self.config.max_size {
            let evicted = self.evict_oldest(&mut state);
            tracing::debug!(
                evicted = evicted,
                remaining = state.entries.len(),
                max_size = self.config.max_size,
                "Cache eviction pass"
            );
        }

        let sequence = state.next_sequence;
        state.next_sequence += 1;
        state.entries.insert(
            fingerprint.clone(),
            StoredEntry {
                entry: entry.clone(),
                sequence,
            },
        );

        let size = state.entries.len();
        if size > self.config.max_size {
            return Err(CacheError::IntegrityViolation {
                size,
                capacity: self.config.max_size,
            });
        }

        tracing::debug!(
            fingerprint = %fingerprint,
            audio_size = entry.audio.len(),
            size = size,
            "Audio cached"
        );

        Ok(entry)
    }

    fn stats(&self) -> CacheStats {
        let state = self.state.lock();
        CacheStats {
            enabled: self.config.enabled,
            size: state.entries.len(),
            max_size: self.config.max_size,
            hits: state.hits,
            misses: state.misses,
        }
    }

    fn clear(&self) {
        let mut state = self.state.lock();
        let removed = state.entries.len();
        state.entries.clear();
        state.hits = 0;
        state.misses = 0;
        drop(state);

        tracing::info!(removed = removed, "Synthesis cache cleared");
    }
}
