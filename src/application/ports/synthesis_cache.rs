//! Synthesis Cache Port - 合成结果缓存
//!
//! 指纹 → 音频的有界内存缓存。所有操作同步、不挂起，
//! 异步的只有缓存之外的合成调用

use bytes::Bytes;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::Fingerprint;

/// Synthesis Cache 错误
#[derive(Debug, Error)]
pub enum CacheError {
    /// 插入后容量不变量被破坏（正常情况下不可能出现）
    #[error("Cache integrity violation: size {size} exceeds capacity {capacity}")]
    IntegrityViolation { size: usize, capacity: usize },
}

/// 缓存条目
///
/// 创建后不可变；更新总是整体替换
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub audio: Bytes,
    pub voice: String,
    pub created_at: DateTime<Utc>,
}

/// Synthesis Cache Port
///
/// - `lookup` 每次调用恰好记一次命中或未命中
/// - 过期只是读取时的有效性判断，过期条目仍占容量直到被淘汰或覆盖
/// - 淘汰按创建时间从旧到新，读取不刷新顺序
pub trait SynthesisCachePort: Send + Sync {
    /// 缓存是否启用
    fn is_enabled(&self) -> bool;

    /// 查找有效（存在且未过期）的条目
    fn lookup(&self, fingerprint: &Fingerprint) -> Option<CacheEntry>;

    /// 插入新条目，必要时先批量淘汰最旧的条目
    ///
    /// 返回插入后的条目（带创建时间）
    fn insert(
        &self,
        fingerprint: Fingerprint,
        audio: Bytes,
        voice: String,
    ) -> Result<CacheEntry, CacheError>;

    /// 获取缓存统计信息（只读）
    fn stats(&self) -> CacheStats;

    /// 清空所有条目并重置计数器（原子）
    fn clear(&self);
}

/// 缓存统计信息
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheStats {
    pub enabled: bool,
    pub size: usize,
    pub max_size: usize,
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    /// 命中率（0.0 - 1.0），没有任何查找时为 None
    pub fn hit_rate(&self) -> Option<f64> {
        let total = self.hits + self.misses;
        if total == 0 {
            None
        } else {
            Some(self.hits as f64 / total as f64)
        }
    }

    /// 百分比形式的命中率，如 "66.67%"；没有查找时为 "N/A"
    pub fn hit_rate_display(&self) -> String {
        match self.hit_rate() {
            Some(rate) => format!("{:.2}%", rate * 100.0),
            None => "N/A".to_string(),
        }
    }
}
