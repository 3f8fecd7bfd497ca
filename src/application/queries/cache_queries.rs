//! Cache Queries - 缓存统计查询

/// 获取缓存统计查询
#[derive(Debug, Clone, Default)]
pub struct GetCacheStats;
