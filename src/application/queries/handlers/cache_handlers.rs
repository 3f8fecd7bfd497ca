//! Cache Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{CacheStats, SynthesisCachePort};
use crate::application::queries::GetCacheStats;

/// GetCacheStats Handler
pub struct GetCacheStatsHandler {
    cache: Arc<dyn SynthesisCachePort>,
}

impl GetCacheStatsHandler {
    pub fn new(cache: Arc<dyn SynthesisCachePort>) -> Self {
        Self { cache }
    }

    pub async fn handle(&self, _query: GetCacheStats) -> Result<CacheStats, ApplicationError> {
        Ok(self.cache.stats())
    }
}
