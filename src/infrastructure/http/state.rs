//! Application State
//!
//! 进程启动时构造一次，按引用（Arc）交给所有 HTTP handler

use std::sync::Arc;

use crate::application::{
    // Command handlers
    ClearCacheHandler, SynthesizeHandler,
    // Query handlers
    GetCacheStatsHandler, ListVoicesHandler,
    // Ports
    SpeechSynthesizerPort, SynthesisCachePort,
};
use crate::domain::{AudioEncoding, SynthesisDefaults};

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub cache: Arc<dyn SynthesisCachePort>,
    pub synthesizer: Arc<dyn SpeechSynthesizerPort>,

    // ========== Request limits ==========
    pub max_text_length: usize,

    // ========== Command Handlers ==========
    pub synthesize_handler: SynthesizeHandler,
    pub clear_cache_handler: ClearCacheHandler,

    // ========== Query Handlers ==========
    pub list_voices_handler: ListVoicesHandler,
    pub get_cache_stats_handler: GetCacheStatsHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        cache: Arc<dyn SynthesisCachePort>,
        synthesizer: Arc<dyn SpeechSynthesizerPort>,
        defaults: SynthesisDefaults,
        encoding: AudioEncoding,
        max_text_length: usize,
    ) -> Self {
        Self {
            cache: cache.clone(),
            synthesizer: synthesizer.clone(),
            max_text_length,

            synthesize_handler: SynthesizeHandler::new(
                cache.clone(),
                synthesizer.clone(),
                defaults,
                encoding,
            ),
            clear_cache_handler: ClearCacheHandler::new(cache.clone()),

            list_voices_handler: ListVoicesHandler::new(synthesizer.clone()),
            get_cache_stats_handler: GetCacheStatsHandler::new(cache),
        }
    }
}
