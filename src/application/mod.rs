//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（SpeechSynthesizer、SynthesisCache、Clock）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    ClearCache,
    SynthesisResult,
    Synthesize,
    // Handlers
    handlers::{ClearCacheHandler, SynthesizeHandler},
};

pub use error::ApplicationError;

pub use ports::{
    // Synthesis cache
    CacheEntry,
    CacheError,
    CacheStats,
    SynthesisCachePort,
    // Speech synthesizer
    SpeechSynthesizerPort,
    SynthesisError,
    SynthesizedAudio,
    // Clock
    Clock,
};

pub use queries::{
    GetCacheStats,
    ListVoices,
    // Handlers
    handlers::{GetCacheStatsHandler, ListVoicesHandler},
};
