//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod clock;
mod speech_synthesizer;
mod synthesis_cache;

pub use clock::Clock;
pub use speech_synthesizer::{SpeechSynthesizerPort, SynthesisError, SynthesizedAudio};
pub use synthesis_cache::{CacheEntry, CacheError, CacheStats, SynthesisCachePort};
