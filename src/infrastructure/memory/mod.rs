//! Memory Layer - In-Memory State Management
//!
//! 进程内的合成结果缓存（不持久化）

mod synthesis_cache;

pub use synthesis_cache::{InMemorySynthesisCache, SynthesisCacheConfig};
