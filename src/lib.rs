//! Voxcache - 语音合成结果缓存服务
//!
//! 架构设计: CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Synthesis Context: 请求归一化、指纹、音色描述
//!
//! 应用层 (application/):
//! - Ports: 端口定义（SpeechSynthesizer, SynthesisCache, Clock）
//! - Commands: Synthesize, ClearCache
//! - Queries: ListVoices, GetCacheStats
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Memory: 有界内存缓存（TTL + 按创建时间批量淘汰）
//! - Adapters: Google Cloud TTS, Fake TTS, Clock

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
