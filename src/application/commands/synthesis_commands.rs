//! Synthesis Commands - 合成相关命令

use bytes::Bytes;

use crate::domain::{AudioEncoding, SynthesisRequest};

/// 合成命令
#[derive(Debug, Clone)]
pub struct Synthesize {
    pub request: SynthesisRequest,
}

/// 合成结果
#[derive(Debug, Clone)]
pub struct SynthesisResult {
    pub audio: Bytes,
    /// 实际使用的音色
    pub voice: String,
    /// 是否来自缓存
    pub cached: bool,
    pub encoding: AudioEncoding,
}

/// 清空缓存命令
#[derive(Debug, Clone, Default)]
pub struct ClearCache;
