//! Domain Layer - 领域层
//!
//! 只有一个限界上下文:
//! - Synthesis Context: 合成请求归一化、指纹、音色描述

pub mod synthesis;

pub use synthesis::{
    AudioEncoding, Fingerprint, ResolvedSynthesis, SynthesisDefaults, SynthesisRequest,
    VoiceDescriptor, VoiceGender,
};
