//! Synthesis Context - 语音合成限界上下文
//!
//! 职责:
//! - 合成请求的默认值填充与归一化
//! - 请求指纹（缓存 key）计算
//! - 音色目录的值对象

mod fingerprint;
mod value_objects;

pub use fingerprint::{Fingerprint, FINGERPRINT_LEN};
pub use value_objects::{
    AudioEncoding, ResolvedSynthesis, SynthesisDefaults, SynthesisRequest, VoiceDescriptor,
    VoiceGender,
};
