//! 合成请求指纹
//!
//! 归一化参数 → 固定字段顺序的字节序列 → SHA-256 → 取十六进制前 16 位

use sha2::{Digest, Sha256};

use super::ResolvedSynthesis;

/// 指纹长度（十六进制字符数）
pub const FINGERPRINT_LEN: usize = 16;

/// 请求指纹（缓存 key）
///
/// 不变量:
/// - 只依赖归一化后的字段，进程重启后保持稳定
/// - 固定为 FINGERPRINT_LEN 个小写十六进制字符
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn compute(resolved: &ResolvedSynthesis) -> Self {
        let text = resolved.normalized_text();

        // 固定字段顺序；字符串带长度前缀，相邻字段不会互相串位
        let mut hasher = Sha256::new();
        for field in [
            text.as_str(),
            resolved.voice.as_str(),
            resolved.language_code.as_str(),
        ] {
            hasher.update((field.len() as u64).to_be_bytes());
            hasher.update(field.as_bytes());
        }
        hasher.update(resolved.speaking_rate.to_bits().to_be_bytes());
        hasher.update(resolved.pitch.to_bits().to_be_bytes());
        let digest = hasher.finalize();

        let mut hex = hex::encode(digest);
        hex.truncate(FINGERPRINT_LEN);
        Self(hex)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
