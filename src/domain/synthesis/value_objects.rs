//! Synthesis Context - Value Objects

use serde::{Deserialize, Serialize};

/// 合成请求（调用方输入，可选字段未填充默认值）
///
/// 文本长度、语速范围等校验由上游 HTTP 层负责，这里假定请求语法有效
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice: Option<String>,
    pub language_code: Option<String>,
    pub speaking_rate: Option<f64>,
    pub pitch: Option<f64>,
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    pub fn with_language_code(mut self, language_code: impl Into<String>) -> Self {
        self.language_code = Some(language_code.into());
        self
    }

    pub fn with_speaking_rate(mut self, speaking_rate: f64) -> Self {
        self.speaking_rate = Some(speaking_rate);
        self
    }

    pub fn with_pitch(mut self, pitch: f64) -> Self {
        self.pitch = Some(pitch);
        self
    }

    /// 填充默认值，得到指纹计算和实际合成共用的参数
    ///
    /// 这是唯一的默认值填充入口，指纹与合成调用都从它的结果出发
    pub fn resolve(&self, defaults: &SynthesisDefaults) -> ResolvedSynthesis {
        ResolvedSynthesis {
            text: self.text.clone(),
            voice: self
                .voice
                .clone()
                .unwrap_or_else(|| defaults.voice.clone()),
            language_code: self
                .language_code
                .clone()
                .unwrap_or_else(|| defaults.language_code.clone()),
            // `+ 0.0` 把 -0.0 折叠为 0.0，避免两者产生不同的指纹
            speaking_rate: self.speaking_rate.unwrap_or(defaults.speaking_rate) + 0.0,
            pitch: self.pitch.unwrap_or(defaults.pitch) + 0.0,
        }
    }
}

/// 可选字段的默认值（来自配置）
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisDefaults {
    pub language_code: String,
    pub voice: String,
    pub speaking_rate: f64,
    pub pitch: f64,
}

impl Default for SynthesisDefaults {
    fn default() -> Self {
        Self {
            language_code: "en-US".to_string(),
            voice: "en-US-Neural2-F".to_string(),
            speaking_rate: 1.0,
            pitch: 0.0,
        }
    }
}

/// 已填充默认值的合成参数
///
/// `text` 保留调用方原文（交给合成器），归一化只发生在指纹计算中
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSynthesis {
    pub text: String,
    pub voice: String,
    pub language_code: String,
    pub speaking_rate: f64,
    pub pitch: f64,
}

impl ResolvedSynthesis {
    /// 指纹使用的文本形式：去除首尾空白并转小写
    pub fn normalized_text(&self) -> String {
        self.text.trim().to_lowercase()
    }
}

/// 合成音频编码
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AudioEncoding {
    #[default]
    Mp3,
    Linear16,
    OggOpus,
}

impl AudioEncoding {
    /// Google TTS API 中的编码名
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mp3 => "MP3",
            Self::Linear16 => "LINEAR16",
            Self::OggOpus => "OGG_OPUS",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Linear16 => "audio/wav",
            Self::OggOpus => "audio/ogg",
        }
    }
}

impl std::fmt::Display for AudioEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 音色性别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VoiceGender {
    Male,
    Female,
    Neutral,
    Unspecified,
}

impl VoiceGender {
    /// 从 SSML gender 字段解析，未知值视为 Unspecified
    pub fn from_ssml(value: &str) -> Self {
        match value.to_ascii_uppercase().as_str() {
            "MALE" => Self::Male,
            "FEMALE" => Self::Female,
            "NEUTRAL" => Self::Neutral,
            _ => Self::Unspecified,
        }
    }
}

/// 合成器目录中的一个音色
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceDescriptor {
    pub name: String,
    pub language_code: String,
    pub gender: VoiceGender,
    pub sample_rate_hz: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_applies_defaults() {
        let defaults = SynthesisDefaults::default();
        let resolved = SynthesisRequest::new("Hello").resolve(&defaults);

        assert_eq!(resolved.text, "Hello");
        assert_eq!(resolved.voice, "en-US-Neural2-F");
        assert_eq!(resolved.language_code, "en-US");
        assert_eq!(resolved.speaking_rate, 1.0);
        assert_eq!(resolved.pitch, 0.0);
    }

    #[test]
    fn test_resolve_keeps_explicit_values() {
        let defaults = SynthesisDefaults::default();
        let resolved = SynthesisRequest::new("Bonjour")
            .with_voice("fr-FR-Neural2-A")
            .with_language_code("fr-FR")
            .with_speaking_rate(1.25)
            .with_pitch(-2.5)
            .resolve(&defaults);

        assert_eq!(resolved.voice, "fr-FR-Neural2-A");
        assert_eq!(resolved.language_code, "fr-FR");
        assert_eq!(resolved.speaking_rate, 1.25);
        assert_eq!(resolved.pitch, -2.5);
    }

    #[test]
    fn test_resolve_folds_negative_zero() {
        let defaults = SynthesisDefaults::default();
        let resolved = SynthesisRequest::new("x").with_pitch(-0.0).resolve(&defaults);
        assert!(resolved.pitch.is_sign_positive());
    }

    #[test]
    fn test_normalized_text() {
        let resolved = SynthesisRequest::new("  Hello World \n").resolve(&SynthesisDefaults::default());
        assert_eq!(resolved.normalized_text(), "hello world");
        // 原文不变，交给合成器
        assert_eq!(resolved.text, "  Hello World \n");
    }

    #[test]
    fn test_voice_gender_from_ssml() {
        assert_eq!(VoiceGender::from_ssml("FEMALE"), VoiceGender::Female);
        assert_eq!(VoiceGender::from_ssml("male"), VoiceGender::Male);
        assert_eq!(VoiceGender::from_ssml("SSML_VOICE_GENDER_UNSPECIFIED"), VoiceGender::Unspecified);
    }

    #[test]
    fn test_audio_encoding_serde_names() {
        let enc: AudioEncoding = serde_json::from_str("\"OGG_OPUS\"").unwrap();
        assert_eq!(enc, AudioEncoding::OggOpus);
        assert_eq!(serde_json::to_string(&AudioEncoding::Linear16).unwrap(), "\"LINEAR16\"");
        assert_eq!(AudioEncoding::default().content_type(), "audio/mpeg");
    }
}
