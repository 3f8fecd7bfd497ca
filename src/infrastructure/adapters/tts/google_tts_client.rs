//! Google Cloud TTS Client - 调用 Google Cloud Text-to-Speech REST API
//!
//! 实现 SpeechSynthesizerPort trait
//!
//! 外部 API:
//! POST {api_url}/v1/text:synthesize
//! Request: {"input": {"text"}, "voice": {"languageCode", "name"}, "audioConfig": {...}}
//! Response: {"audioContent": "<base64>"}
//!
//! GET {api_url}/v1/voices?languageCode=xx-XX
//! Response: {"voices": [{"languageCodes", "name", "ssmlGender", "naturalSampleRateHertz"}]}

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{SpeechSynthesizerPort, SynthesisError, SynthesizedAudio};
use crate::domain::{AudioEncoding, ResolvedSynthesis, VoiceDescriptor, VoiceGender};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// 健康检查超时
const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeBody<'a> {
    input: TextInput<'a>,
    voice: VoiceSelection<'a>,
    audio_config: AudioConfig,
}

#[derive(Debug, Serialize)]
struct TextInput<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection<'a> {
    language_code: &'a str,
    name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: AudioEncoding,
    speaking_rate: f64,
    pitch: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    #[serde(default)]
    audio_content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VoicesResponse {
    #[serde(default)]
    voices: Vec<GoogleVoice>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleVoice {
    name: String,
    #[serde(default)]
    language_codes: Vec<String>,
    #[serde(default)]
    ssml_gender: Option<String>,
    #[serde(default)]
    natural_sample_rate_hertz: u32,
}

impl From<GoogleVoice> for VoiceDescriptor {
    fn from(voice: GoogleVoice) -> Self {
        Self {
            language_code: voice.language_codes.into_iter().next().unwrap_or_default(),
            gender: voice
                .ssml_gender
                .as_deref()
                .map(VoiceGender::from_ssml)
                .unwrap_or(VoiceGender::Unspecified),
            sample_rate_hz: voice.natural_sample_rate_hertz,
            name: voice.name,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    error: GoogleErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorDetail {
    message: String,
}

/// Google TTS 客户端配置
#[derive(Debug, Clone)]
pub struct GoogleTtsClientConfig {
    /// API 基础 URL
    pub api_url: String,
    /// API key
    pub api_key: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for GoogleTtsClientConfig {
    fn default() -> Self {
        Self {
            api_url: "https://texttospeech.googleapis.com".to_string(),
            api_key: String::new(),
            timeout_secs: 30,
        }
    }
}

impl GoogleTtsClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Google Cloud TTS 客户端
pub struct GoogleTtsClient {
    client: Client,
    config: GoogleTtsClientConfig,
}

impl GoogleTtsClient {
    /// 创建新的客户端
    pub fn new(config: GoogleTtsClientConfig) -> Result<Self, SynthesisError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SynthesisError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn synthesize_url(&self) -> String {
        format!("{}/v1/text:synthesize", self.config.api_url.trim_end_matches('/'))
    }

    fn voices_url(&self) -> String {
        format!("{}/v1/voices", self.config.api_url.trim_end_matches('/'))
    }

    /// 健康检查请求：单独的短超时，不继承合成请求的超时
    fn health_request(&self) -> Result<reqwest::Request, reqwest::Error> {
        self.client
            .get(self.voices_url())
            .header(API_KEY_HEADER, &self.config.api_key)
            .query(&[("languageCode", "en-US")])
            .timeout(HEALTH_CHECK_TIMEOUT)
            .build()
    }

    /// 非 2xx 响应转为 Provider 错误，尽量取出 Google 的错误信息
    async fn provider_error(response: reqwest::Response) -> SynthesisError {
        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<GoogleErrorBody>(&text)
            .map(|body| body.error.message)
            .unwrap_or(text);
        SynthesisError::Provider { status, message }
    }
}

fn map_request_error(e: reqwest::Error) -> SynthesisError {
    if e.is_timeout() {
        SynthesisError::Timeout
    } else if e.is_connect() {
        SynthesisError::Network(format!("Cannot connect to TTS service: {}", e))
    } else {
        SynthesisError::Network(e.to_string())
    }
}

/// 解码 audioContent，缺失或为空视为没有音频
fn decode_audio(response: SynthesizeResponse) -> Result<Bytes, SynthesisError> {
    let content = response
        .audio_content
        .filter(|c| !c.is_empty())
        .ok_or(SynthesisError::EmptyAudio)?;

    let audio = BASE64
        .decode(content.as_bytes())
        .map_err(|e| SynthesisError::InvalidResponse(format!("Invalid audioContent: {}", e)))?;

    if audio.is_empty() {
        return Err(SynthesisError::EmptyAudio);
    }
    Ok(Bytes::from(audio))
}

#[async_trait]
impl SpeechSynthesizerPort for GoogleTtsClient {
    async fn synthesize(
        &self,
        request: &ResolvedSynthesis,
        encoding: AudioEncoding,
    ) -> Result<SynthesizedAudio, SynthesisError> {
        let body = SynthesizeBody {
            input: TextInput {
                text: &request.text,
            },
            voice: VoiceSelection {
                language_code: &request.language_code,
                name: &request.voice,
            },
            audio_config: AudioConfig {
                audio_encoding: encoding,
                speaking_rate: request.speaking_rate,
                pitch: request.pitch,
            },
        };

        tracing::debug!(
            url = %self.synthesize_url(),
            text_len = request.text.len(),
            voice = %request.voice,
            encoding = %encoding,
            "Sending TTS synthesize request"
        );

        let response = self
            .client
            .post(self.synthesize_url())
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(map_request_error)?;

        if !response.status().is_success() {
            return Err(Self::provider_error(response).await);
        }

        let parsed: SynthesizeResponse = response
            .json()
            .await
            .map_err(|e| SynthesisError::InvalidResponse(format!("Failed to parse response: {}", e)))?;
        let audio = decode_audio(parsed)?;

        tracing::info!(
            voice = %request.voice,
            audio_size = audio.len(),
            "TTS synthesis completed"
        );

        Ok(SynthesizedAudio {
            audio,
            voice: request.voice.clone(),
        })
    }

    async fn list_voices(
        &self,
        language_code: Option<&str>,
    ) -> Result<Vec<VoiceDescriptor>, SynthesisError> {
        let mut builder = self
            .client
            .get(self.voices_url())
            .header(API_KEY_HEADER, &self.config.api_key);
        if let Some(language_code) = language_code {
            builder = builder.query(&[("languageCode", language_code)]);
        }

        let response = builder.send().await.map_err(map_request_error)?;
        if !response.status().is_success() {
            return Err(Self::provider_error(response).await);
        }

        let parsed: VoicesResponse = response
            .json()
            .await
            .map_err(|e| SynthesisError::InvalidResponse(format!("Failed to parse voices: {}", e)))?;

        Ok(parsed.voices.into_iter().map(VoiceDescriptor::from).collect())
    }

    async fn health_check(&self) -> bool {
        let request = match self.health_request() {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to build health check request");
                return false;
            }
        };

        match self.client.execute(request).await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!(error = %e, "Google TTS health check failed");
                false
            }
        }
    }
}
