//! Synthesis HTTP Handlers

use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::{SynthesisResult, Synthesize};
use crate::infrastructure::http::dto::{
    ApiResponse, ResponseFormat, SynthesizeRequest, SynthesizeResponse,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;
use crate::infrastructure::http::validation::validate_synthesize_request;

pub const VOICE_HEADER: &str = "x-voice";
pub const CACHE_HEADER: &str = "x-cache";

/// 合成语音
pub async fn synthesize(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SynthesizeRequest>,
) -> Result<Response, ApiError> {
    validate_synthesize_request(&req, state.max_text_length)?;

    let request_id = Uuid::new_v4();
    let format = req.format;
    let text_len = req.text.chars().count();

    let result = state
        .synthesize_handler
        .handle(Synthesize {
            request: req.into(),
        })
        .await?;

    tracing::info!(
        request_id = %request_id,
        text_len = text_len,
        voice = %result.voice,
        cached = result.cached,
        audio_size = result.audio.len(),
        "Synthesis request served"
    );

    Ok(match format {
        ResponseFormat::Base64 => base64_response(result),
        ResponseFormat::Binary => binary_response(result)?,
    })
}

fn base64_response(result: SynthesisResult) -> Response {
    Json(ApiResponse::success(SynthesizeResponse {
        audio_content: BASE64.encode(&result.audio),
        size: result.audio.len(),
        voice: result.voice,
        cached: result.cached,
        encoding: result.encoding.to_string(),
    }))
    .into_response()
}

fn binary_response(result: SynthesisResult) -> Result<Response, ApiError> {
    let voice = HeaderValue::from_str(&result.voice)
        .map_err(|e| ApiError::Internal(format!("Invalid voice header: {}", e)))?;
    let cache_status = if result.cached { "HIT" } else { "MISS" };

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(result.encoding.content_type())),
            (header::HeaderName::from_static(VOICE_HEADER), voice),
            (header::HeaderName::from_static(CACHE_HEADER), HeaderValue::from_static(cache_status)),
        ],
        result.audio,
    )
        .into_response())
}
