//! Request Validation
//!
//! 传输层校验：文本长度上限、音色与语言代码格式
//! 空文本和非法数值由 SynthesizeHandler 拒绝

use super::dto::SynthesizeRequest;
use super::error::ApiError;

/// 校验合成请求
pub fn validate_synthesize_request(
    req: &SynthesizeRequest,
    max_text_length: usize,
) -> Result<(), ApiError> {
    let length = req.text.chars().count();
    if length > max_text_length {
        return Err(ApiError::BadRequest(format!(
            "Text too long ({} characters, max {})",
            length, max_text_length
        )));
    }

    if let Some(voice) = &req.voice {
        if voice.trim().is_empty() {
            return Err(ApiError::BadRequest("Voice cannot be empty".to_string()));
        }
    }

    if let Some(lang) = &req.language_code {
        if !is_valid_language_code(lang) {
            return Err(ApiError::BadRequest(format!(
                "Invalid language code: {}. Expected a BCP-47 tag such as en-US",
                lang
            )));
        }
    }

    Ok(())
}

/// BCP-47 形式的语言代码（en-US, cmn-CN, de）
fn is_valid_language_code(code: &str) -> bool {
    let mut parts = code.split('-');
    let primary = parts.next().unwrap_or_default();
    if !(2..=3).contains(&primary.len()) || !primary.chars().all(|c| c.is_ascii_alphabetic()) {
        return false;
    }
    parts.all(|p| (2..=8).contains(&p.len()) && p.chars().all(|c| c.is_ascii_alphanumeric()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http::dto::ResponseFormat;

    fn request(text: &str) -> SynthesizeRequest {
        SynthesizeRequest {
            text: text.to_string(),
            voice: None,
            language_code: None,
            speaking_rate: None,
            pitch: None,
            format: ResponseFormat::Base64,
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(validate_synthesize_request(&request("Hello"), 5000).is_ok());
    }

    #[test]
    fn test_empty_voice() {
        let mut req = request("Hello");
        req.voice = Some("  ".to_string());
        let result = validate_synthesize_request(&req, 5000);
        assert!(matches!(result, Err(ApiError::BadRequest(msg)) if msg.contains("Voice")));
    }

    #[test]
    fn test_text_too_long_counts_characters() {
        // 5000 个多字节字符仍然合法
        assert!(validate_synthesize_request(&request(&"é".repeat(5000)), 5000).is_ok());

        let result = validate_synthesize_request(&request(&"a".repeat(5001)), 5000);
        assert!(matches!(result, Err(ApiError::BadRequest(msg)) if msg.contains("too long")));
    }

    #[test]
    fn test_language_codes() {
        assert!(is_valid_language_code("en-US"));
        assert!(is_valid_language_code("cmn-CN"));
        assert!(is_valid_language_code("de"));
        assert!(!is_valid_language_code("english"));
        assert!(!is_valid_language_code("en_US"));
        assert!(!is_valid_language_code(""));
    }
}
