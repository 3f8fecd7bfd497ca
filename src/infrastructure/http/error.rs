//! HTTP Error Handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::{ApplicationError, SynthesisError};

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub errno: i32,
    pub error: String,
    pub data: Option<()>,
}

impl ErrorResponse {
    pub fn new(errno: i32, error: impl Into<String>) -> Self {
        Self {
            errno,
            error: error.into(),
            data: None,
        }
    }
}

/// 错误码定义（与 HTTP 状态码一致）
pub mod errno {
    pub const BAD_REQUEST: i32 = 400;
    pub const INTERNAL_ERROR: i32 = 500;
    pub const BAD_GATEWAY: i32 = 502;
    pub const SERVICE_UNAVAILABLE: i32 = 503;
    pub const GATEWAY_TIMEOUT: i32 = 504;
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
    /// 上游合成服务返回错误
    BadGateway(String),
    ServiceUnavailable(String),
    GatewayTimeout(String),
}

impl ApiError {
    fn parts(&self) -> (StatusCode, i32, &str) {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, errno::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, errno::INTERNAL_ERROR, msg),
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, errno::BAD_GATEWAY, msg),
            ApiError::ServiceUnavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, errno::SERVICE_UNAVAILABLE, msg)
            }
            ApiError::GatewayTimeout(msg) => (StatusCode::GATEWAY_TIMEOUT, errno::GATEWAY_TIMEOUT, msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, msg) = self.parts();

        if status.is_server_error() {
            tracing::error!(errno = code, error = %msg, "Request failed");
        } else {
            tracing::warn!(errno = code, error = %msg, "Bad request");
        }

        let body = ErrorResponse::new(code, msg);
        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::ValidationError(msg) => ApiError::BadRequest(msg),
            ApplicationError::SynthesisFailed(err) => {
                let msg = format!("Speech synthesis failed: {}", err);
                match err {
                    SynthesisError::Timeout => ApiError::GatewayTimeout(msg),
                    SynthesisError::Network(_) => ApiError::ServiceUnavailable(msg),
                    _ => ApiError::BadGateway(msg),
                }
            }
            ApplicationError::CacheError(err) => ApiError::Internal(err.to_string()),
            ApplicationError::InternalError(msg) => ApiError::Internal(msg),
        }
    }
}
