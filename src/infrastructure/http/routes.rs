//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping                GET   健康检查
//! - /api/tts/synthesize      POST  合成语音（带缓存）
//! - /api/tts/voices          GET   列出音色（?languageCode=en-US）
//! - /api/tts/cache/stats     GET   缓存统计
//! - /api/tts/cache/clear     POST  清空缓存

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/tts", tts_routes())
}

/// TTS 路由
fn tts_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/synthesize", post(handlers::synthesize))
        .route("/voices", get(handlers::list_voices))
        .nest("/cache", cache_routes())
}

/// Cache 路由
fn cache_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/stats", get(handlers::cache_stats))
        .route("/clear", post(handlers::clear_cache))
}
