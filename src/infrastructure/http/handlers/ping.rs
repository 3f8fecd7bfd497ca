//! Ping Handler

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::infrastructure::http::state::AppState;

/// Ping 响应
#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// 合成服务是否可用
    pub synthesizer: bool,
    pub cache_enabled: bool,
}

/// Ping endpoint - 健康检查
pub async fn ping(State(state): State<Arc<AppState>>) -> Json<PingResponse> {
    let synthesizer = state.synthesizer.health_check().await;
    Json(PingResponse {
        status: if synthesizer { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        synthesizer,
        cache_enabled: state.cache.is_enabled(),
    })
}
