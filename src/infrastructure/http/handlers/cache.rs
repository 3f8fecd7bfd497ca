//! Cache HTTP Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{ClearCache, GetCacheStats};
use crate::infrastructure::http::dto::{ApiResponse, CacheStatsResponse, Empty};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 缓存统计
pub async fn cache_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<CacheStatsResponse>>, ApiError> {
    let stats = state.get_cache_stats_handler.handle(GetCacheStats).await?;
    Ok(Json(ApiResponse::success(CacheStatsResponse::from(stats))))
}

/// 清空缓存
pub async fn clear_cache(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state.clear_cache_handler.handle(ClearCache).await?;
    Ok(Json(ApiResponse::ok()))
}
