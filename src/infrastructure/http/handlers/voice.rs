//! Voice HTTP Handlers

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::application::ListVoices;
use crate::infrastructure::http::dto::{ApiResponse, ListVoicesRequest, VoicesResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 列出可用音色
pub async fn list_voices(
    State(state): State<Arc<AppState>>,
    Query(req): Query<ListVoicesRequest>,
) -> Result<Json<ApiResponse<VoicesResponse>>, ApiError> {
    let voices = state
        .list_voices_handler
        .handle(ListVoices {
            language_code: req.language_code,
        })
        .await?;

    Ok(Json(ApiResponse::success(VoicesResponse {
        total: voices.len(),
        voices,
    })))
}
