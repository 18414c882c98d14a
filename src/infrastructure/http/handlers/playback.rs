//! Playback Handlers
//!
//! 客户端在浏览器拒绝播放时回报，编排器把它作为非致命通知广播

use axum::{extract::State, Json};
use serde::Deserialize;
use std::sync::Arc;

use crate::domain::generation::GenerationSnapshot;
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PlaybackFailedRequest {
    pub message: String,
}

pub async fn report_playback_failure(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PlaybackFailedRequest>,
) -> Result<Json<ApiResponse<GenerationSnapshot>>, ApiError> {
    let snapshot = state
        .orchestrator
        .report_playback_failure(req.message)
        .await?;
    Ok(Json(ApiResponse::success(snapshot)))
}
