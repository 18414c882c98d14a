//! Generation Handlers

use axum::{extract::State, Json};
use serde::Deserialize;
use std::sync::Arc;

use crate::application::ApplicationError;
use crate::domain::generation::{Direction, GenerationSnapshot};
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

type SnapshotResponse = Result<Json<ApiResponse<GenerationSnapshot>>, ApiError>;

/// 当前状态快照
pub async fn get_state(State(state): State<Arc<AppState>>) -> Json<ApiResponse<GenerationSnapshot>> {
    Json(ApiResponse::success(state.orchestrator.snapshot()))
}

// ============================================================================
// Edit Text
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct EditTextRequest {
    pub text: String,
}

pub async fn edit_text(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EditTextRequest>,
) -> SnapshotResponse {
    let snapshot = state.orchestrator.edit_text(req.text).await?;
    Ok(Json(ApiResponse::success(snapshot)))
}

// ============================================================================
// Submit
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct SubmitRequest {
    /// 为空时使用已编辑的文本
    #[serde(default)]
    pub text: Option<String>,
}

pub async fn submit(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SubmitRequest>,
) -> SnapshotResponse {
    let snapshot = state.orchestrator.submit(req.text).await?;
    tracing::info!(cycle = snapshot.cycle, chars = snapshot.input_chars, "Generation submitted");
    Ok(Json(ApiResponse::success(snapshot)))
}

// ============================================================================
// Navigate
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub direction: String,
}

pub async fn navigate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NavigateRequest>,
) -> SnapshotResponse {
    let direction: Direction = req
        .direction
        .parse()
        .map_err(ApplicationError::validation)?;
    let snapshot = state.orchestrator.navigate(direction).await?;
    Ok(Json(ApiResponse::success(snapshot)))
}
