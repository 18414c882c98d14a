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
    /// 编排 runner 是否仍在运行
    pub orchestrator: &'static str,
}

/// 健康检查
pub async fn ping(State(state): State<Arc<AppState>>) -> Json<PingResponse> {
    let orchestrator = if state.orchestrator.queue_closed() {
        "stopped"
    } else {
        "running"
    };
    Json(PingResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        orchestrator,
    })
}
