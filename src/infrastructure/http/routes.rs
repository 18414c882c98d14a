//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping              GET   健康检查
//! - /api/state             GET   当前状态快照
//! - /api/text              POST  编辑输入文本
//! - /api/submit            POST  提交文本，开始生成
//! - /api/navigate          POST  切换字幕（next / prev，循环）
//! - /api/playback/failed   POST  客户端回报播放失败
//! - /ws/events             WS    状态、通知、播放指令推送

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/api", api_routes())
        .route("/ws/events", get(handlers::events_websocket_handler))
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/state", get(handlers::get_state))
        .route("/text", post(handlers::edit_text))
        .route("/submit", post(handlers::submit))
        .route("/navigate", post(handlers::navigate))
        .route("/playback/failed", post(handlers::report_playback_failure))
}
