//! Application State

use std::sync::Arc;

use crate::application::OrchestratorHandle;
use crate::infrastructure::events::EventPublisher;

/// 应用状态
///
/// 所有生成操作都经由编排器句柄进入 runner 的事件队列
pub struct AppState {
    pub orchestrator: OrchestratorHandle,
    pub event_publisher: Arc<EventPublisher>,
}

impl AppState {
    pub fn new(orchestrator: OrchestratorHandle, event_publisher: Arc<EventPublisher>) -> Self {
        Self {
            orchestrator,
            event_publisher,
        }
    }
}
