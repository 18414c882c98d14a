//! Event Publisher Implementation
//!
//! WebSocket 事件推送实现（单用户，只有一个全局通道）

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;

use crate::domain::generation::{GenerationError, GenerationSnapshot, Step};

/// WebSocket 事件类型
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum WsEvent {
    /// 状态变更（每次处理完事件后推送）
    StateChanged { snapshot: GenerationSnapshot },
    /// 错误通知
    Notification {
        step: Step,
        message: String,
        fatal: bool,
        at: DateTime<Utc>,
    },
    /// 开始播放某条字幕的语音
    PlaybackStarted { index: usize, audio_url: String },
    /// 停止播放并归零
    PlaybackStopped,
}

/// 事件发布器
pub struct EventPublisher {
    channel: broadcast::Sender<WsEvent>,
}

impl EventPublisher {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(100);
        Self { channel: tx }
    }

    /// 订阅所有事件
    pub fn subscribe(&self) -> broadcast::Receiver<WsEvent> {
        self.channel.subscribe()
    }

    /// 当前订阅者数量
    pub fn receiver_count(&self) -> usize {
        self.channel.receiver_count()
    }

    pub fn publish_state(&self, snapshot: GenerationSnapshot) {
        self.publish(WsEvent::StateChanged { snapshot });
    }

    /// 发布错误通知
    pub fn publish_notification(&self, error: &GenerationError) {
        self.publish(WsEvent::Notification {
            step: error.step(),
            message: error.to_string(),
            fatal: error.is_fatal(),
            at: Utc::now(),
        });
    }

    pub fn publish_playback_started(&self, index: usize, audio_url: &str) {
        self.publish(WsEvent::PlaybackStarted {
            index,
            audio_url: audio_url.to_string(),
        });
    }

    pub fn publish_playback_stopped(&self) {
        self.publish(WsEvent::PlaybackStopped);
    }

    fn publish(&self, event: WsEvent) {
        if let Err(e) = self.channel.send(event) {
            tracing::debug!(error = %e, "Failed to publish event (no receivers)");
        }
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}
