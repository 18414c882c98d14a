//! Broadcast Audio Player - 通过 WebSocket 驱动客户端播放
//!
//! 真正发声的是浏览器；服务端只发布播放/停止指令，
//! 客户端播放失败时通过 `/api/playback/failed` 回报

use std::sync::Arc;

use crate::application::ports::{AudioPlayerPort, PlaybackError};
use crate::domain::generation::AudioRef;
use crate::infrastructure::events::EventPublisher;

pub struct BroadcastAudioPlayer {
    event_publisher: Arc<EventPublisher>,
}

impl BroadcastAudioPlayer {
    pub fn new(event_publisher: Arc<EventPublisher>) -> Self {
        Self { event_publisher }
    }
}

impl AudioPlayerPort for BroadcastAudioPlayer {
    fn play(&self, index: usize, audio: &AudioRef) -> Result<(), PlaybackError> {
        if self.event_publisher.receiver_count() == 0 {
            tracing::debug!(index = index, "No playback client connected");
        }
        self.event_publisher
            .publish_playback_started(index, audio.as_str());
        Ok(())
    }

    fn stop(&self) {
        self.event_publisher.publish_playback_stopped();
    }
}
