//! Playback Guard - 唯一播放资源的独占访问
//!
//! 先停止正在播放的语音，再开始新的播放，对 runner 来说是一个操作

use std::sync::Arc;

use crate::application::ports::{AudioPlayerPort, PlaybackError};
use crate::domain::generation::AudioRef;

pub struct PlaybackGuard {
    player: Arc<dyn AudioPlayerPort>,
    /// 正在播放的字幕索引
    active: Option<usize>,
}

impl PlaybackGuard {
    pub fn new(player: Arc<dyn AudioPlayerPort>) -> Self {
        Self {
            player,
            active: None,
        }
    }

    /// stop-if-active 然后 start
    pub fn replace(&mut self, index: usize, audio: &AudioRef) -> Result<(), PlaybackError> {
        self.stop();
        self.player.play(index, audio)?;
        self.active = Some(index);
        tracing::debug!(index = index, audio_url = %audio, "Playback started");
        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(index) = self.active.take() {
            self.player.stop();
            tracing::debug!(index = index, "Playback stopped");
        }
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }
}
