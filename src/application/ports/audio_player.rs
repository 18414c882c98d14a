//! Audio Player Port - 本地播放资源抽象

use thiserror::Error;

use crate::domain::generation::AudioRef;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    #[error("Playback rejected: {0}")]
    Rejected(String),
}

/// Audio Player Port
///
/// 只有编排 runner 持有，调用方需保证先 `stop` 再 `play`
pub trait AudioPlayerPort: Send + Sync {
    /// 开始播放第 `index` 条字幕的语音
    fn play(&self, index: usize, audio: &AudioRef) -> Result<(), PlaybackError>;

    /// 停止当前播放并把进度归零
    fn stop(&self);
}
