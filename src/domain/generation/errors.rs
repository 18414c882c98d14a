//! Generation Context - Errors

use serde::Serialize;
use thiserror::Error;

/// 生成流程中的步骤
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Image,
    Subtitles,
    Audio,
    Playback,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Image => "image",
            Step::Subtitles => "subtitles",
            Step::Audio => "audio",
            Step::Playback => "playback",
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("Error generating image: {0}")]
    ImageGenerationFailed(String),

    #[error("Error generating subtitles: {0}")]
    SubtitleGenerationFailed(String),

    #[error("Error generating subtitles: {0}")]
    SubtitleGenerationInvalid(String),

    #[error("Error fetching audio URL: {0}")]
    AudioResolutionFailed(String),

    #[error("Error playing audio: {0}")]
    PlaybackFailed(String),

    #[error("Timed out waiting for {step} after {millis}ms")]
    Timeout { step: Step, millis: u64 },
}

impl GenerationError {
    /// 出错的步骤
    pub fn step(&self) -> Step {
        match self {
            GenerationError::ImageGenerationFailed(_) => Step::Image,
            GenerationError::SubtitleGenerationFailed(_)
            | GenerationError::SubtitleGenerationInvalid(_) => Step::Subtitles,
            GenerationError::AudioResolutionFailed(_) => Step::Audio,
            GenerationError::PlaybackFailed(_) => Step::Playback,
            GenerationError::Timeout { step, .. } => *step,
        }
    }

    /// 致命错误会中止当前生成周期；语音和播放错误不影响图片与字幕显示
    pub fn is_fatal(&self) -> bool {
        matches!(self.step(), Step::Image | Step::Subtitles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatality_by_step() {
        assert!(GenerationError::ImageGenerationFailed("x".into()).is_fatal());
        assert!(GenerationError::SubtitleGenerationInvalid("x".into()).is_fatal());
        assert!(!GenerationError::AudioResolutionFailed("x".into()).is_fatal());
        assert!(!GenerationError::PlaybackFailed("x".into()).is_fatal());
        assert!(GenerationError::Timeout {
            step: Step::Image,
            millis: 5000
        }
        .is_fatal());
        assert!(!GenerationError::Timeout {
            step: Step::Audio,
            millis: 5000
        }
        .is_fatal());
    }

    #[test]
    fn test_message_names_step() {
        let err = GenerationError::ImageGenerationFailed("HTTP 500".into());
        assert_eq!(err.to_string(), "Error generating image: HTTP 500");
    }
}
