//! Speech Synthesizer Port - 语音合成服务抽象

use async_trait::async_trait;

use super::RemoteError;
use crate::domain::generation::AudioRef;

/// Speech Synthesizer Port
///
/// 每次只合成一条字幕
#[async_trait]
pub trait SpeechSynthesizerPort: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<AudioRef, RemoteError>;
}
