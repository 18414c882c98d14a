//! Application Ports - 出站端口定义
//!
//! 定义编排层与外部服务、本地播放资源之间的抽象接口

mod audio_player;
mod image_generator;
mod remote_error;
mod script_generator;
mod speech_synthesizer;

pub use audio_player::{AudioPlayerPort, PlaybackError};
pub use image_generator::ImageGeneratorPort;
pub use remote_error::RemoteError;
pub use script_generator::{ChatMessage, ScriptGeneratorPort, ScriptRequest};
pub use speech_synthesizer::SpeechSynthesizerPort;
