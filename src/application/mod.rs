//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（三个远程生成服务、本地播放资源）
//! - orchestrator: 生成周期的副作用执行器和调用入口
//! - error: 应用层错误定义

pub mod error;
pub mod orchestrator;
pub mod ports;

pub use error::ApplicationError;

pub use orchestrator::{
    GenerationRunner, OrchestratorConfig, OrchestratorHandle, PlaybackGuard, RemoteServices,
};

pub use ports::{
    AudioPlayerPort, ChatMessage, ImageGeneratorPort, PlaybackError, RemoteError,
    ScriptGeneratorPort, ScriptRequest, SpeechSynthesizerPort,
};
