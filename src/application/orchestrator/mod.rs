//! Generation Orchestrator
//!
//! - runner: 事件循环与副作用执行
//! - handle: 对外的命令入口
//! - playback_guard: 播放资源的 stop-before-start 约束

mod handle;
mod playback_guard;
mod runner;


pub use handle::OrchestratorHandle;
pub use playback_guard::PlaybackGuard;
pub use runner::{GenerationRunner, OrchestratorConfig, RemoteServices};
