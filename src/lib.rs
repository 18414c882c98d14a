//! Stillreel - 静态图片字幕旁白生成
//!
//! 架构设计: DDD + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Generation Context: 输入文本、图片、字幕序列、语音缓存与生成状态机
//!
//! 应用层 (application/):
//! - Ports: 图片、字幕、语音三个远程服务和本地播放资源
//! - Orchestrator: 单任务 runner 执行状态机产生的副作用
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: reqwest 远程客户端、WebSocket 播放器、测试用假实现
//! - HTTP: JSON API + WebSocket
//! - Events: WebSocket 事件发布

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
