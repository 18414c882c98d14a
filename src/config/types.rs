//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::time::Duration;

use crate::domain::generation::{TtsStrategy, MAX_INPUT_CHARS};

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 远程生成服务
    #[serde(default)]
    pub endpoints: EndpointsConfig,

    /// 生成流程配置
    #[serde(default)]
    pub generation: GenerationConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5060
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 远程服务地址
#[derive(Debug, Clone, Deserialize)]
pub struct EndpointsConfig {
    #[serde(default = "default_image_url")]
    pub image_url: String,

    #[serde(default = "default_script_url")]
    pub script_url: String,

    #[serde(default = "default_tts_url")]
    pub tts_url: String,

    /// 单次请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

const CLOUD_FUNCTIONS_BASE: &str = "https://us-central1-chat-window-widget.cloudfunctions.net";

fn default_image_url() -> String {
    format!("{}/gpt-dalle-request", CLOUD_FUNCTIONS_BASE)
}

fn default_script_url() -> String {
    format!("{}/gpt-ai-request", CLOUD_FUNCTIONS_BASE)
}

fn default_tts_url() -> String {
    format!("{}/google-tts", CLOUD_FUNCTIONS_BASE)
}

fn default_timeout() -> u64 {
    60
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            image_url: default_image_url(),
            script_url: default_script_url(),
            tts_url: default_tts_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl EndpointsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// 生成流程配置
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    /// 输入文本字符上限
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,

    /// 字幕服务使用的模型
    #[serde(default = "default_ai_model")]
    pub ai_model: String,

    /// 发给字幕服务的系统提示
    #[serde(default = "default_system_message")]
    pub system_message: String,

    /// 语音解析策略: lazy 或 eager
    #[serde(default)]
    pub tts_strategy: TtsStrategy,
}

fn default_max_input_chars() -> usize {
    MAX_INPUT_CHARS
}

fn default_ai_model() -> String {
    "gpt-4".to_string()
}

pub(crate) fn default_system_message() -> String {
    concat!(
        "The user wants to turn the passage below into a still image movie. ",
        "Imagine the passage as a short film script, then reduce it to a sequence of ",
        "subtitles (one or more) that could be overlaid, one at a time, on a single image ",
        "depicting the scene. Reply with a JSON array of quoted strings in playback order ",
        "and nothing else."
    )
    .to_string()
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_input_chars: default_max_input_chars(),
            ai_model: default_ai_model(),
            system_message: default_system_message(),
            tts_strategy: TtsStrategy::default(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
