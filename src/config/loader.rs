//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::{default_system_message, AppConfig};
use crate::domain::generation::MAX_INPUT_CHARS;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 环境变量前缀
const ENV_PREFIX: &str = "STILLREEL";

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `STILLREEL_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `STILLREEL_SERVER__PORT=8080`
/// - `STILLREEL_ENDPOINTS__TTS_URL=http://localhost:9000/tts`
/// - `STILLREEL_ENDPOINTS__TIMEOUT_SECS=30`
/// - `STILLREEL_GENERATION__TTS_STRATEGY=eager`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let defaults = AppConfig::default();
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", defaults.server.host.as_str())?
        .set_default("server.port", defaults.server.port as u64)?
        .set_default("endpoints.image_url", defaults.endpoints.image_url.as_str())?
        .set_default("endpoints.script_url", defaults.endpoints.script_url.as_str())?
        .set_default("endpoints.tts_url", defaults.endpoints.tts_url.as_str())?
        .set_default("endpoints.timeout_secs", defaults.endpoints.timeout_secs)?
        .set_default(
            "generation.max_input_chars",
            defaults.generation.max_input_chars as u64,
        )?
        .set_default("generation.ai_model", defaults.generation.ai_model.as_str())?
        .set_default("generation.system_message", default_system_message())?
        .set_default(
            "generation.tts_strategy",
            defaults.generation.tts_strategy.as_str(),
        )?
        .set_default("log.level", defaults.log.level.as_str())?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: STILLREEL_ENDPOINTS__IMAGE_URL=http://localhost:9000/image
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    for (name, url) in [
        ("Image", &config.endpoints.image_url),
        ("Script", &config.endpoints.script_url),
        ("TTS", &config.endpoints.tts_url),
    ] {
        if url.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "{} URL cannot be empty",
                name
            )));
        }
    }

    if config.endpoints.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Endpoint timeout cannot be 0".to_string(),
        ));
    }

    if config.generation.max_input_chars == 0 {
        return Err(ConfigError::ValidationError(
            "Max input chars cannot be 0".to_string(),
        ));
    }

    if config.generation.max_input_chars > MAX_INPUT_CHARS {
        return Err(ConfigError::ValidationError(format!(
            "Max input chars cannot exceed {}",
            MAX_INPUT_CHARS
        )));
    }

    if config.generation.ai_model.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "AI model cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Image URL: {}", config.endpoints.image_url);
    tracing::info!("Script URL: {}", config.endpoints.script_url);
    tracing::info!("TTS URL: {}", config.endpoints.tts_url);
    tracing::info!("Request Timeout: {}s", config.endpoints.timeout_secs);
    tracing::info!("Max Input Chars: {}", config.generation.max_input_chars);
    tracing::info!("AI Model: {}", config.generation.ai_model);
    tracing::info!("TTS Strategy: {}", config.generation.tts_strategy.as_str());
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
