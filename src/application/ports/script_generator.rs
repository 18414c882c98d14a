//! Script Generator Port - 字幕脚本生成服务抽象

use async_trait::async_trait;
use serde::Serialize;

use super::RemoteError;

/// 对话消息
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// 脚本生成请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRequest {
    /// 固定的拆分指令
    pub system_message: String,
    pub ai_model: String,
    pub messages: Vec<ChatMessage>,
}

impl ScriptRequest {
    pub fn for_passage(
        system_message: impl Into<String>,
        ai_model: impl Into<String>,
        passage: impl Into<String>,
    ) -> Self {
        Self {
            system_message: system_message.into(),
            ai_model: ai_model.into(),
            messages: vec![ChatMessage::user(passage)],
        }
    }
}

/// Script Generator Port
///
/// 返回原始 `message` 字符串，解析由调用方负责
#[async_trait]
pub trait ScriptGeneratorPort: Send + Sync {
    async fn generate(&self, request: ScriptRequest) -> Result<String, RemoteError>;
}
