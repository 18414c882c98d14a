//! HTTP Script Client - 调用外部文本生成接口
//!
//! POST {url}
//! Request: {"systemMessage": "...", "aiModel": "...", "messages": [{"role": "user", "content": "..."}]}
//! Response: {"message": "[\"...\", \"...\"]"}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{post_json, required_field, RemoteClientConfig};
use crate::application::ports::{ChatMessage, RemoteError, ScriptGeneratorPort, ScriptRequest};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScriptHttpRequest<'a> {
    system_message: &'a str,
    ai_model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct ScriptHttpResponse {
    message: Option<String>,
}

pub struct HttpScriptClient {
    client: Client,
    config: RemoteClientConfig,
}

impl HttpScriptClient {
    pub fn new(config: RemoteClientConfig) -> Result<Self, RemoteError> {
        let client = config.build_client()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl ScriptGeneratorPort for HttpScriptClient {
    async fn generate(&self, request: ScriptRequest) -> Result<String, RemoteError> {
        let body = ScriptHttpRequest {
            system_message: &request.system_message,
            ai_model: &request.ai_model,
            messages: &request.messages,
        };

        tracing::debug!(
            url = %self.config.url,
            ai_model = %request.ai_model,
            messages = request.messages.len(),
            "Sending script generation request"
        );

        let response: ScriptHttpResponse = post_json(&self.client, &self.config.url, &body).await?;
        let message = required_field(response.message, "message")?;

        tracing::info!(message_len = message.len(), "Script generation completed");
        Ok(message)
    }
}
