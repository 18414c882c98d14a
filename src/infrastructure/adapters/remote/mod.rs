//! Remote Adapters - 外部生成服务的 HTTP 客户端
//!
//! 三个接口都是 POST JSON，只有 200 视为成功，响应体是一个 JSON 对象

mod image_client;
mod script_client;
mod tts_client;

pub use image_client::HttpImageClient;
pub use script_client::HttpScriptClient;
pub use tts_client::HttpTtsClient;

use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

use crate::application::ports::RemoteError;

/// HTTP 客户端配置
#[derive(Debug, Clone)]
pub struct RemoteClientConfig {
    /// 接口完整 URL
    pub url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl RemoteClientConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_secs: 60,
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    fn build_client(&self) -> Result<Client, RemoteError> {
        Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()
            .map_err(|e| RemoteError::NetworkError(e.to_string()))
    }
}

fn map_reqwest_error(e: reqwest::Error) -> RemoteError {
    if e.is_timeout() {
        RemoteError::Timeout
    } else if e.is_connect() {
        RemoteError::NetworkError(format!("Cannot connect to service: {}", e))
    } else {
        RemoteError::NetworkError(e.to_string())
    }
}

/// 发送 JSON 请求并解析 JSON 响应
async fn post_json<B, R>(client: &Client, url: &str, body: &B) -> Result<R, RemoteError>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let response = client
        .post(url)
        .json(body)
        .send()
        .await
        .map_err(map_reqwest_error)?;

    let status = response.status();
    // 其他 2xx 同样视为失败
    if status != StatusCode::OK {
        let body = response.text().await.unwrap_or_default();
        return Err(RemoteError::ServiceError {
            status: status.as_u16(),
            body,
        });
    }

    let text = response.text().await.map_err(map_reqwest_error)?;
    serde_json::from_str(&text)
        .map_err(|e| RemoteError::InvalidResponse(format!("Malformed response body: {}", e)))
}

/// 非空字段，否则视为响应无效
fn required_field(value: Option<String>, field: &str) -> Result<String, RemoteError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(RemoteError::InvalidResponse(format!(
            "Missing `{}` in response",
            field
        ))),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = RemoteClientConfig::new("http://example.com/tts").with_timeout(15);
        assert_eq!(config.url, "http://example.com/tts");
        assert_eq!(config.timeout_secs, 15);
    }

    #[test]
    fn test_required_field() {
        assert_eq!(
            required_field(Some("https://x".into()), "imageUrl"),
            Ok("https://x".to_string())
        );
        assert!(matches!(
            required_field(Some("".into()), "imageUrl"),
            Err(RemoteError::InvalidResponse(_))
        ));
        assert!(matches!(
            required_field(None, "imageUrl"),
            Err(RemoteError::InvalidResponse(_))
        ));
    }
}
