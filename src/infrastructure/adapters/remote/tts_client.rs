//! HTTP TTS Client - 调用外部 TTS 接口
//!
//! POST {url}
//! Request: {"text": "..."}
//! Response: {"audioUrl": "https://..."}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{post_json, required_field, RemoteClientConfig};
use crate::application::ports::{RemoteError, SpeechSynthesizerPort};
use crate::domain::generation::AudioRef;

#[derive(Debug, Serialize)]
struct TtsHttpRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TtsHttpResponse {
    audio_url: Option<String>,
}

/// HTTP TTS 客户端
pub struct HttpTtsClient {
    client: Client,
    config: RemoteClientConfig,
}

impl HttpTtsClient {
    pub fn new(config: RemoteClientConfig) -> Result<Self, RemoteError> {
        let client = config.build_client()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl SpeechSynthesizerPort for HttpTtsClient {
    async fn synthesize(&self, text: &str) -> Result<AudioRef, RemoteError> {
        tracing::debug!(
            url = %self.config.url,
            text_len = text.len(),
            "Sending TTS request"
        );

        let response: TtsHttpResponse =
            post_json(&self.client, &self.config.url, &TtsHttpRequest { text }).await?;
        let url = required_field(response.audio_url, "audioUrl")?;

        tracing::debug!(audio_url = %url, "TTS completed");
        AudioRef::new(url)
            .ok_or_else(|| RemoteError::InvalidResponse("Empty `audioUrl`".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::remote::test_support::serve;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};
    use std::time::Duration;

    #[tokio::test]
    async fn test_synthesize_reads_audio_url() {
        let router = Router::new().route(
            "/tts",
            post(|Json(body): Json<Value>| async move {
                let text = body["text"].as_str().unwrap_or_default().to_string();
                Json(json!({ "audioUrl": format!("https://tts/{}.mp3", text) }))
            }),
        );
        let base = serve(router).await;
        let client = HttpTtsClient::new(RemoteClientConfig::new(format!("{}/tts", base))).unwrap();

        let audio = client.synthesize("hello").await.unwrap();
        assert_eq!(audio.as_str(), "https://tts/hello.mp3");
    }

    #[tokio::test]
    async fn test_empty_audio_url_is_invalid() {
        let router = Router::new().route("/tts", post(|| async { Json(json!({ "audioUrl": "" })) }));
        let base = serve(router).await;
        let client = HttpTtsClient::new(RemoteClientConfig::new(format!("{}/tts", base))).unwrap();

        assert!(matches!(
            client.synthesize("x").await,
            Err(RemoteError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_client_timeout() {
        let router = Router::new().route(
            "/tts",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                StatusCode::OK
            }),
        );
        let base = serve(router).await;
        let client =
            HttpTtsClient::new(RemoteClientConfig::new(format!("{}/tts", base)).with_timeout(1))
                .unwrap();

        assert_eq!(client.synthesize("x").await, Err(RemoteError::Timeout));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let client =
            HttpTtsClient::new(RemoteClientConfig::new("http://127.0.0.1:1/tts")).unwrap();
        assert!(matches!(
            client.synthesize("x").await,
            Err(RemoteError::NetworkError(_))
        ));
    }

    #[tokio::test]
    async fn test_created_status_is_rejected() {
        let router = Router::new().route(
            "/tts",
            post(|| async {
                (
                    StatusCode::CREATED,
                    Json(json!({ "audioUrl": "https://tts/x.mp3" })),
                )
            }),
        );
        let base = serve(router).await;
        let client = HttpTtsClient::new(RemoteClientConfig::new(format!("{}/tts", base))).unwrap();

        assert!(matches!(
            client.synthesize("x").await,
            Err(RemoteError::ServiceError { status: 201, .. })
        ));
    }
}
