//! HTTP Image Client - 调用外部图片生成接口
//!
//! POST {url}
//! Request: {"prompt": "..."}
//! Response: {"imageUrl": "https://..."}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{post_json, required_field, RemoteClientConfig};
use crate::application::ports::{ImageGeneratorPort, RemoteError};
use crate::domain::generation::ImageRef;

#[derive(Debug, Serialize)]
struct ImageHttpRequest<'a> {
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageHttpResponse {
    image_url: Option<String>,
}

pub struct HttpImageClient {
    client: Client,
    config: RemoteClientConfig,
}

impl HttpImageClient {
    pub fn new(config: RemoteClientConfig) -> Result<Self, RemoteError> {
        let client = config.build_client()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl ImageGeneratorPort for HttpImageClient {
    async fn generate(&self, prompt: &str) -> Result<ImageRef, RemoteError> {
        tracing::debug!(
            url = %self.config.url,
            prompt_len = prompt.len(),
            "Sending image generation request"
        );

        let response: ImageHttpResponse =
            post_json(&self.client, &self.config.url, &ImageHttpRequest { prompt }).await?;
        let url = required_field(response.image_url, "imageUrl")?;

        tracing::info!(image_url = %url, "Image generation completed");
        ImageRef::new(url)
            .ok_or_else(|| RemoteError::InvalidResponse("Empty `imageUrl`".to_string()))
    }
}
