//! Scripted Fake Clients - 用于测试的远程服务
//!
//! 按请求内容返回预设结果，可为每个请求单独设置延迟，并记录所有调用

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::application::ports::{
    ImageGeneratorPort, RemoteError, ScriptGeneratorPort, ScriptRequest, SpeechSynthesizerPort,
};
use crate::domain::generation::{AudioRef, ImageRef};

/// 预设响应的假客户端
pub struct ScriptedFake<T> {
    default: Result<T, RemoteError>,
    default_delay: Duration,
    scripted: HashMap<String, (Duration, Result<T, RemoteError>)>,
    calls: Mutex<Vec<String>>,
}

pub type FakeImageGenerator = ScriptedFake<ImageRef>;
pub type FakeScriptGenerator = ScriptedFake<String>;
pub type FakeSpeechSynthesizer = ScriptedFake<AudioRef>;

impl<T: Clone + Send + Sync> ScriptedFake<T> {
    /// 默认返回成功
    pub fn ok(value: T) -> Self {
        Self::with_default(Ok(value))
    }

    /// 默认返回错误
    pub fn err(error: RemoteError) -> Self {
        Self::with_default(Err(error))
    }

    fn with_default(default: Result<T, RemoteError>) -> Self {
        Self {
            default,
            default_delay: Duration::ZERO,
            scripted: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.default_delay = delay;
        self
    }

    /// 为某个请求内容预设延迟和结果
    pub fn script(
        mut self,
        key: impl Into<String>,
        delay: Duration,
        result: Result<T, RemoteError>,
    ) -> Self {
        self.scripted.insert(key.into(), (delay, result));
        self
    }

    /// 按调用顺序记录的请求内容
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls().len()
    }

    async fn respond(&self, key: &str) -> Result<T, RemoteError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(key.to_string());
        }

        let (delay, result) = self
            .scripted
            .get(key)
            .cloned()
            .unwrap_or_else(|| (self.default_delay, self.default.clone()));

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        result
    }
}

#[async_trait]
impl ImageGeneratorPort for ScriptedFake<ImageRef> {
    async fn generate(&self, prompt: &str) -> Result<ImageRef, RemoteError> {
        self.respond(prompt).await
    }
}

#[async_trait]
impl ScriptGeneratorPort for ScriptedFake<String> {
    /// 以用户消息内容作为预设 key
    async fn generate(&self, request: ScriptRequest) -> Result<String, RemoteError> {
        let key = request
            .messages
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default();
        self.respond(&key).await
    }
}

#[async_trait]
impl SpeechSynthesizerPort for ScriptedFake<AudioRef> {
    async fn synthesize(&self, text: &str) -> Result<AudioRef, RemoteError> {
        self.respond(text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_response_overrides_default() {
        let fake = FakeSpeechSynthesizer::ok(AudioRef::new("https://tts/default.mp3").unwrap())
            .script(
                "special",
                Duration::from_millis(5),
                Err(RemoteError::InvalidResponse("nope".into())),
            );

        assert!(fake.synthesize("special").await.is_err());
        assert_eq!(
            fake.synthesize("other").await.unwrap().as_str(),
            "https://tts/default.mp3"
        );
        assert_eq!(fake.calls(), vec!["special".to_string(), "other".to_string()]);
    }
}
