//! Image Generator Port - 图片生成服务抽象

use async_trait::async_trait;

use super::RemoteError;
use crate::domain::generation::ImageRef;

/// Image Generator Port
///
/// 以用户原文作为 prompt，返回远程图片引用
#[async_trait]
pub trait ImageGeneratorPort: Send + Sync {
    /// 响应缺少或为空的 `imageUrl` 时返回 `InvalidResponse`
    async fn generate(&self, prompt: &str) -> Result<ImageRef, RemoteError>;
}
