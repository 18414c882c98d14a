//! 应用层错误定义
//!
//! 编排器命令的错误类型（生成失败本身通过通知事件报告，不走这里）

use thiserror::Error;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 编排器不可用（runner 已停止）
    #[error("Orchestrator unavailable: {0}")]
    Unavailable(String),
}

impl ApplicationError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}
