//! Orchestrator Handle - 编排器的调用入口
//!
//! 命令进入 runner 的事件队列，处理完成后返回最新快照

use tokio::sync::{mpsc, oneshot, watch};
use tokio_util::sync::CancellationToken;

use crate::application::error::ApplicationError;
use crate::domain::generation::{Direction, Event, GenerationSnapshot};

/// runner 队列中的消息
pub(crate) enum Message {
    /// 远程调用完成等内部事件
    Event(Event),
    /// 外部命令，处理完后回复快照
    Command {
        event: Event,
        reply: oneshot::Sender<GenerationSnapshot>,
    },
}

#[derive(Clone)]
pub struct OrchestratorHandle {
    queue: mpsc::Sender<Message>,
    snapshot: watch::Receiver<GenerationSnapshot>,
    shutdown: CancellationToken,
}

impl OrchestratorHandle {
    pub(crate) fn new(
        queue: mpsc::Sender<Message>,
        snapshot: watch::Receiver<GenerationSnapshot>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            queue,
            snapshot,
            shutdown,
        }
    }

    /// 更新输入文本（超出上限的部分被截断）
    pub async fn edit_text(
        &self,
        text: impl Into<String>,
    ) -> Result<GenerationSnapshot, ApplicationError> {
        self.command(Event::TextEdited { text: text.into() }).await
    }

    /// 提交文本，开始新的生成周期
    ///
    /// 返回时图片请求已经发出；结果通过快照和事件异步到达
    pub async fn submit(
        &self,
        text: Option<String>,
    ) -> Result<GenerationSnapshot, ApplicationError> {
        self.command(Event::Submitted { text }).await
    }

    pub async fn navigate(
        &self,
        direction: Direction,
    ) -> Result<GenerationSnapshot, ApplicationError> {
        self.command(Event::Navigated { direction }).await
    }

    /// 客户端报告播放被拒绝
    pub async fn report_playback_failure(
        &self,
        message: impl Into<String>,
    ) -> Result<GenerationSnapshot, ApplicationError> {
        self.command(Event::PlaybackFailed {
            message: message.into(),
        })
        .await
    }

    /// 最新快照
    pub fn snapshot(&self) -> GenerationSnapshot {
        self.snapshot.borrow().clone()
    }

    /// 等待快照满足条件
    pub async fn wait_for<F>(&self, predicate: F) -> Result<GenerationSnapshot, ApplicationError>
    where
        F: FnMut(&GenerationSnapshot) -> bool,
    {
        let mut rx = self.snapshot.clone();
        let snapshot = rx
            .wait_for(predicate)
            .await
            .map_err(|_| ApplicationError::unavailable("runner stopped"))?;
        Ok(snapshot.clone())
    }

    /// 停止 runner，取消所有进行中的请求
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    /// runner 是否已经退出
    pub fn queue_closed(&self) -> bool {
        self.queue.is_closed()
    }

    async fn command(&self, event: Event) -> Result<GenerationSnapshot, ApplicationError> {
        let (reply, rx) = oneshot::channel();
        self.queue
            .send(Message::Command { event, reply })
            .await
            .map_err(|_| ApplicationError::unavailable("runner stopped"))?;
        rx.await
            .map_err(|_| ApplicationError::unavailable("runner dropped the command"))
    }
}
