//! Generation Runner - 副作用执行器
//!
//! 单个任务消费事件队列：外部命令和远程调用的完成事件在同一个逻辑线程上交错处理。
//! 状态转移交给 `GenerationState`，这里只负责执行它返回的副作用

use futures_util::future::join_all;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;

use super::handle::{Message, OrchestratorHandle};
use super::playback_guard::PlaybackGuard;
use crate::application::ports::{
    AudioPlayerPort, ImageGeneratorPort, RemoteError, ScriptGeneratorPort, ScriptRequest,
    SpeechSynthesizerPort,
};
use crate::domain::generation::{
    AudioRef, Effect, Event, GenerationError, GenerationSnapshot, GenerationState, ImageRef, Step,
    SubtitleSequence, TtsStrategy, MAX_INPUT_CHARS,
};
use crate::infrastructure::events::EventPublisher;

/// 编排器配置
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    pub strategy: TtsStrategy,
    pub max_input_chars: usize,
    /// 单次远程调用超时
    pub call_timeout: Duration,
    pub ai_model: String,
    pub system_message: String,
    /// 事件队列容量
    pub queue_capacity: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            strategy: TtsStrategy::Lazy,
            max_input_chars: MAX_INPUT_CHARS,
            call_timeout: Duration::from_secs(60),
            ai_model: "gpt-4".to_string(),
            system_message: String::new(),
            queue_capacity: 256,
        }
    }
}

/// 三个远程服务
#[derive(Clone)]
pub struct RemoteServices {
    pub image: Arc<dyn ImageGeneratorPort>,
    pub script: Arc<dyn ScriptGeneratorPort>,
    pub speech: Arc<dyn SpeechSynthesizerPort>,
}

/// 生成编排 runner
///
/// 独占状态记录和播放资源
pub struct GenerationRunner {
    config: OrchestratorConfig,
    state: GenerationState,
    queue_rx: mpsc::Receiver<Message>,
    queue_tx: mpsc::Sender<Message>,
    snapshot_tx: watch::Sender<GenerationSnapshot>,
    services: RemoteServices,
    playback: PlaybackGuard,
    event_publisher: Arc<EventPublisher>,
    shutdown: CancellationToken,
    cycle_cancel: CancellationToken,
    narration_cancel: CancellationToken,
    batch_cancel: CancellationToken,
}

impl GenerationRunner {
    pub fn new(
        config: OrchestratorConfig,
        services: RemoteServices,
        player: Arc<dyn AudioPlayerPort>,
        event_publisher: Arc<EventPublisher>,
    ) -> (Self, OrchestratorHandle) {
        let (queue_tx, queue_rx) = mpsc::channel(config.queue_capacity.max(1));
        let state = GenerationState::new(config.strategy, config.max_input_chars);
        let (snapshot_tx, snapshot_rx) = watch::channel(state.snapshot());
        let shutdown = CancellationToken::new();
        let handle = OrchestratorHandle::new(queue_tx.clone(), snapshot_rx, shutdown.clone());

        let runner = Self {
            config,
            state,
            queue_rx,
            queue_tx,
            snapshot_tx,
            services,
            playback: PlaybackGuard::new(player),
            event_publisher,
            shutdown,
            cycle_cancel: CancellationToken::new(),
            narration_cancel: CancellationToken::new(),
            batch_cancel: CancellationToken::new(),
        };
        (runner, handle)
    }

    /// 创建 runner 并在后台启动
    pub fn spawn(
        config: OrchestratorConfig,
        services: RemoteServices,
        player: Arc<dyn AudioPlayerPort>,
        event_publisher: Arc<EventPublisher>,
    ) -> OrchestratorHandle {
        let (runner, handle) = Self::new(config, services, player, event_publisher);
        tokio::spawn(runner.run());
        handle
    }

    /// 启动事件循环
    pub async fn run(mut self) {
        tracing::info!(
            strategy = self.config.strategy.as_str(),
            timeout_ms = self.config.call_timeout.as_millis() as u64,
            max_input_chars = self.config.max_input_chars,
            "GenerationRunner started"
        );

        loop {
            let message = tokio::select! {
                _ = self.shutdown.cancelled() => break,
                message = self.queue_rx.recv() => match message {
                    Some(message) => message,
                    None => break,
                },
            };

            let (event, reply) = match message {
                Message::Event(event) => (event, None),
                Message::Command { event, reply } => (event, Some(reply)),
            };

            self.dispatch(event);

            let snapshot = self.state.snapshot();
            self.snapshot_tx.send_replace(snapshot.clone());
            self.event_publisher.publish_state(snapshot.clone());
            if let Some(reply) = reply {
                let _ = reply.send(snapshot);
            }
        }

        self.cycle_cancel.cancel();
        self.narration_cancel.cancel();
        self.batch_cancel.cancel();
        self.playback.stop();
        tracing::info!("GenerationRunner stopped");
    }

    /// 处理一个事件及其同步产生的后续事件
    fn dispatch(&mut self, event: Event) {
        let mut pending = VecDeque::from([event]);
        while let Some(event) = pending.pop_front() {
            for effect in self.state.handle(event) {
                if let Some(follow_up) = self.execute(effect) {
                    pending.push_back(follow_up);
                }
            }
        }
    }

    fn execute(&mut self, effect: Effect) -> Option<Event> {
        match effect {
            Effect::CancelCycle => {
                self.cycle_cancel.cancel();
                self.cycle_cancel = CancellationToken::new();
                None
            }
            Effect::CancelNarration => {
                self.narration_cancel.cancel();
                self.narration_cancel = CancellationToken::new();
                None
            }
            Effect::RequestImage { cycle, prompt } => {
                tracing::info!(
                    cycle = %cycle,
                    prompt_chars = prompt.chars().count(),
                    "Requesting image"
                );
                let image = self.services.image.clone();
                let timeout = self.config.call_timeout;
                self.spawn_call(
                    self.cycle_cancel.clone(),
                    Step::Image,
                    async move { call_remote(Step::Image, timeout, image.generate(&prompt)).await },
                    move |result: Result<ImageRef, GenerationError>| match result {
                        Ok(image) => Event::ImageGenerated { cycle, image },
                        Err(error) => Event::ImageFailed { cycle, error },
                    },
                );
                None
            }
            Effect::RequestSubtitles { cycle, text } => {
                tracing::info!(cycle = %cycle, "Requesting subtitles");
                let script = self.services.script.clone();
                let timeout = self.config.call_timeout;
                let request = ScriptRequest::for_passage(
                    self.config.system_message.clone(),
                    self.config.ai_model.clone(),
                    text,
                );
                self.spawn_call(
                    self.cycle_cancel.clone(),
                    Step::Subtitles,
                    async move {
                        let message =
                            call_remote(Step::Subtitles, timeout, script.generate(request)).await?;
                        let subtitles = SubtitleSequence::parse(&message)?;
                        tracing::debug!(
                            cycle = %cycle,
                            subtitles = ?subtitles.items(),
                            "Subtitles parsed"
                        );
                        Ok::<_, GenerationError>(subtitles)
                    },
                    move |result: Result<SubtitleSequence, GenerationError>| match result {
                        Ok(subtitles) => Event::SubtitlesGenerated { cycle, subtitles },
                        Err(error) => Event::SubtitlesFailed { cycle, error },
                    },
                );
                None
            }
            Effect::ResolveAudio {
                narration,
                index,
                text,
            } => {
                tracing::debug!(narration = %narration, index = index, "Resolving narration");
                let speech = self.services.speech.clone();
                let timeout = self.config.call_timeout;
                self.spawn_call(
                    self.narration_cancel.clone(),
                    Step::Audio,
                    async move { call_remote(Step::Audio, timeout, speech.synthesize(&text)).await },
                    move |result: Result<AudioRef, GenerationError>| match result {
                        Ok(audio) => Event::AudioResolved {
                            narration,
                            index,
                            audio,
                        },
                        Err(error) => Event::AudioFailed {
                            narration,
                            index,
                            error,
                        },
                    },
                );
                None
            }
            Effect::ResolveAudioBatch { cycle, texts } => {
                tracing::info!(cycle = %cycle, count = texts.len(), "Resolving narration batch");
                self.batch_cancel.cancel();
                self.batch_cancel = CancellationToken::new();
                let speech = self.services.speech.clone();
                let timeout = self.config.call_timeout;
                self.spawn_call(
                    self.batch_cancel.clone(),
                    Step::Audio,
                    async move {
                        // join_all 按输入顺序返回，与完成顺序无关
                        join_all(
                            texts
                                .iter()
                                .map(|text| call_remote(Step::Audio, timeout, speech.synthesize(text))),
                        )
                        .await
                    },
                    move |results: Vec<Result<AudioRef, GenerationError>>| {
                        Event::AudioBatchResolved { cycle, results }
                    },
                );
                None
            }
            Effect::StopPlayback => {
                self.playback.stop();
                None
            }
            Effect::PlayAudio { index, audio } => match self.playback.replace(index, &audio) {
                Ok(()) => None,
                Err(e) => Some(Event::PlaybackFailed {
                    message: e.to_string(),
                }),
            },
            Effect::Notify(error) => {
                self.notify(&error);
                None
            }
        }
    }

    /// 在取消令牌下执行远程调用，结果作为事件回到队列
    fn spawn_call<F, O, M>(&self, token: CancellationToken, step: Step, call: F, into_event: M)
    where
        F: Future<Output = O> + Send + 'static,
        O: Send + 'static,
        M: FnOnce(O) -> Event + Send + 'static,
    {
        let queue = self.queue_tx.clone();
        tokio::spawn(async move {
            let output = tokio::select! {
                _ = token.cancelled() => {
                    tracing::debug!(step = %step, "Remote call cancelled");
                    return;
                }
                output = call => output,
            };
            if queue.send(Message::Event(into_event(output))).await.is_err() {
                tracing::debug!(step = %step, "Runner stopped, dropping remote result");
            }
        });
    }

    fn notify(&self, error: &GenerationError) {
        if error.is_fatal() {
            tracing::error!(step = %error.step(), error = %error, "Generation step failed");
        } else {
            tracing::warn!(step = %error.step(), error = %error, "Narration step failed");
        }
        self.event_publisher.publish_notification(error);
    }
}

/// 带超时的远程调用，失败按步骤归类
async fn call_remote<T, F>(step: Step, timeout: Duration, call: F) -> Result<T, GenerationError>
where
    F: Future<Output = Result<T, RemoteError>>,
{
    let millis = timeout.as_millis() as u64;
    match tokio::time::timeout(timeout, call).await {
        Err(_) | Ok(Err(RemoteError::Timeout)) => Err(GenerationError::Timeout { step, millis }),
        Ok(Err(e)) => Err(classify(step, e)),
        Ok(Ok(value)) => Ok(value),
    }
}

fn classify(step: Step, error: RemoteError) -> GenerationError {
    let message = error.to_string();
    match step {
        Step::Image => GenerationError::ImageGenerationFailed(message),
        Step::Subtitles => GenerationError::SubtitleGenerationFailed(message),
        Step::Audio => GenerationError::AudioResolutionFailed(message),
        Step::Playback => GenerationError::PlaybackFailed(message),
    }
}
