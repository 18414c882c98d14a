//! Generation Context - State Machine
//!
//! 生成周期的全部状态和转移规则。`handle` 不做任何 I/O，
//! 只根据事件修改状态并返回需要执行的副作用

use serde::Serialize;

use super::{
    AudioRef, CycleToken, Direction, GenerationError, ImageRef, InputText, SubtitleSequence,
    TtsStrategy,
};

/// 状态机输入事件
#[derive(Debug, Clone)]
pub enum Event {
    /// 文本框内容变更
    TextEdited { text: String },
    /// 提交当前文本（可选地先替换文本）
    Submitted { text: Option<String> },
    ImageGenerated {
        cycle: CycleToken,
        image: ImageRef,
    },
    ImageFailed {
        cycle: CycleToken,
        error: GenerationError,
    },
    SubtitlesGenerated {
        cycle: CycleToken,
        subtitles: SubtitleSequence,
    },
    SubtitlesFailed {
        cycle: CycleToken,
        error: GenerationError,
    },
    /// 单条字幕的语音（lazy 策略）
    AudioResolved {
        narration: CycleToken,
        index: usize,
        audio: AudioRef,
    },
    AudioFailed {
        narration: CycleToken,
        index: usize,
        error: GenerationError,
    },
    /// 全部字幕的语音，顺序与字幕一致（eager 策略）
    AudioBatchResolved {
        cycle: CycleToken,
        results: Vec<Result<AudioRef, GenerationError>>,
    },
    Navigated { direction: Direction },
    /// 本地播放被拒绝
    PlaybackFailed { message: String },
}

/// 状态转移产生的副作用，由 runner 执行
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// 取消上一个周期仍在进行的远程请求
    CancelCycle,
    /// 取消仍在进行的旁白请求
    CancelNarration,
    RequestImage {
        cycle: CycleToken,
        prompt: String,
    },
    RequestSubtitles {
        cycle: CycleToken,
        text: String,
    },
    ResolveAudio {
        narration: CycleToken,
        index: usize,
        text: String,
    },
    ResolveAudioBatch {
        cycle: CycleToken,
        texts: Vec<String>,
    },
    StopPlayback,
    PlayAudio {
        index: usize,
        audio: AudioRef,
    },
    Notify(GenerationError),
}

/// 进行中的生成周期
#[derive(Debug, Clone)]
struct PendingCycle {
    token: CycleToken,
    /// 触发本周期的文本快照
    text: String,
    /// 图片先暂存，等同周期字幕成功后一起提交
    staged_image: Option<ImageRef>,
}

/// 生成编排的状态记录
///
/// 不变量:
/// - 字幕非空时 `0 <= index < subtitles.len()`
/// - 显示的图片、字幕、语音缓存来自同一次提交的文本
/// - 同一时刻最多一个进行中的周期
#[derive(Debug, Clone)]
pub struct GenerationState {
    strategy: TtsStrategy,
    input: InputText,
    image: Option<ImageRef>,
    subtitles: SubtitleSequence,
    index: usize,
    audio_cache: Vec<Option<AudioRef>>,
    cycle: CycleToken,
    displayed_cycle: Option<CycleToken>,
    pending: Option<PendingCycle>,
    narration: CycleToken,
}

impl GenerationState {
    pub fn new(strategy: TtsStrategy, max_input_chars: usize) -> Self {
        Self {
            strategy,
            input: InputText::with_limit(String::new(), max_input_chars),
            image: None,
            subtitles: SubtitleSequence::default(),
            index: 0,
            audio_cache: Vec::new(),
            cycle: CycleToken::default(),
            displayed_cycle: None,
            pending: None,
            narration: CycleToken::default(),
        }
    }

    /// 处理一个事件
    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::TextEdited { text } => {
                self.set_input(text);
                Vec::new()
            }
            Event::Submitted { text } => self.on_submitted(text),
            Event::ImageGenerated { cycle, image } => self.on_image_generated(cycle, image),
            Event::ImageFailed { cycle, error } | Event::SubtitlesFailed { cycle, error } => {
                self.on_cycle_failed(cycle, error)
            }
            Event::SubtitlesGenerated { cycle, subtitles } => {
                self.on_subtitles_generated(cycle, subtitles)
            }
            Event::AudioResolved {
                narration,
                index,
                audio,
            } => self.on_audio_resolved(narration, index, audio),
            Event::AudioFailed {
                narration,
                index,
                error,
            } => {
                if !self.is_current_narration(narration, index) {
                    return Vec::new();
                }
                vec![Effect::Notify(error)]
            }
            Event::AudioBatchResolved { cycle, results } => self.on_audio_batch(cycle, results),
            Event::Navigated { direction } => self.on_navigated(direction),
            Event::PlaybackFailed { message } => {
                vec![Effect::Notify(GenerationError::PlaybackFailed(message))]
            }
        }
    }

    fn set_input(&mut self, text: String) {
        self.input = InputText::with_limit(text, self.input.max_chars());
    }

    fn on_submitted(&mut self, text: Option<String>) -> Vec<Effect> {
        if let Some(text) = text {
            self.set_input(text);
        }

        let mut effects = Vec::with_capacity(2);
        if let Some(previous) = self.pending.take() {
            tracing::debug!(
                superseded = %previous.token,
                "Superseding in-flight generation cycle"
            );
            effects.push(Effect::CancelCycle);
        }

        self.cycle = self.cycle.next();
        let prompt = self.input.as_str().to_string();
        self.pending = Some(PendingCycle {
            token: self.cycle,
            text: prompt.clone(),
            staged_image: None,
        });

        effects.push(Effect::RequestImage {
            cycle: self.cycle,
            prompt,
        });
        effects
    }

    fn pending_for(&mut self, cycle: CycleToken) -> Option<&mut PendingCycle> {
        match self.pending.as_mut() {
            Some(pending) if pending.token == cycle => Some(pending),
            _ => {
                tracing::debug!(cycle = %cycle, current = %self.cycle, "Dropping stale cycle result");
                None
            }
        }
    }

    fn on_image_generated(&mut self, cycle: CycleToken, image: ImageRef) -> Vec<Effect> {
        let Some(pending) = self.pending_for(cycle) else {
            return Vec::new();
        };
        pending.staged_image = Some(image);
        vec![Effect::RequestSubtitles {
            cycle,
            text: pending.text.clone(),
        }]
    }

    fn on_cycle_failed(&mut self, cycle: CycleToken, error: GenerationError) -> Vec<Effect> {
        if self.pending_for(cycle).is_none() {
            return Vec::new();
        }
        // 显示中的图片和字幕保持不变
        self.pending = None;
        vec![Effect::Notify(error)]
    }

    fn on_subtitles_generated(
        &mut self,
        cycle: CycleToken,
        subtitles: SubtitleSequence,
    ) -> Vec<Effect> {
        if self.pending_for(cycle).is_none() {
            return Vec::new();
        }
        let Some(pending) = self.pending.take() else {
            return Vec::new();
        };

        // 图片、字幕、游标一起提交
        self.image = pending.staged_image;
        self.audio_cache = vec![None; subtitles.len()];
        self.subtitles = subtitles;
        self.index = 0;
        self.displayed_cycle = Some(cycle);
        self.narration = self.narration.next();

        let mut effects = vec![Effect::CancelNarration, Effect::StopPlayback];
        if self.subtitles.is_empty() {
            return effects;
        }

        match self.strategy {
            TtsStrategy::Lazy => effects.push(Effect::ResolveAudio {
                narration: self.narration,
                index: 0,
                text: self.subtitles.items()[0].clone(),
            }),
            TtsStrategy::Eager => effects.push(Effect::ResolveAudioBatch {
                cycle,
                texts: self.subtitles.items().to_vec(),
            }),
        }
        effects
    }

    fn is_current_narration(&self, narration: CycleToken, index: usize) -> bool {
        let current = narration == self.narration && index == self.index;
        if !current {
            tracing::debug!(
                narration = %narration,
                index = index,
                current_narration = %self.narration,
                current_index = self.index,
                "Dropping stale narration result"
            );
        }
        current
    }

    fn on_audio_resolved(
        &mut self,
        narration: CycleToken,
        index: usize,
        audio: AudioRef,
    ) -> Vec<Effect> {
        if !self.is_current_narration(narration, index) {
            return Vec::new();
        }
        if let Some(slot) = self.audio_cache.get_mut(index) {
            *slot = Some(audio.clone());
        }
        vec![Effect::PlayAudio { index, audio }]
    }

    fn on_audio_batch(
        &mut self,
        cycle: CycleToken,
        results: Vec<Result<AudioRef, GenerationError>>,
    ) -> Vec<Effect> {
        if self.displayed_cycle != Some(cycle) || results.len() != self.subtitles.len() {
            tracing::debug!(cycle = %cycle, "Dropping stale audio batch");
            return Vec::new();
        }

        let mut effects = Vec::new();
        self.audio_cache = results
            .into_iter()
            .map(|result| match result {
                Ok(audio) => Some(audio),
                Err(error) => {
                    effects.push(Effect::Notify(error));
                    None
                }
            })
            .collect();

        if let Some(audio) = self.audio_cache.get(self.index).cloned().flatten() {
            effects.push(Effect::PlayAudio {
                index: self.index,
                audio,
            });
        }
        effects
    }

    fn on_navigated(&mut self, direction: Direction) -> Vec<Effect> {
        let Some(index) = direction.step(self.index, self.subtitles.len()) else {
            return Vec::new();
        };
        self.index = index;
        self.narration = self.narration.next();

        let mut effects = vec![Effect::CancelNarration, Effect::StopPlayback];
        match self.strategy {
            TtsStrategy::Lazy => effects.push(Effect::ResolveAudio {
                narration: self.narration,
                index,
                text: self.subtitles.items()[index].clone(),
            }),
            TtsStrategy::Eager => {
                if let Some(audio) = self.audio_cache.get(index).cloned().flatten() {
                    effects.push(Effect::PlayAudio { index, audio });
                }
            }
        }
        effects
    }

    // Getters
    pub fn strategy(&self) -> TtsStrategy {
        self.strategy
    }

    pub fn input(&self) -> &InputText {
        &self.input
    }

    pub fn image(&self) -> Option<&ImageRef> {
        self.image.as_ref()
    }

    pub fn subtitles(&self) -> &SubtitleSequence {
        &self.subtitles
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn current_subtitle(&self) -> Option<&str> {
        self.subtitles.get(self.index)
    }

    pub fn audio_cache(&self) -> &[Option<AudioRef>] {
        &self.audio_cache
    }

    pub fn cycle(&self) -> CycleToken {
        self.cycle
    }

    pub fn is_generating(&self) -> bool {
        self.pending.is_some()
    }

    /// 只读视图
    pub fn snapshot(&self) -> GenerationSnapshot {
        let len = self.subtitles.len();
        GenerationSnapshot {
            input_chars: self.input.char_count(),
            max_chars: self.input.max_chars(),
            image_url: self.image.as_ref().map(|i| i.as_str().to_string()),
            subtitles: self.subtitles.items().to_vec(),
            current_index: self.index,
            current_subtitle: self.current_subtitle().map(str::to_string),
            has_prev: len > 0 && self.index > 0,
            has_next: len > 0 && self.index < len - 1,
            audio_urls: self
                .audio_cache
                .iter()
                .map(|a| a.as_ref().map(|a| a.as_str().to_string()))
                .collect(),
            generating: self.is_generating(),
            cycle: self.cycle.value(),
            strategy: self.strategy,
        }
    }
}

/// 状态快照，用于 HTTP 查询和事件推送
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationSnapshot {
    pub input_chars: usize,
    pub max_chars: usize,
    pub image_url: Option<String>,
    pub subtitles: Vec<String>,
    pub current_index: usize,
    pub current_subtitle: Option<String>,
    /// 是否显示“上一条”按钮
    pub has_prev: bool,
    /// 是否显示“下一条”按钮
    pub has_next: bool,
    pub audio_urls: Vec<Option<String>>,
    pub generating: bool,
    pub cycle: u64,
    pub strategy: TtsStrategy,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::generation::MAX_INPUT_CHARS;

    fn image(url: &str) -> ImageRef {
        ImageRef::new(url).unwrap()
    }

    fn audio(url: &str) -> AudioRef {
        AudioRef::new(url).unwrap()
    }

    fn subtitles(items: &[&str]) -> SubtitleSequence {
        SubtitleSequence::new(items.iter().map(|s| s.to_string()).collect())
    }

    /// 跑完一个成功周期，返回提交时的副作用
    fn complete_cycle(state: &mut GenerationState, url: &str, items: &[&str]) -> Vec<Effect> {
        state.handle(Event::Submitted {
            text: Some(format!("passage for {}", url)),
        });
        let cycle = state.cycle();
        state.handle(Event::ImageGenerated {
            cycle,
            image: image(url),
        });
        state.handle(Event::SubtitlesGenerated {
            cycle,
            subtitles: subtitles(items),
        })
    }

    #[test]
    fn test_submit_requests_image_first() {
        let mut state = GenerationState::new(TtsStrategy::Lazy, MAX_INPUT_CHARS);
        state.handle(Event::TextEdited {
            text: "a quiet harbor".into(),
        });
        let effects = state.handle(Event::Submitted { text: None });

        assert_eq!(
            effects,
            vec![Effect::RequestImage {
                cycle: state.cycle(),
                prompt: "a quiet harbor".into()
            }]
        );
        assert!(state.is_generating());
    }

    #[test]
    fn test_submit_truncates_text() {
        let mut state = GenerationState::new(TtsStrategy::Lazy, 10);
        let effects = state.handle(Event::Submitted {
            text: Some("0123456789abcdef".into()),
        });
        assert_eq!(state.input().char_count(), 10);
        match &effects[0] {
            Effect::RequestImage { prompt, .. } => assert_eq!(prompt, "0123456789"),
            other => panic!("unexpected effect: {:?}", other),
        }
    }

    #[test]
    fn test_image_success_requests_subtitles_with_same_text() {
        let mut state = GenerationState::new(TtsStrategy::Lazy, MAX_INPUT_CHARS);
        state.handle(Event::Submitted {
            text: Some("snapshot".into()),
        });
        // 提交后继续编辑不影响本周期
        state.handle(Event::TextEdited {
            text: "edited later".into(),
        });
        let cycle = state.cycle();
        let effects = state.handle(Event::ImageGenerated {
            cycle,
            image: image("https://img/1.png"),
        });
        assert_eq!(
            effects,
            vec![Effect::RequestSubtitles {
                cycle,
                text: "snapshot".into()
            }]
        );
        // 字幕成功前图片不显示
        assert!(state.image().is_none());
    }

    #[test]
    fn test_image_failure_never_requests_subtitles() {
        let mut state = GenerationState::new(TtsStrategy::Lazy, MAX_INPUT_CHARS);
        state.handle(Event::Submitted {
            text: Some("x".into()),
        });
        let error = GenerationError::ImageGenerationFailed("HTTP 500".into());
        let effects = state.handle(Event::ImageFailed {
            cycle: state.cycle(),
            error: error.clone(),
        });
        assert_eq!(effects, vec![Effect::Notify(error)]);
        assert!(!state.is_generating());
    }

    #[test]
    fn test_commit_resets_index_and_requests_first_narration() {
        let mut state = GenerationState::new(TtsStrategy::Lazy, MAX_INPUT_CHARS);
        let effects = complete_cycle(&mut state, "https://img/1.png", &["a", "b", "c"]);

        assert_eq!(state.image().map(|i| i.as_str()), Some("https://img/1.png"));
        assert_eq!(state.subtitles().len(), 3);
        assert_eq!(state.current_index(), 0);
        assert!(effects.contains(&Effect::StopPlayback));
        assert!(effects.iter().any(|e| matches!(
            e,
            Effect::ResolveAudio { index: 0, text, .. } if text == "a"
        )));
    }

    #[test]
    fn test_invalid_subtitles_leave_prior_state() {
        let mut state = GenerationState::new(TtsStrategy::Lazy, MAX_INPUT_CHARS);
        complete_cycle(&mut state, "https://img/1.png", &["a", "b"]);
        state.handle(Event::Navigated {
            direction: Direction::Next,
        });

        state.handle(Event::Submitted {
            text: Some("second".into()),
        });
        let cycle = state.cycle();
        state.handle(Event::ImageGenerated {
            cycle,
            image: image("https://img/2.png"),
        });
        let error = GenerationError::SubtitleGenerationInvalid("not an array".into());
        let effects = state.handle(Event::SubtitlesFailed {
            cycle,
            error: error.clone(),
        });

        assert_eq!(effects, vec![Effect::Notify(error)]);
        assert_eq!(state.image().map(|i| i.as_str()), Some("https://img/1.png"));
        assert_eq!(state.subtitles(), &subtitles(&["a", "b"]));
        assert_eq!(state.current_index(), 1);
    }

    #[test]
    fn test_invalid_subtitles_on_first_attempt_stay_empty() {
        let mut state = GenerationState::new(TtsStrategy::Lazy, MAX_INPUT_CHARS);
        state.handle(Event::Submitted {
            text: Some("x".into()),
        });
        let cycle = state.cycle();
        state.handle(Event::ImageGenerated {
            cycle,
            image: image("https://img/1.png"),
        });
        state.handle(Event::SubtitlesFailed {
            cycle,
            error: GenerationError::SubtitleGenerationInvalid("bad".into()),
        });
        assert!(state.subtitles().is_empty());
        assert!(state.image().is_none());
    }

    #[test]
    fn test_resubmit_cancels_and_drops_stale_results() {
        let mut state = GenerationState::new(TtsStrategy::Lazy, MAX_INPUT_CHARS);
        state.handle(Event::Submitted {
            text: Some("first".into()),
        });
        let first = state.cycle();

        let effects = state.handle(Event::Submitted {
            text: Some("second".into()),
        });
        let second = state.cycle();
        assert_eq!(effects[0], Effect::CancelCycle);
        assert!(second > first);

        // 旧周期的结果被丢弃
        let effects = state.handle(Event::ImageGenerated {
            cycle: first,
            image: image("https://img/old.png"),
        });
        assert!(effects.is_empty());
        let effects = state.handle(Event::SubtitlesGenerated {
            cycle: first,
            subtitles: subtitles(&["old"]),
        });
        assert!(effects.is_empty());
        assert!(state.subtitles().is_empty());

        state.handle(Event::ImageGenerated {
            cycle: second,
            image: image("https://img/new.png"),
        });
        state.handle(Event::SubtitlesGenerated {
            cycle: second,
            subtitles: subtitles(&["new"]),
        });
        assert_eq!(state.image().map(|i| i.as_str()), Some("https://img/new.png"));
        assert_eq!(state.current_subtitle(), Some("new"));
    }

    #[test]
    fn test_stale_failure_does_not_abort_current_cycle() {
        let mut state = GenerationState::new(TtsStrategy::Lazy, MAX_INPUT_CHARS);
        state.handle(Event::Submitted { text: None });
        let first = state.cycle();
        state.handle(Event::Submitted { text: None });

        let effects = state.handle(Event::ImageFailed {
            cycle: first,
            error: GenerationError::ImageGenerationFailed("late".into()),
        });
        assert!(effects.is_empty());
        assert!(state.is_generating());
    }

    #[test]
    fn test_navigation_wraps() {
        let mut state = GenerationState::new(TtsStrategy::Lazy, MAX_INPUT_CHARS);
        complete_cycle(&mut state, "https://img/1.png", &["a", "b", "c"]);

        state.handle(Event::Navigated {
            direction: Direction::Prev,
        });
        assert_eq!(state.current_index(), 2);

        for _ in 0..3 {
            state.handle(Event::Navigated {
                direction: Direction::Next,
            });
        }
        assert_eq!(state.current_index(), 2);
    }

    #[test]
    fn test_navigation_noop_without_subtitles() {
        let mut state = GenerationState::new(TtsStrategy::Lazy, MAX_INPUT_CHARS);
        let effects = state.handle(Event::Navigated {
            direction: Direction::Next,
        });
        assert!(effects.is_empty());
        assert_eq!(state.current_index(), 0);
    }

    #[test]
    fn test_lazy_navigation_stops_then_resolves() {
        let mut state = GenerationState::new(TtsStrategy::Lazy, MAX_INPUT_CHARS);
        complete_cycle(&mut state, "https://img/1.png", &["a", "b"]);

        let effects = state.handle(Event::Navigated {
            direction: Direction::Next,
        });
        assert_eq!(effects[0], Effect::CancelNarration);
        assert_eq!(effects[1], Effect::StopPlayback);
        assert!(matches!(
            &effects[2],
            Effect::ResolveAudio { index: 1, text, .. } if text == "b"
        ));
    }

    #[test]
    fn test_superseded_narration_is_dropped() {
        let mut state = GenerationState::new(TtsStrategy::Lazy, MAX_INPUT_CHARS);
        let effects = complete_cycle(&mut state, "https://img/1.png", &["a", "b"]);
        let first_narration = effects
            .iter()
            .find_map(|e| match e {
                Effect::ResolveAudio { narration, .. } => Some(*narration),
                _ => None,
            })
            .unwrap();

        state.handle(Event::Navigated {
            direction: Direction::Next,
        });

        let effects = state.handle(Event::AudioResolved {
            narration: first_narration,
            index: 0,
            audio: audio("https://tts/a.mp3"),
        });
        assert!(effects.is_empty());
    }

    #[test]
    fn test_current_narration_plays() {
        let mut state = GenerationState::new(TtsStrategy::Lazy, MAX_INPUT_CHARS);
        let effects = complete_cycle(&mut state, "https://img/1.png", &["a"]);
        let narration = effects
            .iter()
            .find_map(|e| match e {
                Effect::ResolveAudio { narration, .. } => Some(*narration),
                _ => None,
            })
            .unwrap();

        let effects = state.handle(Event::AudioResolved {
            narration,
            index: 0,
            audio: audio("https://tts/a.mp3"),
        });
        assert_eq!(
            effects,
            vec![Effect::PlayAudio {
                index: 0,
                audio: audio("https://tts/a.mp3")
            }]
        );
    }

    #[test]
    fn test_eager_commit_requests_batch() {
        let mut state = GenerationState::new(TtsStrategy::Eager, MAX_INPUT_CHARS);
        let effects = complete_cycle(&mut state, "https://img/1.png", &["a", "b", "c"]);
        assert!(effects.iter().any(|e| matches!(
            e,
            Effect::ResolveAudioBatch { texts, .. } if texts == &["a", "b", "c"]
        )));
    }

    #[test]
    fn test_eager_batch_partial_failure_is_not_fatal() {
        let mut state = GenerationState::new(TtsStrategy::Eager, MAX_INPUT_CHARS);
        complete_cycle(&mut state, "https://img/1.png", &["a", "b", "c"]);
        let cycle = state.cycle();

        let effects = state.handle(Event::AudioBatchResolved {
            cycle,
            results: vec![
                Ok(audio("https://tts/a.mp3")),
                Err(GenerationError::AudioResolutionFailed("HTTP 503".into())),
                Ok(audio("https://tts/c.mp3")),
            ],
        });

        assert_eq!(
            state.audio_cache(),
            &[
                Some(audio("https://tts/a.mp3")),
                None,
                Some(audio("https://tts/c.mp3"))
            ]
        );
        assert!(effects.iter().any(|e| matches!(e, Effect::Notify(_))));
        assert!(effects.contains(&Effect::PlayAudio {
            index: 0,
            audio: audio("https://tts/a.mp3")
        }));
        assert_eq!(state.subtitles().len(), 3);
    }

    #[test]
    fn test_eager_navigation_plays_cached_audio() {
        let mut state = GenerationState::new(TtsStrategy::Eager, MAX_INPUT_CHARS);
        complete_cycle(&mut state, "https://img/1.png", &["a", "b"]);
        let cycle = state.cycle();
        state.handle(Event::AudioBatchResolved {
            cycle,
            results: vec![Ok(audio("https://tts/a.mp3")), Ok(audio("https://tts/b.mp3"))],
        });

        let effects = state.handle(Event::Navigated {
            direction: Direction::Next,
        });
        assert_eq!(
            effects,
            vec![
                Effect::CancelNarration,
                Effect::StopPlayback,
                Effect::PlayAudio {
                    index: 1,
                    audio: audio("https://tts/b.mp3")
                }
            ]
        );
    }

    #[test]
    fn test_snapshot_navigation_flags() {
        let mut state = GenerationState::new(TtsStrategy::Lazy, MAX_INPUT_CHARS);
        assert!(!state.snapshot().has_prev);
        assert!(!state.snapshot().has_next);

        complete_cycle(&mut state, "https://img/1.png", &["a", "b", "c"]);
        let snapshot = state.snapshot();
        assert!(!snapshot.has_prev);
        assert!(snapshot.has_next);
        assert_eq!(snapshot.current_subtitle.as_deref(), Some("a"));

        state.handle(Event::Navigated {
            direction: Direction::Prev,
        });
        let snapshot = state.snapshot();
        assert!(snapshot.has_prev);
        assert!(!snapshot.has_next);
    }

    #[test]
    fn test_playback_failure_notifies() {
        let mut state = GenerationState::new(TtsStrategy::Lazy, MAX_INPUT_CHARS);
        let effects = state.handle(Event::PlaybackFailed {
            message: "unsupported".into(),
        });
        assert_eq!(
            effects,
            vec![Effect::Notify(GenerationError::PlaybackFailed(
                "unsupported".into()
            ))]
        );
    }
}
