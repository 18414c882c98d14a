//! Recording Audio Player - 记录调用的播放器
//!
//! 统计同时处于播放状态的数量，用于验证不会出现重叠播放

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::application::ports::{AudioPlayerPort, PlaybackError};
use crate::domain::generation::AudioRef;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerCall {
    Play { index: usize, audio_url: String },
    Stop,
}

pub struct RecordingAudioPlayer {
    calls: Mutex<Vec<PlayerCall>>,
    active: AtomicUsize,
    max_active: AtomicUsize,
    reject_with: Option<String>,
}

impl RecordingAudioPlayer {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            active: AtomicUsize::new(0),
            max_active: AtomicUsize::new(0),
            reject_with: None,
        }
    }

    /// 每次播放都失败
    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self {
            reject_with: Some(reason.into()),
            ..Self::new()
        }
    }

    pub fn calls(&self) -> Vec<PlayerCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// 播放过的字幕索引
    pub fn played(&self) -> Vec<usize> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                PlayerCall::Play { index, .. } => Some(index),
                PlayerCall::Stop => None,
            })
            .collect()
    }

    pub fn active_count(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    /// 历史上同时播放的最大数量
    pub fn max_active(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }

    fn record(&self, call: PlayerCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

impl Default for RecordingAudioPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioPlayerPort for RecordingAudioPlayer {
    fn play(&self, index: usize, audio: &AudioRef) -> Result<(), PlaybackError> {
        if let Some(reason) = &self.reject_with {
            return Err(PlaybackError::Rejected(reason.clone()));
        }
        self.record(PlayerCall::Play {
            index,
            audio_url: audio.as_str().to_string(),
        });
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(now, Ordering::SeqCst);
        Ok(())
    }

    fn stop(&self) {
        self.record(PlayerCall::Stop);
        self.active.store(0, Ordering::SeqCst);
    }
}
