//! Fake Adapters - 测试用的端口实现

mod recording_player;
mod scripted;

pub use recording_player::{PlayerCall, RecordingAudioPlayer};
pub use scripted::{FakeImageGenerator, FakeScriptGenerator, FakeSpeechSynthesizer, ScriptedFake};
