//! Generation Context - 生成周期限界上下文
//!
//! 职责:
//! - 输入文本、图片、字幕、语音引用等值对象
//! - 字幕载荷解析
//! - 生成周期状态机

mod errors;
mod machine;
mod subtitles;
mod value_objects;

pub use errors::{GenerationError, Step};
pub use machine::{Effect, Event, GenerationSnapshot, GenerationState};
pub use subtitles::SubtitleSequence;
pub use value_objects::{
    AudioRef, CycleToken, Direction, ImageRef, InputText, TtsStrategy, MAX_INPUT_CHARS,
};
