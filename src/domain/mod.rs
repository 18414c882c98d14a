//! Domain Layer - 领域层
//!
//! 只有一个限界上下文:
//! - Generation Context: 图片 / 字幕 / 旁白生成周期

pub mod generation;
