//! Generation Context - Value Objects

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 输入文本的字符上限，配置只能调低不能调高
pub const MAX_INPUT_CHARS: usize = 4000;

/// 用户输入文本
///
/// 长度按 Unicode scalar 计，而不是 UTF-16 code unit：一个 emoji 算一个字符。
/// 超过上限的部分在写入时截断，因此任何提交路径都拿不到更长的值
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputText {
    text: String,
    max_chars: usize,
}

impl InputText {
    pub fn new(raw: impl Into<String>) -> Self {
        Self::with_limit(raw, MAX_INPUT_CHARS)
    }

    /// `max_chars` 超过 `MAX_INPUT_CHARS` 时按 `MAX_INPUT_CHARS` 处理
    pub fn with_limit(raw: impl Into<String>, max_chars: usize) -> Self {
        let max_chars = max_chars.min(MAX_INPUT_CHARS);
        let raw = raw.into();
        let text = match raw.char_indices().nth(max_chars) {
            Some((byte_offset, _)) => raw[..byte_offset].to_string(),
            None => raw,
        };
        Self { text, max_chars }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// 字符计数器显示的值
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// 生成图片的远程引用（URL）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef(String);

impl ImageRef {
    /// 空引用视为失败
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        if url.trim().is_empty() {
            None
        } else {
            Some(Self(url))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ImageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 合成语音的远程引用（URL）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioRef(String);

impl AudioRef {
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        if url.trim().is_empty() {
            None
        } else {
            Some(Self(url))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AudioRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 单调递增的令牌
///
/// 生成周期和旁白请求各自持有一个，携带过期令牌的结果会被丢弃
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct CycleToken(u64);

impl CycleToken {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for CycleToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 字幕导航方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Next,
    Prev,
}

impl Direction {
    /// 在长度为 `len` 的序列上移动游标（回绕）
    ///
    /// `len == 0` 时无定义，返回 None
    pub fn step(self, index: usize, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let index = index % len;
        Some(match self {
            Direction::Next => (index + 1) % len,
            Direction::Prev => (index + len - 1) % len,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Next => "next",
            Direction::Prev => "prev",
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "next" => Ok(Direction::Next),
            "prev" => Ok(Direction::Prev),
            other => Err(format!("Unknown direction: {}", other)),
        }
    }
}

/// 语音合成策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TtsStrategy {
    /// 只为当前字幕合成，每次导航重新请求
    #[default]
    Lazy,
    /// 字幕生成后一次性并发合成全部
    Eager,
}

impl TtsStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            TtsStrategy::Lazy => "lazy",
            TtsStrategy::Eager => "eager",
        }
    }
}
