//! Generation Context - Subtitle Sequence

use serde::Serialize;

use super::GenerationError;

/// 有序字幕序列
///
/// 由一次远程响应整体生成，提交后不可变，下一次成功的生成周期整体替换
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SubtitleSequence(Vec<String>);

impl SubtitleSequence {
    pub fn new(items: Vec<String>) -> Self {
        Self(items)
    }

    /// 解析脚本接口返回的 `message`
    ///
    /// 去掉换行和可能的 markdown 代码块标记后按 JSON 解析，
    /// 只接受字符串数组
    pub fn parse(message: &str) -> Result<Self, GenerationError> {
        let cleaned: String = message
            .chars()
            .filter(|c| *c != '\n' && *c != '\r')
            .collect();
        let json_text = cleaned
            .trim()
            .trim_start_matches("```json")
            .trim_start_matches("```")
            .trim_end_matches("```")
            .trim();

        let value: serde_json::Value = serde_json::from_str(json_text).map_err(|e| {
            GenerationError::SubtitleGenerationInvalid(format!(
                "Subtitle payload is not valid JSON: {}",
                e
            ))
        })?;

        let items = match value {
            serde_json::Value::Array(items) => items,
            _ => {
                return Err(GenerationError::SubtitleGenerationInvalid(
                    "Subtitle generation did not return a valid array.".to_string(),
                ))
            }
        };

        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                serde_json::Value::String(s) => Ok(s),
                other => Err(GenerationError::SubtitleGenerationInvalid(format!(
                    "Subtitle {} is not a string: {}",
                    index, other
                ))),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn items(&self) -> &[String] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_array() {
        let seq = SubtitleSequence::parse(r#"["The night falls.", "A door opens."]"#).unwrap();
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.get(1), Some("A door opens."));
    }

    #[test]
    fn test_parse_strips_newlines() {
        let seq = SubtitleSequence::parse("[\n  \"one\",\r\n  \"two\"\n]").unwrap();
        assert_eq!(seq.items(), &["one".to_string(), "two".to_string()]);
    }

    #[test]
    fn test_parse_strips_code_fence() {
        let seq = SubtitleSequence::parse("```json\n[\"fenced\"]\n```").unwrap();
        assert_eq!(seq.get(0), Some("fenced"));
    }

    #[test]
    fn test_parse_empty_array_is_valid() {
        let seq = SubtitleSequence::parse("[]").unwrap();
        assert!(seq.is_empty());
    }

    #[test]
    fn test_non_array_rejected() {
        let err = SubtitleSequence::parse(r#""not an array""#).unwrap_err();
        assert!(matches!(err, GenerationError::SubtitleGenerationInvalid(_)));

        let err = SubtitleSequence::parse(r#"{"subtitles": ["a"]}"#).unwrap_err();
        assert!(matches!(err, GenerationError::SubtitleGenerationInvalid(_)));
    }

    #[test]
    fn test_unparseable_rejected() {
        let err = SubtitleSequence::parse("not an array").unwrap_err();
        assert!(matches!(err, GenerationError::SubtitleGenerationInvalid(_)));
    }

    #[test]
    fn test_non_string_element_rejected() {
        let err = SubtitleSequence::parse(r#"["a", 2]"#).unwrap_err();
        assert!(matches!(err, GenerationError::SubtitleGenerationInvalid(_)));
    }
}
