use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("no valid JSON object found in model output")]
    NoJsonFound,
}

// Fenced block emitted by models that wrap their answer in markdown.
static FENCED_JSON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)```json\s*(\{.*?\})\s*```").expect("valid regex"));

// <Answer>...</Answer> wrapper some chat templates add, optionally fenced itself.
static ANSWER_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<answer>\s*(?:```json)?\s*(\{.*?\})\s*(?:```)?\s*</answer>")
        .expect("valid regex")
});

/// Recover a single JSON value from free-form model output.
///
/// Attempts, in order, first success wins:
/// 1. Parse the trimmed input directly.
/// 2. Parse the interior of a ```json fenced block.
/// 3. Parse the substring from the first `{` to the last `}`.
/// 4. Parse the interior of an `<Answer>...</Answer>` tag.
///
/// Step 3 is a greedy outer-bracket heuristic: it can mis-extract when the
/// text contains multiple JSON fragments or unbalanced braces in prose. That
/// behavior is kept deliberately; callers reject anything that fails schema
/// validation downstream.
pub fn extract_json(text: &str) -> Result<Value, ExtractionError> {
    let s = text.trim();

    if let Ok(value) = serde_json::from_str::<Value>(s) {
        return Ok(value);
    }

    if let Some(caps) = FENCED_JSON.captures(s) {
        if let Ok(value) = serde_json::from_str::<Value>(caps[1].trim()) {
            return Ok(value);
        }
    }

    if let (Some(start), Some(end)) = (s.find('{'), s.rfind('}')) {
        if end > start {
            if let Ok(value) = serde_json::from_str::<Value>(&s[start..=end]) {
                return Ok(value);
            }
        }
    }

    if let Some(caps) = ANSWER_TAG.captures(s) {
        if let Ok(value) = serde_json::from_str::<Value>(caps[1].trim()) {
            return Ok(value);
        }
    }

    Err(ExtractionError::NoJsonFound)
}
