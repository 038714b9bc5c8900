//! Pulling the JSON object out of free-form model output.

use log::error;
use serde_json::Value;

use crate::error::{AriaError, Result};

/// Extract the JSON object embedded in `content`.
///
/// The object is the span from the first `{` to the last `}`, so prose or
/// markdown fences around a single object are ignored.
///
/// # Errors
///
/// Returns `AriaError::Parse` if there is no such span or it is not valid
/// JSON.
pub fn extract_json_object(content: &str) -> Result<Value> {
    let span = content
        .find('{')
        .zip(content.rfind('}'))
        .filter(|(start, end)| start < end)
        .map(|(start, end)| &content[start..=end]);

    let Some(json) = span else {
        error!("No JSON object in AI response. Raw content: {content}");
        return Err(AriaError::parse("AI response did not contain a JSON object"));
    };

    serde_json::from_str(json).map_err(|e| {
        error!("Failed to parse AI response as JSON: {e}");
        error!("Raw content: {content}");
        AriaError::parse(format!("AI response was not valid JSON: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_bare_object() {
        let value = extract_json_object(r#"{"goal": "x", "top_modules": []}"#).unwrap();
        assert_eq!(value, json!({"goal": "x", "top_modules": []}));
    }

    #[test]
    fn test_object_wrapped_in_prose_and_fences() {
        let content = "Sure! Here is the plan:\n```json\n{\"goal\": \"x\", \"n\": {\"a\": 1}}\n```\nGood luck.";
        let value = extract_json_object(content).unwrap();
        assert_eq!(value, json!({"goal": "x", "n": {"a": 1}}));
    }

    #[test]
    fn test_braces_inside_strings() {
        let content = r#"plan: {"goal": "use {curly} braces", "x": "}"} done"#;
        let value = extract_json_object(content).unwrap();
        assert_eq!(value["goal"], "use {curly} braces");
    }

    #[test]
    fn test_no_object() {
        let err = extract_json_object("I cannot help with that.").unwrap_err();
        assert!(matches!(err, AriaError::Parse { .. }));
    }

    #[test]
    fn test_closing_before_opening() {
        let err = extract_json_object("} nothing {").unwrap_err();
        assert!(matches!(err, AriaError::Parse { .. }));
    }

    #[test]
    fn test_invalid_json() {
        let err = extract_json_object("{goal: unquoted}").unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));
    }
}
