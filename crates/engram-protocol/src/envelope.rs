//! Tool invocation result envelope.

use serde::{Deserialize, Serialize};

/// Single content block inside a tool call result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolContent {
    /// Plain text content carrying a JSON-encoded payload.
    Text { text: String },
}

/// Uniform response wrapper for `tools/call`.
///
/// Success and failure both come back as content; `is_error` distinguishes
/// them so the caller never sees a protocol-level exception.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CallToolResult {
    pub content: Vec<ToolContent>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

impl CallToolResult {
    /// Wrap a success payload.
    pub fn success(payload: &serde_json::Value) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: payload.to_string(),
            }],
            is_error: None,
        }
    }

    /// Wrap an error message as a `{"error": ...}` payload.
    pub fn error(message: impl Into<String>) -> Self {
        let payload = serde_json::json!({ "error": message.into() });
        Self {
            content: vec![ToolContent::Text {
                text: payload.to_string(),
            }],
            is_error: Some(true),
        }
    }

    /// Decode the first text block back into JSON.
    pub fn payload(&self) -> Option<serde_json::Value> {
        let ToolContent::Text { text } = self.content.first()?;
        serde_json::from_str(text).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn success_omits_is_error() {
        let result = CallToolResult::success(&json!({ "status": "success" }));
        let encoded = serde_json::to_value(&result).expect("encode");
        assert_eq!(encoded.get("isError"), None);
        assert_eq!(result.payload(), Some(json!({ "status": "success" })));
    }

    #[test]
    fn error_sets_is_error_and_wraps_message() {
        let result = CallToolResult::error("Database error: boom");
        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            result.payload(),
            Some(json!({ "error": "Database error: boom" }))
        );
    }
}
