//! Utility helpers shared by built-in tools.

use engram_protocol::ToolError;
use engram_store::StoreError;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Parse JSON args into a typed struct for tool calls.
pub(super) fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, ToolError> {
    serde_json::from_value(args).map_err(|err| ToolError::InvalidArguments(err.to_string()))
}

/// Reject a required string argument that is missing meaningful content.
pub(super) fn require_field(name: &str, value: &str) -> Result<(), ToolError> {
    if value.trim().is_empty() {
        return Err(ToolError::InvalidArguments(format!(
            "{name} cannot be empty"
        )));
    }
    Ok(())
}

/// Surface a store failure with the fixed database-error prefix.
pub(super) fn store_error(err: StoreError) -> ToolError {
    ToolError::ExecutionFailed(format!("Database error: {err}"))
}

#[cfg(test)]
mod tests {
    use super::{parse_args, require_field, store_error};
    use engram_protocol::ToolError;
    use engram_store::StoreError;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    #[test]
    fn parse_args_reads_struct_fields() {
        #[derive(Deserialize)]
        struct Args {
            name: String,
        }

        let args: Args = parse_args(serde_json::json!({ "name": "engram" })).expect("args");
        assert_eq!(args.name, "engram".to_string());
    }

    #[test]
    fn parse_args_reports_missing_fields() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Args {
            name: String,
        }

        let err = parse_args::<Args>(serde_json::json!({})).expect_err("missing");
        let ToolError::InvalidArguments(message) = err else {
            panic!("expected invalid arguments");
        };
        assert!(message.contains("name"));
    }

    #[test]
    fn require_field_rejects_blank() {
        let err = require_field("user_id", " ").expect_err("blank");
        let ToolError::InvalidArguments(message) = err else {
            panic!("expected invalid arguments");
        };
        assert_eq!(message, "user_id cannot be empty");
        require_field("user_id", "u1").expect("ok");
    }

    #[test]
    fn store_error_carries_database_prefix() {
        let err = store_error(StoreError::Failed {
            status: 503,
            detail: "connection refused".to_string(),
        });
        assert_eq!(err.to_string(), "Database error: connection refused");
    }
}
