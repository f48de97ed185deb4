//! Stateless request dispatcher translating named operations into envelopes.

use crate::context::ToolContext;
use crate::registry::ToolRegistry;
use crate::tool::ToolSpec;
use engram_protocol::{CallToolResult, ToolError};
use log::{debug, warn};
use serde_json::Value;

/// Routes a named operation plus argument bag through the registered tool
/// and folds the outcome into a uniform response envelope.
///
/// Failures never propagate past this boundary: every `ToolError` becomes an
/// envelope with `isError` set, so the caller always receives a well-formed
/// response.
#[derive(Clone)]
pub struct Dispatcher {
    registry: ToolRegistry,
    context: ToolContext,
}

impl Dispatcher {
    /// Build a dispatcher over a registry and an injected store context.
    pub fn new(registry: ToolRegistry, context: ToolContext) -> Self {
        Self { registry, context }
    }

    /// Capability catalog, in registration order.
    pub fn specs(&self) -> Vec<ToolSpec> {
        self.registry.specs()
    }

    /// Dispatch one operation to its tool and wrap the result.
    pub async fn dispatch(&self, name: &str, arguments: Value) -> CallToolResult {
        let Some(tool) = self.registry.get(name) else {
            warn!("dispatch failed (name={}): unknown tool", name);
            return CallToolResult::error(ToolError::ToolNotFound(name.to_string()).to_string());
        };

        debug!("dispatching tool (name={})", name);
        match tool.call(&self.context, arguments).await {
            Ok(payload) => CallToolResult::success(&payload),
            Err(err) => {
                warn!("tool failed (name={}): {}", name, err);
                CallToolResult::error(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Dispatcher;
    use crate::builtins::register_builtin_tools;
    use crate::{ToolContext, ToolRegistry};
    use engram_test_utils::{FailingRecordStore, InMemoryRecordStore};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;

    fn dispatcher_with_store(store: Arc<dyn engram_store::RecordStore>) -> Dispatcher {
        let registry = ToolRegistry::new();
        register_builtin_tools(&registry);
        Dispatcher::new(registry, ToolContext::new(store))
    }

    #[tokio::test]
    async fn unknown_tool_yields_error_envelope() {
        let dispatcher = dispatcher_with_store(Arc::new(InMemoryRecordStore::new()));
        let result = dispatcher.dispatch("delete_all", json!({})).await;
        assert_eq!(result.is_error, Some(true));
        let payload = result.payload().expect("payload");
        assert_eq!(payload["error"], "Unknown tool: delete_all");
    }

    #[tokio::test]
    async fn successful_call_produces_success_envelope() {
        let dispatcher = dispatcher_with_store(Arc::new(InMemoryRecordStore::new()));
        let result = dispatcher
            .dispatch(
                "create_memory",
                json!({ "user_id": "u1", "key": "k", "content": "v" }),
            )
            .await;
        assert_eq!(result.is_error, None);
        let payload = result.payload().expect("payload");
        assert_eq!(payload["status"], "success");
    }

    #[tokio::test]
    async fn store_failure_is_wrapped_not_thrown() {
        let dispatcher = dispatcher_with_store(Arc::new(FailingRecordStore::new("timeout")));
        let result = dispatcher
            .dispatch(
                "create_memory",
                json!({ "user_id": "u1", "key": "k", "content": "v" }),
            )
            .await;
        assert_eq!(result.is_error, Some(true));
        let payload = result.payload().expect("payload");
        assert_eq!(payload["error"], "Database error: timeout");
    }
}
