//! Registry for tool implementations.

use crate::tool::{Tool, ToolSpec};
use log::debug;
use parking_lot::RwLock;
use std::sync::Arc;

/// In-memory registry for tool implementations.
///
/// Registration order is preserved; the capability catalog lists tools in
/// the order they were registered.
#[derive(Default, Clone)]
pub struct ToolRegistry {
    /// Registered tools in registration order.
    tools: Arc<RwLock<Vec<Arc<dyn Tool>>>>,
}

impl ToolRegistry {
    /// Create an empty tool registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, replacing any previous tool with the same name.
    pub fn register(&self, tool: Arc<dyn Tool>) {
        debug!("registering tool (name={})", tool.name());
        let mut tools = self.tools.write();
        tools.retain(|existing| existing.name() != tool.name());
        tools.push(tool);
    }

    /// Fetch a tool by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools
            .read()
            .iter()
            .find(|tool| tool.name() == name)
            .cloned()
    }

    /// List all registered tool names in registration order.
    pub fn list(&self) -> Vec<String> {
        self.tools
            .read()
            .iter()
            .map(|tool| tool.name().to_string())
            .collect()
    }

    /// Return tool specs for all registered tools, in registration order.
    pub fn specs(&self) -> Vec<ToolSpec> {
        self.tools.read().iter().map(|tool| tool.spec()).collect()
    }
}
