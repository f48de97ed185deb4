//! Built-in memory tools bundled with Engram.

mod memory;
mod utils;

use crate::ToolRegistry;
use log::info;
use std::sync::Arc;

pub use memory::{
    CreateMemoryTool, ForgetMemoryTool, GetMemoryTool, ListMemoriesTool, ListTagsTool,
};

/// Register all built-in tools with the provided registry.
///
/// Registration order fixes the capability catalog order reported to
/// clients.
pub fn register_builtin_tools(registry: &ToolRegistry) {
    registry.register(Arc::new(CreateMemoryTool));
    registry.register(Arc::new(GetMemoryTool));
    registry.register(Arc::new(ListMemoriesTool));
    registry.register(Arc::new(ForgetMemoryTool));
    registry.register(Arc::new(ListTagsTool));
    info!("registered built-in tools");
}

/// Build a registry pre-populated with built-in tools.
pub fn builtin_tool_registry() -> ToolRegistry {
    let registry = ToolRegistry::new();
    register_builtin_tools(&registry);
    registry
}
