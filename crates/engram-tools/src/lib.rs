//! Tooling interfaces and built-in memory tools for Engram.

pub mod builtins;
pub mod context;
pub mod dispatcher;
pub mod registry;
pub mod tool;

/// Built-in tool registry and registration helper.
pub use builtins::{builtin_tool_registry, register_builtin_tools};
/// Tool execution context.
pub use context::ToolContext;
/// Envelope-producing dispatcher.
pub use dispatcher::Dispatcher;
/// Tool registry type.
pub use registry::ToolRegistry;
/// Tool trait and spec type.
pub use tool::{Tool, ToolSpec};
