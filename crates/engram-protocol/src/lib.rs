//! Wire protocol types for the Engram tool channel.

mod envelope;
mod rpc;
mod tool;

pub use envelope::{CallToolResult, ToolContent};
pub use rpc::{JsonRpcError, JsonRpcId, JsonRpcRequest, JsonRpcResponse, error_codes, methods};
pub use tool::ToolError;

/// MCP protocol revision implemented by the server.
pub const PROTOCOL_VERSION: &str = "2024-11-05";
