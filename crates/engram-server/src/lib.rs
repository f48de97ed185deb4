//! Stdio MCP server exposing the Engram memory tools.

pub mod server;

pub use server::McpServer;
