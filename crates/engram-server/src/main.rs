//! Binary entry point for the Engram MCP server.

use anyhow::Context;
use clap::Parser;
use engram_config::EngramConfig;
use engram_server::McpServer;
use engram_store::RestRecordStore;
use engram_tools::{Dispatcher, ToolContext, builtin_tool_registry};
use log::info;
use std::sync::Arc;

/// Command-line options for the server binary.
#[derive(Debug, Parser)]
#[command(name = "engram-server", version, about)]
struct Cli {
    /// Override the memory table name from the environment.
    #[arg(long)]
    table: Option<String>,

    /// Override the server name reported to clients.
    #[arg(long)]
    server_name: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logging goes to stderr; stdout carries the protocol stream.
    engram::init_logging();

    let cli = Cli::parse();
    let mut config = EngramConfig::from_env().context("loading configuration from environment")?;
    if let Some(table) = cli.table {
        config.table = table;
    }
    if let Some(server_name) = cli.server_name {
        config.server_name = server_name;
    }

    let store = Arc::new(RestRecordStore::from_config(&config));
    let registry = builtin_tool_registry();
    let dispatcher = Dispatcher::new(registry, ToolContext::new(store));

    info!(
        "starting server (name={}, table={})",
        config.server_name, config.table
    );
    let server = McpServer::new(config.server_name, dispatcher);
    server.run().await
}
