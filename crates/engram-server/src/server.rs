//! Newline-delimited JSON-RPC loop over stdio.

use anyhow::Result;
use engram_protocol::{
    JsonRpcRequest, JsonRpcResponse, PROTOCOL_VERSION, error_codes, methods,
};
use engram_tools::Dispatcher;
use log::{debug, error, info, warn};
use serde_json::json;
use std::io::{self, BufRead, Write};

/// MCP server state: a name to report and the tool dispatcher.
///
/// Requests are handled one at a time; each line runs to completion,
/// including its store round trip, before the next is read.
pub struct McpServer {
    server_name: String,
    dispatcher: Dispatcher,
}

impl McpServer {
    /// Create a server around a dispatcher.
    pub fn new(server_name: impl Into<String>, dispatcher: Dispatcher) -> Self {
        Self {
            server_name: server_name.into(),
            dispatcher,
        }
    }

    /// Run the server, reading requests from stdin and writing responses to
    /// stdout.
    pub async fn run(&self) -> Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut stdout = stdout.lock();

        info!("server ready (name={})", self.server_name);

        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    error!("error reading stdin: {}", err);
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            let Some(response) = self.handle_line(&line).await else {
                debug!("notification handled, no response due");
                continue;
            };
            let encoded = serde_json::to_string(&response)?;
            writeln!(stdout, "{}", encoded)?;
            stdout.flush()?;
        }

        info!("server shutting down");
        Ok(())
    }

    /// Handle one raw input line. Returns `None` for notifications.
    pub async fn handle_line(&self, input: &str) -> Option<JsonRpcResponse> {
        let request: JsonRpcRequest = match serde_json::from_str(input) {
            Ok(request) => request,
            Err(err) => {
                warn!("failed to parse request: {}", err);
                return Some(JsonRpcResponse::error(
                    None,
                    error_codes::PARSE_ERROR,
                    format!("Parse error: {}", err),
                ));
            }
        };

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                request.id,
                error_codes::INVALID_REQUEST,
                "Invalid JSON-RPC version",
            ));
        }
        if request.is_notification() {
            debug!("ignoring notification (method={})", request.method);
            return None;
        }

        Some(self.handle_request(request).await)
    }

    /// Dispatch one parsed request to its method handler.
    async fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        debug!("handling request (method={})", request.method);
        match request.method.as_str() {
            methods::INITIALIZE => JsonRpcResponse::success(
                request.id,
                json!({
                    "protocolVersion": PROTOCOL_VERSION,
                    "capabilities": { "tools": {} },
                    "serverInfo": {
                        "name": self.server_name,
                        "version": env!("CARGO_PKG_VERSION"),
                    },
                }),
            ),
            methods::PING => JsonRpcResponse::success(request.id, json!({})),
            methods::TOOLS_LIST => {
                let tools: Vec<serde_json::Value> = self
                    .dispatcher
                    .specs()
                    .into_iter()
                    .map(|spec| {
                        json!({
                            "name": spec.name,
                            "description": spec.description,
                            "inputSchema": spec.args_schema,
                        })
                    })
                    .collect();
                JsonRpcResponse::success(request.id, json!({ "tools": tools }))
            }
            methods::TOOLS_CALL => self.handle_tools_call(request).await,
            other => JsonRpcResponse::error(
                request.id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method not found: {}", other),
            ),
        }
    }

    /// Handle a `tools/call` request.
    async fn handle_tools_call(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let params = request.params.unwrap_or_else(|| json!({}));
        let Some(name) = params.get("name").and_then(|value| value.as_str()) else {
            return JsonRpcResponse::error(
                request.id,
                error_codes::INVALID_PARAMS,
                "Missing tool name",
            );
        };
        let arguments = params
            .get("arguments")
            .cloned()
            .unwrap_or_else(|| json!({}));

        let result = self.dispatcher.dispatch(name, arguments).await;
        match serde_json::to_value(&result) {
            Ok(value) => JsonRpcResponse::success(request.id, value),
            Err(err) => JsonRpcResponse::error(
                request.id,
                error_codes::INTERNAL_ERROR,
                format!("Failed to encode result: {}", err),
            ),
        }
    }
}
