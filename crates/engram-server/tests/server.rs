//! End-to-end tests for the stdio request loop, driven line by line.

use engram_protocol::{JsonRpcId, error_codes};
use engram_server::McpServer;
use engram_test_utils::InMemoryRecordStore;
use engram_tools::{Dispatcher, ToolContext, builtin_tool_registry};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::sync::Arc;

fn test_server() -> McpServer {
    let store = Arc::new(InMemoryRecordStore::new());
    let dispatcher = Dispatcher::new(builtin_tool_registry(), ToolContext::new(store));
    McpServer::new("engram", dispatcher)
}

async fn call(server: &McpServer, line: &str) -> Value {
    let response = server
        .handle_line(line)
        .await
        .expect("response expected");
    serde_json::to_value(&response).expect("encode response")
}

/// Decode the tool payload out of a `tools/call` response envelope.
fn tool_payload(response: &Value) -> Value {
    let text = response["result"]["content"][0]["text"]
        .as_str()
        .expect("text content");
    serde_json::from_str(text).expect("payload json")
}

#[tokio::test]
async fn initialize_reports_tool_capability() {
    let server = test_server();
    let response = call(
        &server,
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
    )
    .await;
    assert_eq!(response["result"]["serverInfo"]["name"], "engram");
    assert!(response["result"]["capabilities"]["tools"].is_object());
    assert!(response["result"]["protocolVersion"].is_string());
}

#[tokio::test]
async fn tools_list_returns_catalog_in_order() {
    let server = test_server();
    let response = call(&server, r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#).await;
    let tools = response["result"]["tools"].as_array().expect("tools");
    let names: Vec<&str> = tools
        .iter()
        .map(|tool| tool["name"].as_str().expect("name"))
        .collect();
    assert_eq!(
        names,
        vec![
            "create_memory",
            "get_memory",
            "list_memories",
            "forget_memory",
            "list_tags",
        ]
    );
    assert_eq!(
        tools[0]["inputSchema"]["required"],
        json!(["user_id", "key", "content"])
    );
    assert_eq!(tools[2]["inputSchema"]["required"], json!(["user_id"]));
}

#[tokio::test]
async fn create_then_get_through_the_protocol() {
    let server = test_server();
    let create = call(
        &server,
        r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"create_memory","arguments":{"user_id":"u1","key":"favorite_food","content":"sushi","tag":"personal"}}}"#,
    )
    .await;
    assert_eq!(create["result"].get("isError"), None);
    assert_eq!(tool_payload(&create)["status"], "success");

    let get = call(
        &server,
        r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{"name":"get_memory","arguments":{"user_id":"u1","key":"favorite_food"}}}"#,
    )
    .await;
    let payload = tool_payload(&get);
    assert_eq!(payload["key"], "favorite_food");
    assert_eq!(payload["content"], "sushi");
    assert_eq!(payload["tag"], "personal");
}

#[tokio::test]
async fn unknown_tool_yields_error_envelope_not_rpc_error() {
    let server = test_server();
    let response = call(
        &server,
        r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{"name":"delete_all","arguments":{}}}"#,
    )
    .await;
    assert_eq!(response.get("error"), None);
    assert_eq!(response["result"]["isError"], true);
    assert_eq!(tool_payload(&response)["error"], "Unknown tool: delete_all");
}

#[tokio::test]
async fn unknown_method_is_method_not_found() {
    let server = test_server();
    let response = call(
        &server,
        r#"{"jsonrpc":"2.0","id":6,"method":"resources/list"}"#,
    )
    .await;
    assert_eq!(
        response["error"]["code"],
        json!(error_codes::METHOD_NOT_FOUND)
    );
}

#[tokio::test]
async fn malformed_json_is_parse_error() {
    let server = test_server();
    let response = call(&server, "{not json").await;
    assert_eq!(response["error"]["code"], json!(error_codes::PARSE_ERROR));
}

#[tokio::test]
async fn notifications_get_no_response() {
    let server = test_server();
    let response = server
        .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
        .await;
    assert!(response.is_none());
}

#[tokio::test]
async fn tools_call_requires_a_name() {
    let server = test_server();
    let response = call(
        &server,
        r#"{"jsonrpc":"2.0","id":7,"method":"tools/call","params":{"arguments":{}}}"#,
    )
    .await;
    assert_eq!(
        response["error"]["code"],
        json!(error_codes::INVALID_PARAMS)
    );
}

#[tokio::test]
async fn ping_returns_empty_result() {
    let server = test_server();
    let raw = server
        .handle_line(r#"{"jsonrpc":"2.0","id":"ping-1","method":"ping"}"#)
        .await
        .expect("response");
    assert_eq!(raw.id, Some(JsonRpcId::String("ping-1".to_string())));
    let response = serde_json::to_value(&raw).expect("encode");
    assert_eq!(response["result"], json!({}));
}
