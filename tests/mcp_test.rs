mod common;

use common::{server_with, StubFetcher};
use rfc_tools::mcp::tools::*;
use rfc_tools::mcp::transport::*;
use serde_json::{json, Value};

/// Feeds raw bytes through the server loop and returns each response line.
async fn run_raw_session(stub: &std::sync::Arc<StubFetcher>, input: &[u8]) -> Vec<Value> {
    let server = server_with(stub);
    let mut output = Vec::new();
    server.serve(input, &mut output).await.unwrap();
    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

/// Feeds `input` through the server loop and returns each response line.
async fn run_session(stub: &std::sync::Arc<StubFetcher>, input: &str) -> Vec<Value> {
    run_raw_session(stub, input.as_bytes()).await
}

#[test]
fn test_tool_definitions_order() {
    let names: Vec<String> = get_tool_definitions().into_iter().map(|t| t.name).collect();
    assert_eq!(names, vec!["search_rfcs", "get_rfc", "get_rfc_text"]);
}

#[test]
fn test_tool_definitions_required_fields() {
    let tools = get_tool_definitions();
    assert_eq!(tools[0].input_schema["required"], json!(["query"]));
    assert_eq!(tools[1].input_schema["required"], json!(["rfc_identifier"]));
    assert_eq!(tools[2].input_schema["required"], json!(["rfc_number"]));
    assert_eq!(
        tools[2].input_schema["properties"]["rfc_number"]["type"],
        "integer"
    );
}

#[tokio::test]
async fn test_initialize_list_and_call_session() {
    let stub = StubFetcher::new();
    stub.push_body("RFC body");
    let input = [
        json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
        json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
        json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
        json!({"jsonrpc": "2.0", "id": 3, "method": "tools/call",
               "params": {"name": "get_rfc_text", "arguments": {"rfc_number": 1}}}),
    ]
    .iter()
    .map(|v| v.to_string())
    .collect::<Vec<_>>()
    .join("\n");

    let responses = run_session(&stub, &input).await;
    assert_eq!(responses.len(), 3, "notification must not be answered");

    assert_eq!(responses[0]["id"], 1);
    assert_eq!(responses[0]["result"]["protocolVersion"], "2024-11-05");
    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "rfc-tools");

    assert_eq!(responses[1]["id"], 2);
    let tools = responses[1]["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 3);
    assert!(tools[0].get("inputSchema").is_some());

    assert_eq!(responses[2]["id"], 3);
    assert_eq!(
        responses[2]["result"],
        json!({"content": [{"type": "text", "text": "RFC 1 Full Text:\n\nRFC body"}]})
    );
}

#[tokio::test]
async fn test_unknown_tool_is_protocol_error() {
    let stub = StubFetcher::new();
    let input = json!({"jsonrpc": "2.0", "id": "x", "method": "tools/call",
                       "params": {"name": "delete_everything", "arguments": {}}})
    .to_string();

    let responses = run_session(&stub, &input).await;

    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["id"], "x");
    assert_eq!(responses[0]["error"]["code"], ErrorCode::InvalidParams.as_i32());
    assert_eq!(responses[0]["error"]["message"], "unknown tool: delete_everything");
    assert!(responses[0].get("result").is_none());
    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn test_handler_failure_is_success_result() {
    let stub = StubFetcher::new();
    stub.push_error(rfc_tools::errors::FetchError::NotFound {
        url: "https://datatracker.ietf.org/api/v1/doc/document/rfc0/".to_string(),
    });
    let input = json!({"jsonrpc": "2.0", "id": 9, "method": "tools/call",
                       "params": {"name": "get_rfc", "arguments": {"rfc_identifier": "0"}}})
    .to_string();

    let responses = run_session(&stub, &input).await;

    assert!(responses[0].get("error").is_none());
    assert_eq!(
        responses[0]["result"]["content"][0]["text"],
        "RFC 'rfc0' not found. Please check the RFC number."
    );
}

#[tokio::test]
async fn test_malformed_and_unknown_methods() {
    let stub = StubFetcher::new();
    let input = format!(
        "not json\n\n{}\n{}\n{}\n",
        json!({"jsonrpc": "2.0", "id": 1, "method": "resources/list"}),
        json!({"jsonrpc": "2.0", "id": 2, "method": "tools/call"}),
        json!({"jsonrpc": "2.0", "id": 3, "method": "ping"}),
    );

    let responses = run_session(&stub, &input).await;

    assert_eq!(responses.len(), 4);
    assert_eq!(responses[0]["error"]["code"], -32700);
    assert!(responses[0]["id"].is_null());
    assert_eq!(responses[1]["error"]["code"], -32601);
    assert_eq!(responses[2]["error"]["code"], -32602);
    assert_eq!(responses[3]["result"], json!({}));
}

#[tokio::test]
async fn test_invalid_utf8_line_does_not_end_session() {
    let stub = StubFetcher::new();
    let mut input = vec![0xff, 0xfe, b'\n'];
    let ping = json!({"jsonrpc": "2.0", "id": 5, "method": "ping"}).to_string();
    input.extend_from_slice(ping.as_bytes());
    input.push(b'\n');

    let responses = run_raw_session(&stub, &input).await;

    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["error"]["code"], ErrorCode::ParseError.as_i32());
    assert!(responses[0]["id"].is_null());
    assert_eq!(responses[1]["id"], 5);
    assert_eq!(responses[1]["result"], json!({}));
}

#[tokio::test]
async fn test_requests_without_id_are_not_answered() {
    let stub = StubFetcher::new();
    let input = format!(
        "{}\n{}\n{}\n",
        json!({"jsonrpc": "2.0", "method": "ping"}),
        json!({"jsonrpc": "2.0", "method": "tools/call",
               "params": {"name": "delete_everything"}}),
        json!({"jsonrpc": "2.0", "id": null, "method": "ping"}),
    );

    let responses = run_session(&stub, &input).await;

    assert_eq!(responses.len(), 1);
    assert!(responses[0]["id"].is_null());
    assert_eq!(responses[0]["result"], json!({}));
}

#[tokio::test]
async fn test_wrong_jsonrpc_version_is_invalid_request() {
    let stub = StubFetcher::new();
    let input = json!({"jsonrpc": "1.0", "id": 4, "method": "tools/list"}).to_string();

    let responses = run_session(&stub, &input).await;

    assert_eq!(responses[0]["id"], 4);
    assert_eq!(responses[0]["error"]["code"], ErrorCode::InvalidRequest.as_i32());
    assert!(responses[0].get("result").is_none());
}

#[tokio::test]
async fn test_empty_input_ends_cleanly() {
    let stub = StubFetcher::new();
    assert!(run_session(&stub, "").await.is_empty());
}

#[test]
fn test_request_with_string_id() {
    let msg = json!({
        "jsonrpc": "2.0",
        "id": "req-42",
        "method": "ping"
    });

    let request: JsonRpcRequest = serde_json::from_value(msg).unwrap();
    assert_eq!(request.id, Some(Value::String("req-42".to_string())));
    assert!(!request.is_notification());
}
