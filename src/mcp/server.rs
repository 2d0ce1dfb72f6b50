//! MCP server that reads JSON-RPC 2.0 messages line by line and writes one
//! response line per request.
//!
//! The server holds the tool registry and the RFC client for its whole
//! lifetime and keeps no other state between calls.

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

use crate::errors::Result;
use crate::rfc::RfcClient;

use super::content::ToolResult;
use super::tools::{get_tool_definitions, handle_tool_call, ToolDefinition};
use super::transport::{ErrorCode, JsonRpcRequest, JsonRpcResponse, JSONRPC_VERSION};

/// MCP protocol revision this server speaks.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Name reported in `serverInfo`.
pub const SERVER_NAME: &str = "rfc-tools";

/// The MCP server: a fixed tool table bound to an [`RfcClient`].
pub struct McpServer {
    tools: Vec<ToolDefinition>,
    client: RfcClient,
}

impl McpServer {
    /// Creates a server exposing the fixed tool set through `client`.
    pub fn new(client: RfcClient) -> Self {
        Self {
            tools: get_tool_definitions(),
            client,
        }
    }

    /// The registered tools, in listing order.
    pub fn tools(&self) -> &[ToolDefinition] {
        &self.tools
    }

    /// Routes a tool invocation by name.
    pub async fn dispatch(&self, name: &str, arguments: &Value) -> Result<ToolResult> {
        handle_tool_call(&self.client, name, arguments).await
    }

    /// Serves on the process stdin/stdout until stdin is closed.
    pub async fn run(&self) -> Result<()> {
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Serves requests read from `reader`, writing responses to `writer`,
    /// until `reader` reaches end of input.
    ///
    /// Lines that are not UTF-8 or not JSON-RPC get a parse error and the
    /// loop carries on; only an I/O error on either stream ends it early.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();
        tracing::info!(tools = self.tools.len(), "MCP server listening");

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }

            let response = match std::str::from_utf8(&buf) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => self.handle_line(line.trim()).await,
                Err(e) => Some(JsonRpcResponse::error(
                    Value::Null,
                    ErrorCode::ParseError,
                    format!("request is not valid UTF-8: {}", e),
                )),
            };

            let Some(resp) = response else {
                continue;
            };
            let mut output = match serde_json::to_string(&resp) {
                Ok(s) => s,
                Err(e) => {
                    tracing::error!(error = %e, "failed to serialize response");
                    continue;
                }
            };
            output.push('\n');
            writer.write_all(output.as_bytes()).await?;
            writer.flush().await?;
        }

        tracing::info!("input closed, MCP server stopping");
        Ok(())
    }

    /// Parses one line of input and handles it.
    async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        match serde_json::from_str::<JsonRpcRequest>(line) {
            Ok(request) => self.handle_request(&request).await,
            Err(e) => Some(JsonRpcResponse::error(
                Value::Null,
                ErrorCode::ParseError,
                format!("failed to parse JSON-RPC request: {}", e),
            )),
        }
    }

    /// Handles one parsed request.
    ///
    /// Returns `None` for notifications, which are never answered, even when
    /// malformed.
    pub async fn handle_request(&self, request: &JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            tracing::debug!(method = %request.method, "notification");
            return None;
        }
        let id = request.id.clone().unwrap_or(Value::Null);
        tracing::debug!(method = %request.method, id = %id, "request");

        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::error(
                id,
                ErrorCode::InvalidRequest,
                format!("unsupported jsonrpc version: {}", request.jsonrpc),
            ));
        }

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(id),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => JsonRpcResponse::success(id, json!({ "tools": self.tools })),
            "tools/call" => self.handle_tools_call(id, request.params.as_ref()).await,
            _ => JsonRpcResponse::error(
                id,
                ErrorCode::MethodNotFound,
                format!("method not found: {}", request.method),
            ),
        };
        Some(response)
    }

    fn handle_initialize(&self, id: Value) -> JsonRpcResponse {
        JsonRpcResponse::success(
            id,
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": SERVER_NAME,
                    "version": env!("CARGO_PKG_VERSION")
                }
            }),
        )
    }

    async fn handle_tools_call(&self, id: Value, params: Option<&Value>) -> JsonRpcResponse {
        let Some(params) = params else {
            return JsonRpcResponse::error(
                id,
                ErrorCode::InvalidParams,
                "missing params for tools/call".to_string(),
            );
        };

        let Some(tool_name) = params.get("name").and_then(|v| v.as_str()) else {
            return JsonRpcResponse::error(
                id,
                ErrorCode::InvalidParams,
                "missing 'name' in tools/call params".to_string(),
            );
        };

        let arguments = params.get("arguments").cloned().unwrap_or(json!({}));

        match self.dispatch(tool_name, &arguments).await {
            Ok(result) => match serde_json::to_value(&result) {
                Ok(value) => JsonRpcResponse::success(id, value),
                Err(e) => JsonRpcResponse::error(
                    id,
                    ErrorCode::InternalError,
                    format!("failed to encode tool result: {}", e),
                ),
            },
            Err(e) => {
                tracing::warn!(tool = tool_name, error = %e, "rejected tool call");
                JsonRpcResponse::from_dispatch_error(id, &e)
            }
        }
    }
}
