//! JSON-RPC 2.0 message types for the stdio transport.
//!
//! Each message is a single line of JSON. Requests without an `id` are
//! notifications and never receive a response.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::errors::RfcToolsError;

/// The only protocol version this transport accepts.
pub const JSONRPC_VERSION: &str = "2.0";

/// A JSON-RPC 2.0 request received from the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// Protocol version; must be `"2.0"`.
    pub jsonrpc: String,
    /// Request identifier. `None` when the member is absent, which marks a
    /// notification; an explicit `null` is kept as `Some(Value::Null)`.
    #[serde(
        default,
        deserialize_with = "deserialize_present_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<Value>,
    /// The RPC method name.
    pub method: String,
    /// Optional parameters for the method.
    #[serde(default)]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// Returns `true` when the client expects no response: the request has
    /// no `id`, or it is one of the MCP notification methods.
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
            || self.method == "initialized"
            || self.method.starts_with("notifications/")
    }
}

/// Wraps any present `id`, including `null`, so only absence maps to `None`.
fn deserialize_present_id<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// A JSON-RPC 2.0 response sent back to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// Protocol version; always `"2.0"`.
    pub jsonrpc: String,
    /// The request identifier this response answers; `null` when the
    /// request could not be read.
    pub id: Value,
    /// The result on success; absent on error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// The error on failure; absent on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// Creates a successful JSON-RPC response.
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Creates an error JSON-RPC response.
    pub fn error(id: Value, code: ErrorCode, message: String) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code: code.as_i32(),
                message,
                data: None,
            }),
        }
    }

    /// Maps a dispatch failure onto the matching JSON-RPC error.
    ///
    /// Unknown tools and bad arguments are the caller's fault and report
    /// `InvalidParams`; anything else is an `InternalError`.
    pub fn from_dispatch_error(id: Value, err: &RfcToolsError) -> Self {
        let code = match err {
            RfcToolsError::UnknownTool { .. } | RfcToolsError::InvalidArguments { .. } => {
                ErrorCode::InvalidParams
            }
            _ => ErrorCode::InternalError,
        };
        Self::error(id, code, err.to_string())
    }
}

/// A JSON-RPC 2.0 error object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Numeric error code.
    pub code: i32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Standard JSON-RPC 2.0 error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// The line was not valid UTF-8 or not valid JSON-RPC.
    ParseError,
    /// The request is well-formed JSON but not an acceptable request.
    InvalidRequest,
    /// The requested method does not exist.
    MethodNotFound,
    /// Unknown tool or invalid tool arguments.
    InvalidParams,
    /// Internal server error.
    InternalError,
}

impl ErrorCode {
    /// Returns the numeric error code as defined by JSON-RPC 2.0.
    pub fn as_i32(self) -> i32 {
        match self {
            Self::ParseError => -32700,
            Self::InvalidRequest => -32600,
            Self::MethodNotFound => -32601,
            Self::InvalidParams => -32602,
            Self::InternalError => -32603,
        }
    }
}
