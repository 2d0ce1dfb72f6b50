//! MCP tool definitions and dispatch for the RFC tools.
//!
//! The tool set is closed: [`ToolName`] enumerates it, and a `tools/call` is
//! parsed into a [`ToolCall`] before any handler runs. Handler failures are
//! rendered into text here and nowhere else.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::errors::{FetchError, Result, RfcToolsError};
use crate::rfc::{format_rfc_detail, format_rfc_text, format_search_results, RfcClient};
use crate::types::normalize_rfc_identifier;

use super::content::ToolResult;

/// Number of search results returned when `limit` is not given.
pub const DEFAULT_SEARCH_LIMIT: u64 = 10;

/// A tool definition exposed by the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique tool name.
    pub name: String,
    /// Human-readable description of what the tool does.
    pub description: String,
    /// JSON Schema describing the tool's input parameters.
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// The tools this server exposes, in listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    SearchRfcs,
    GetRfc,
    GetRfcText,
}

impl ToolName {
    /// Every tool, in the order `tools/list` reports them.
    pub const ALL: [ToolName; 3] = [ToolName::SearchRfcs, ToolName::GetRfc, ToolName::GetRfcText];

    /// Returns the wire name clients use in `tools/call`.
    pub fn as_str(self) -> &'static str {
        match self {
            ToolName::SearchRfcs => "search_rfcs",
            ToolName::GetRfc => "get_rfc",
            ToolName::GetRfcText => "get_rfc_text",
        }
    }

    /// Looks up a tool by its wire name.
    pub fn from_name(name: &str) -> Option<ToolName> {
        Self::ALL.into_iter().find(|tool| tool.as_str() == name)
    }

    /// Builds the definition advertised by `tools/list`, including the JSON
    /// Schema of the tool's arguments.
    pub fn definition(self) -> ToolDefinition {
        let (description, input_schema) = match self {
            ToolName::SearchRfcs => (
                "Search for RFCs by keyword or topic",
                json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "Search query (e.g., 'HTTP', 'DNS', 'TCP')"
                        },
                        "limit": {
                            "type": "integer",
                            "description": "Maximum number of results to return",
                            "default": DEFAULT_SEARCH_LIMIT
                        }
                    },
                    "required": ["query"]
                }),
            ),
            ToolName::GetRfc => (
                "Fetch detailed information about a specific RFC by number or name",
                json!({
                    "type": "object",
                    "properties": {
                        "rfc_identifier": {
                            "type": "string",
                            "description": "RFC number or name (e.g., '7540', 'RFC7540', 'rfc7540')"
                        }
                    },
                    "required": ["rfc_identifier"]
                }),
            ),
            ToolName::GetRfcText => (
                "Fetch the full text content of an RFC",
                json!({
                    "type": "object",
                    "properties": {
                        "rfc_number": {
                            "type": "integer",
                            "description": "RFC number (e.g., 7540)"
                        }
                    },
                    "required": ["rfc_number"]
                }),
            ),
        };

        ToolDefinition {
            name: self.as_str().to_string(),
            description: description.to_string(),
            input_schema,
        }
    }
}

/// Returns the list of all tool definitions exposed by this MCP server.
pub fn get_tool_definitions() -> Vec<ToolDefinition> {
    ToolName::ALL.into_iter().map(ToolName::definition).collect()
}

/// A validated tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCall {
    /// Search by name substring, returning at most `limit` hits.
    SearchRfcs { query: String, limit: u64 },
    /// Metadata lookup; `name` is already normalized, e.g. `rfc7540`.
    GetRfc { name: String },
    /// Full-text fetch of RFC `number`.
    GetRfcText { number: u64 },
}

impl ToolCall {
    /// Validates `arguments` for the tool called `name`.
    ///
    /// Fails with `UnknownTool` for names outside the registry and with
    /// `InvalidArguments` for missing or mistyped required arguments.
    pub fn parse(name: &str, arguments: &Value) -> Result<ToolCall> {
        let tool = ToolName::from_name(name).ok_or_else(|| RfcToolsError::UnknownTool {
            name: name.to_string(),
        })?;

        let empty = Map::new();
        let args = arguments.as_object().unwrap_or(&empty);
        let invalid = |message: String| RfcToolsError::InvalidArguments {
            tool: tool.as_str().to_string(),
            message,
        };

        match tool {
            ToolName::SearchRfcs => {
                let query = match args.get("query") {
                    Some(Value::String(s)) => s.clone(),
                    Some(_) => return Err(invalid("'query' must be a string".to_string())),
                    None => return Err(invalid("missing required parameter: query".to_string())),
                };
                let limit = match args.get("limit") {
                    None | Some(Value::Null) => DEFAULT_SEARCH_LIMIT,
                    Some(v) => v.as_u64().ok_or_else(|| {
                        invalid("'limit' must be a non-negative integer".to_string())
                    })?,
                };
                Ok(ToolCall::SearchRfcs { query, limit })
            }
            ToolName::GetRfc => {
                let raw = match args.get("rfc_identifier") {
                    Some(Value::String(s)) => s.clone(),
                    Some(Value::Number(n)) if n.is_u64() => n.to_string(),
                    Some(_) => {
                        return Err(invalid("'rfc_identifier' must be a string".to_string()))
                    }
                    None => {
                        return Err(invalid(
                            "missing required parameter: rfc_identifier".to_string(),
                        ))
                    }
                };
                Ok(ToolCall::GetRfc {
                    name: normalize_rfc_identifier(raw.trim()),
                })
            }
            ToolName::GetRfcText => {
                let number = match args.get("rfc_number") {
                    Some(Value::Number(n)) => n.as_u64(),
                    Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
                    Some(_) => None,
                    None => {
                        return Err(invalid("missing required parameter: rfc_number".to_string()))
                    }
                }
                .ok_or_else(|| invalid("'rfc_number' must be a non-negative integer".to_string()))?;
                Ok(ToolCall::GetRfcText { number })
            }
        }
    }

    /// The registry entry this call targets.
    pub fn tool(&self) -> ToolName {
        match self {
            ToolCall::SearchRfcs { .. } => ToolName::SearchRfcs,
            ToolCall::GetRfc { .. } => ToolName::GetRfc,
            ToolCall::GetRfcText { .. } => ToolName::GetRfcText,
        }
    }
}

/// Dispatches a tool call to the appropriate handler.
///
/// Protocol-level failures (unknown tool, bad arguments) are returned as
/// errors before any network access. Everything that goes wrong inside a
/// handler comes back as an ordinary text result.
pub async fn handle_tool_call(client: &RfcClient, name: &str, arguments: &Value) -> Result<ToolResult> {
    let call = ToolCall::parse(name, arguments)?;
    Ok(execute(client, &call).await)
}

/// Runs an already-validated call.
pub async fn execute(client: &RfcClient, call: &ToolCall) -> ToolResult {
    let outcome = match call {
        ToolCall::SearchRfcs { query, limit } => client
            .search(query, *limit)
            .await
            .map(|results| format_search_results(query, &results)),
        ToolCall::GetRfc { name } => client
            .get_rfc(name)
            .await
            .map(|detail| format_rfc_detail(&detail)),
        ToolCall::GetRfcText { number } => client
            .get_rfc_text(*number)
            .await
            .map(|text| format_rfc_text(&text)),
    };

    match outcome {
        Ok(text) => ToolResult::text(text),
        Err(e) => {
            tracing::warn!(tool = call.tool().as_str(), error = %e, "tool call failed");
            ToolResult::text(render_failure(call, &e))
        }
    }
}

/// Renders a handler failure as the text returned to the client.
pub fn render_failure(call: &ToolCall, err: &FetchError) -> String {
    match call {
        ToolCall::SearchRfcs { .. } => format!("Error searching RFCs: {}", err),
        ToolCall::GetRfc { name } => match err {
            FetchError::NotFound { .. } => {
                format!("RFC '{}' not found. Please check the RFC number.", name)
            }
            FetchError::Http { .. } => format!("HTTP error fetching RFC: {}", err),
            _ => format!("Error fetching RFC: {}", err),
        },
        ToolCall::GetRfcText { number } => match err {
            FetchError::NotFound { .. } => format!("RFC {} text not found.", number),
            FetchError::Http { .. } => format!("HTTP error fetching RFC text: {}", err),
            _ => format!("Error fetching RFC text: {}", err),
        },
    }
}
