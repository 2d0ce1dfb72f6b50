//! MCP (Model Context Protocol) server for the RFC tools.
//!
//! Provides a JSON-RPC 2.0 interface over stdio so that AI assistants can
//! search RFCs, read their metadata and fetch their full text.

/// Tool result content blocks.
pub mod content;

/// MCP server implementation.
pub mod server;

/// Tool definitions and dispatch.
pub mod tools;

/// JSON-RPC 2.0 transport types.
pub mod transport;

pub use content::{ContentBlock, ToolResult};
pub use server::McpServer;
pub use tools::{get_tool_definitions, handle_tool_call, ToolCall, ToolDefinition, ToolName};
pub use transport::{ErrorCode, JsonRpcError, JsonRpcRequest, JsonRpcResponse};
