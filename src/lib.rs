pub mod config;
pub mod errors;
pub mod fetch;
pub mod mcp;
pub mod rfc;
pub mod types;
