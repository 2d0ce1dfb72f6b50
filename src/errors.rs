use thiserror::Error;

/// Errors that surface to the protocol layer or the CLI.
#[derive(Error, Debug)]
pub enum RfcToolsError {
    #[error("unknown tool: {name}")]
    UnknownTool { name: String },

    #[error("invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: String, message: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results using `RfcToolsError`.
pub type Result<T> = std::result::Result<T, RfcToolsError>;

/// Failure of a single outbound fetch. Handlers never propagate these to the
/// protocol layer; the dispatcher renders them into result text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("404 Not Found for url '{url}'")]
    NotFound { url: String },

    #[error("HTTP status {status} for url '{url}'")]
    Http { status: u16, url: String },

    #[error("request to '{url}' failed: {message}")]
    Network { url: String, message: String },

    #[error("invalid response from '{url}': {message}")]
    Parse { url: String, message: String },
}

impl FetchError {
    /// Returns `true` for the distinguished "not found" status.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::NotFound { .. })
    }
}
