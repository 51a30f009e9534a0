//! Error types for Pondwire.

use thiserror::Error;

/// Primary error type for all Pondwire operations.
#[derive(Error, Debug)]
pub enum PondwireError {
    /// The transport failed or closed before reaching an open state.
    /// Fatal to the session; no turns run.
    #[error("Connect error: {0}")]
    Connect(String),

    /// An explicit error event arrived mid-response, or the event stream
    /// violated the protocol contract. Aborts the current run and the turn.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The server reported that the response itself failed or ended
    /// incomplete. Carries the partial response id for diagnostics.
    #[error("Response ended {disposition} (id={response_id})")]
    ResponseFailed {
        response_id: String,
        disposition: String,
    },

    /// The server requested a tool outside the declared registry.
    #[error("Unsupported tool requested: {0}")]
    UnknownTool(String),

    /// Tool arguments failed JSON parsing or shape validation.
    #[error("Tool argument error: {0}")]
    ArgumentParse(String),

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("Transport error: {0}")]
    Transport(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Tool execution error: {tool_name}: {message}")]
    ToolExecution { tool_name: String, message: String },
}

impl PondwireError {
    /// Create a tool execution error.
    pub fn tool_execution(tool_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolExecution {
            tool_name: tool_name.into(),
            message: message.into(),
        }
    }

    /// Whether this error originated from the server-side response contract
    /// rather than the local transport or tooling.
    pub fn is_server_reported(&self) -> bool {
        matches!(
            self,
            Self::Protocol(_) | Self::ResponseFailed { .. } | Self::UnknownTool(_)
        )
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, PondwireError>;
