//! Error types for twilio-mcp-agent
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur while signing and calling the agent
#[derive(Debug, Error)]
pub enum AgentError {
    /// Missing or empty required configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Service identifier outside the recognized set
    #[error("Unknown service: {0}")]
    UnknownService(String),

    /// Signature could not be computed
    #[error("Signing error: {0}")]
    Signing(String),

    /// The outbound LLM API call failed
    #[error("Remote call failed: {message}")]
    RemoteCall {
        status: Option<u16>,
        message: String,
        body: Option<String>,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AgentError {
    /// Remote failure with no HTTP status (transport or decoding)
    pub fn remote(message: impl Into<String>) -> Self {
        Self::RemoteCall {
            status: None,
            message: message.into(),
            body: None,
        }
    }

    /// Response body captured from a failed remote call, if any
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::RemoteCall { body, .. } => body.as_deref(),
            _ => None,
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::UnknownService(_))
    }
}

/// Result type alias for twilio-mcp-agent operations
pub type Result<T> = std::result::Result<T, AgentError>;
