//! Error types for agentcore-relay
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur in the relay
#[derive(Debug, Error)]
pub enum RelayError {
    /// Invalid or incomplete configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Malformed custom resource event
    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    /// Build service call failed (status query or start)
    #[error("Build service error: {0}")]
    BuildService(String),

    /// Agent runtime invocation failed
    #[error("Agent runtime error: {0}")]
    AgentRuntime(String),

    /// Outcome could not be delivered to the callback URL
    #[error("Delivery error: {0}")]
    Delivery(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl RelayError {
    /// The bare downstream message, without the category prefix.
    ///
    /// Used for HTTP error bodies and outcome reasons, which surface the
    /// service's own wording to the caller.
    pub fn detail(&self) -> String {
        match self {
            RelayError::Config(msg)
            | RelayError::InvalidEvent(msg)
            | RelayError::BuildService(msg)
            | RelayError::AgentRuntime(msg)
            | RelayError::Delivery(msg) => msg.clone(),
            RelayError::Io(e) => e.to_string(),
            RelayError::Json(e) => e.to_string(),
            RelayError::Yaml(e) => e.to_string(),
        }
    }
}

/// Result type alias for relay operations
pub type Result<T> = std::result::Result<T, RelayError>;
