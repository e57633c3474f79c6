//! Error types for camunda-deploy

use thiserror::Error;

/// Main error type for a deployment run
#[derive(Error, Debug)]
pub enum DeployError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unsupported auth type: {0}")]
    UnsupportedAuthType(String),

    #[error("Request setup failed: {message}")]
    RequestSetupFailed { message: String },

    #[error("Server rejected deployment with status {status}: {body}")]
    ServerRejected { status: u16, body: String },

    #[error("No response received for deployment '{deployment}': {reason}")]
    NoResponse { deployment: String, reason: String },

    #[error("Malformed deployment response: {0}")]
    MalformedResponse(String),
}

impl DeployError {
    /// Whether the error was raised before any I/O because of bad configuration
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            DeployError::ConfigError(_) | DeployError::UnsupportedAuthType(_)
        )
    }

    pub(crate) fn setup(message: impl Into<String>) -> Self {
        DeployError::RequestSetupFailed {
            message: message.into(),
        }
    }
}
