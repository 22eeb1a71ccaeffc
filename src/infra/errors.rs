// src/infra/errors.rs — Error types for prodkit

use thiserror::Error;

use crate::core::history::InteractionKind;

#[derive(Error, Debug)]
pub enum ToolkitError {
    // Startup errors (fatal)
    #[error("Configuration error: {0}")]
    Config(String),

    // Session errors (recoverable)
    #[error("AI usage limit reached for this session ({limit} calls). Please try again later.")]
    QuotaExceeded { limit: u32 },

    #[error("Session '{0}' not found")]
    SessionNotFound(String),

    #[error("No {0} result available for download yet")]
    NoReport(InteractionKind),

    // User errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Remote model errors (propagated, never retried)
    #[error("Model service '{provider}' error: {message}")]
    Service { provider: String, message: String },

    // Infra
    #[error("Prompt template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ToolkitError {
    pub fn service(provider: &str, message: impl Into<String>) -> Self {
        ToolkitError::Service {
            provider: provider.to_string(),
            message: message.into(),
        }
    }

    /// Whether the caller can keep using the session after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ToolkitError::QuotaExceeded { .. }
                | ToolkitError::InvalidInput(_)
                | ToolkitError::NoReport(_)
        )
    }
}
