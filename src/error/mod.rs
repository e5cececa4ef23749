//! Error types for deepsearch.

pub mod unified;

pub use unified::ErrorCategory;

use thiserror::Error;

/// Primary error type for all deepsearch operations.
#[derive(Error, Debug)]
pub enum DeepSearchError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// A caller or collaborator broke an interface contract.
    #[error("Contract violation: {0}")]
    ContractViolation(String),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Tool execution error: {tool_name}: {message}")]
    ToolExecution { tool_name: String, message: String },
}

impl DeepSearchError {
    /// Create an API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a contract violation.
    pub fn contract(message: impl Into<String>) -> Self {
        Self::ContractViolation(message.into())
    }

    /// Create a tool execution error.
    pub fn tool(tool_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolExecution {
            tool_name: tool_name.into(),
            message: message.into(),
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Configuration(_) | Self::Authentication(_) => ErrorCategory::Configuration,
            Self::Api { .. }
            | Self::Network(_)
            | Self::Io(_)
            | Self::Serialization(_)
            | Self::InvalidResponse(_) => ErrorCategory::Transport,
            Self::ContractViolation(_) | Self::ToolNotFound(_) | Self::InvalidArgument(_) => {
                ErrorCategory::Contract
            }
            Self::ToolExecution { .. } => ErrorCategory::ToolExecution,
        }
    }

    /// Whether this error signals a bug in calling code rather than a runtime failure.
    pub fn is_contract_violation(&self) -> bool {
        self.category() == ErrorCategory::Contract
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, DeepSearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display() {
        let err = DeepSearchError::api(502, "bad gateway");
        assert_eq!(err.to_string(), "API error (status 502): bad gateway");
        assert_eq!(err.category(), ErrorCategory::Transport);
    }

    #[test]
    fn categories_follow_taxonomy() {
        assert_eq!(
            DeepSearchError::Configuration("SERPAPI_API_KEY is not set".into()).category(),
            ErrorCategory::Configuration
        );
        assert!(DeepSearchError::contract("type must be function").is_contract_violation());
        assert!(DeepSearchError::ToolNotFound("missing".into()).is_contract_violation());
        assert_eq!(
            DeepSearchError::tool("search_serp", "boom").category(),
            ErrorCategory::ToolExecution
        );
        let serde_error = serde_json::from_str::<serde_json::Value>("{nope").unwrap_err();
        assert_eq!(
            DeepSearchError::from(serde_error).category(),
            ErrorCategory::Transport
        );
    }
}
