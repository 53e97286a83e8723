//! Connector error types.

use bithumb_domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the Bithumb REST client.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BithumbError {
    /// Missing credentials or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Inconsistent parameter combination, rejected before sending
    #[error("Invalid parameter: {0}")]
    Validation(String),

    /// HTTP status other than 200
    #[error("{method}({path}) failed (status code: {status})")]
    Transport {
        /// HTTP method
        method: &'static str,
        /// Request path
        path: String,
        /// HTTP status code received
        status: u16,
    },

    /// Request could not be sent or no response was received
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// Envelope status other than "0000"
    #[error("Bithumb API error: {code} - {message} (https://apidocs.bithumb.com/docs/err_code)")]
    Api {
        /// Exchange status code (empty when the envelope had none)
        code: String,
        /// Exchange message
        message: String,
    },

    /// Body is not JSON or does not match the expected model
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Failed to build request signature
    #[error("Failed to build signature: {0}")]
    Signature(String),

    /// Value object rejected
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

impl BithumbError {
    /// True for non-200 HTTP responses.
    pub fn is_transport(&self) -> bool {
        matches!(self, BithumbError::Transport { .. })
    }

    /// True for envelope-level failures.
    pub fn is_api(&self) -> bool {
        matches!(self, BithumbError::Api { .. })
    }

    /// Exchange status code of an API error.
    pub fn api_code(&self) -> Option<&str> {
        match self {
            BithumbError::Api { code, .. } => Some(code),
            _ => None,
        }
    }
}

/// Result type for connector operations.
pub type BithumbResult<T> = Result<T, BithumbError>;
