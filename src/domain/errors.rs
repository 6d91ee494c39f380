//! Domain error types
//!
//! This module defines the error hierarchy for Shroud. Engine errors are
//! whole-call failures: when one is returned, no text was transformed.
//! All errors are domain-specific and don't expose third-party types.

use crate::anonymization::operators::OperatorType;
use thiserror::Error;

/// Message returned to callers for failures that must not leak internals
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Main Shroud error type
#[derive(Debug, Error)]
pub enum ShroudError {
    /// Malformed or out-of-range entity span
    #[error("Invalid span: {0}")]
    InvalidSpan(String),

    /// Configuration names an operator that is not registered
    #[error("Invalid operator class '{name}' for {operator_type} operation")]
    UnknownOperator {
        name: String,
        operator_type: OperatorType,
    },

    /// Configuration names an operator that is disallowed at this boundary
    #[error("{0}")]
    UnsupportedOperator(String),

    /// Operator-specific parameter validation failure
    #[error("{0}")]
    InvalidParam(String),

    /// Deanonymize requested for an entity produced by a one-way operator
    #[error(
        "Entity {index} ({entity_type}) cannot be deanonymized: operator '{operator}' is not reversible"
    )]
    OperatorNotReversible {
        index: usize,
        entity_type: String,
        operator: String,
    },

    /// Registry misconfiguration, raised while populating the registry
    #[error("Operator '{name}' is already registered for {operator_type}")]
    DuplicateOperator {
        name: String,
        operator_type: OperatorType,
    },

    /// Request body could not be parsed
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl ShroudError {
    /// Whether the error was caused by the caller's data or configuration
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }

    /// Transport status a gateway should answer with
    ///
    /// Parameter, span, operator and reversibility failures map to 422,
    /// disallowed operators and unparsable requests to 400, the rest to 500.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidParam(_)
            | Self::InvalidSpan(_)
            | Self::UnknownOperator { .. }
            | Self::OperatorNotReversible { .. } => 422,
            Self::UnsupportedOperator(_) | Self::InvalidRequest(_) => 400,
            Self::DuplicateOperator { .. }
            | Self::Configuration(_)
            | Self::Serialization(_)
            | Self::Io(_) => 500,
        }
    }

    /// Message safe to return to a remote caller
    pub fn public_message(&self) -> String {
        if self.is_client_error() {
            self.to_string()
        } else {
            INTERNAL_ERROR_MESSAGE.to_string()
        }
    }
}

impl From<std::io::Error> for ShroudError {
    fn from(err: std::io::Error) -> Self {
        ShroudError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ShroudError {
    fn from(err: serde_json::Error) -> Self {
        ShroudError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for ShroudError {
    fn from(err: toml::de::Error) -> Self {
        ShroudError::Configuration(format!("TOML parse error: {err}"))
    }
}
