//! Consensus error types
//!
//! The consensus core itself is total over well-formed rankings. Errors come
//! from the JSON boundary, configuration loading, and the strict cycle policy.

use thiserror::Error;

use crate::object::RankedObject;

/// Result type alias for consensus operations
pub type ConsensusResult<T> = Result<T, ConsensusError>;

/// Errors that can occur while computing or exchanging a consensus
#[derive(Error, Debug)]
pub enum ConsensusError {
    /// Input could not be interpreted as a ranking
    #[error("Invalid ranking input: {message}")]
    InvalidInput { message: String },

    /// Cluster order could only be produced by the discovery-order fallback
    #[error("Consensus order is unresolvable for objects: {}", format_objects(.objects))]
    UnresolvableOrder { objects: Vec<RankedObject> },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConsensusError {
    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create an unresolvable order error
    pub fn unresolvable_order(objects: Vec<RankedObject>) -> Self {
        Self::UnresolvableOrder { objects }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "INVALID_INPUT",
            Self::UnresolvableOrder { .. } => "UNRESOLVABLE_ORDER",
            Self::ConfigError { .. } => "CONFIG_ERROR",
            Self::Json(_) => "JSON_ERROR",
        }
    }
}

fn format_objects(objects: &[RankedObject]) -> String {
    objects
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message() {
        let err = ConsensusError::invalid_input("expected a JSON array");
        assert_eq!(
            err.to_string(),
            "Invalid ranking input: expected a JSON array"
        );
        assert_eq!(err.code(), "INVALID_INPUT");
    }

    #[test]
    fn test_unresolvable_order_lists_objects() {
        let err = ConsensusError::unresolvable_order(vec![
            RankedObject::Int(3),
            RankedObject::Text("b".to_string()),
        ]);
        assert_eq!(
            err.to_string(),
            "Consensus order is unresolvable for objects: 3, b"
        );
        assert_eq!(err.code(), "UNRESOLVABLE_ORDER");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("[1,").unwrap_err();
        let err: ConsensusError = json_err.into();
        assert_eq!(err.code(), "JSON_ERROR");
        assert!(err.to_string().starts_with("JSON error:"));
    }
}
