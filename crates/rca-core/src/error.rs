//! Error types for rca-core

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// A model reply that did not fit the `RootCauseAnalysis` record shape.
///
/// Keeps the raw reply verbatim so the operator can see what the model
/// actually produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// Structural error reported by the parser
    pub message: String,
    /// Unparsed model output
    pub raw: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Errors that can occur while producing a root cause analysis
#[derive(Error, Debug)]
pub enum RcaError {
    /// Input log file does not exist
    #[error("Could not find file {}", .path.display())]
    InputNotFound { path: PathBuf },

    /// Any other IO failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The inference call itself failed (transport, status, body)
    #[error("Inference request failed: {0}")]
    Inference(String),

    /// The model reply did not match the record shape
    #[error("JSON validation error: {0}")]
    Validation(SchemaViolation),

    /// Serialization of a record or schema failed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<reqwest::Error> for RcaError {
    fn from(err: reqwest::Error) -> Self {
        RcaError::Inference(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_not_found_names_path() {
        let err = RcaError::InputNotFound {
            path: PathBuf::from("sample_data/missing.txt"),
        };
        assert_eq!(
            err.to_string(),
            "Could not find file sample_data/missing.txt"
        );
    }

    #[test]
    fn test_validation_error_display_omits_raw() {
        let err = RcaError::Validation(SchemaViolation {
            message: "missing field `remediation`".to_string(),
            raw: "{\"title\": \"x\"}".to_string(),
        });
        let msg = err.to_string();
        assert!(msg.contains("missing field `remediation`"));
        assert!(!msg.contains("\"title\""));
    }
}
