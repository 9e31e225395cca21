//! Unified error types for the quality cockpit.
//!
//! Only the dataset/config boundary and the store's mutating operations can
//! fail. The metric and rendering functions in [`crate::core`] are total and
//! never return these errors.

use thiserror::Error;

/// Errors raised while loading data or applying store mutations.
#[derive(Debug, Error)]
pub enum Error {
    /// The settings file could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// The dataset document is missing, malformed, or breaks a data invariant.
    #[error("Dataset error: {message}")]
    Dataset {
        /// Human-readable description of the problem
        message: String,
    },

    /// A new or updated record failed validation before reaching the store.
    #[error("Validation error: {message}")]
    Validation {
        /// Which field was rejected and why
        message: String,
    },

    /// A lookup by id or name found nothing.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind, e.g. "CAPA" or "audit"
        entity: &'static str,
        /// The id or name that was looked up
        id: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for a [`Error::Validation`] with the given message.
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Shorthand for a [`Error::NotFound`].
    pub(crate) fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = Error::not_found("CAPA", 42);
        assert_eq!(err.to_string(), "CAPA not found: 42");
    }

    #[test]
    fn test_validation_display() {
        let err = Error::validation("title must not be empty");
        assert_eq!(
            err.to_string(),
            "Validation error: title must not be empty"
        );
    }

    #[test]
    fn test_json_error_converts() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: Error = parse.unwrap_err().into();
        assert!(matches!(err, Error::Json(_)));
    }
}
