// src/error.rs

//! Unified error handling for the directory and its handlers.

use std::fmt;

use thiserror::Error;

/// Result type alias for directory operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
///
/// Lookup misses are not represented here: a slug that matches nothing is an
/// `Option::None`, not an error.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A static dataset did not match its schema
    #[error("Invalid dataset '{dataset}': {message}")]
    Dataset { dataset: String, message: String },

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Storage backend error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Caller identity missing
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// Caller lacks the required role
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Referenced document does not exist
    #[error("Not found: {collection}/{id}")]
    NotFound { collection: String, id: String },
}

impl AppError {
    /// Create a dataset schema error.
    pub fn dataset(dataset: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Dataset {
            dataset: dataset.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a storage error.
    pub fn storage(message: impl fmt::Display) -> Self {
        Self::Storage(message.to_string())
    }

    /// Create an authentication error.
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated(message.into())
    }

    /// Create a permission error.
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied(message.into())
    }

    /// Create a missing-document error.
    pub fn not_found(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            collection: collection.into(),
            id: id.into(),
        }
    }

    /// Short machine-readable code, returned to serverless callers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthenticated(_) => "unauthenticated",
            Self::PermissionDenied(_) => "permission-denied",
            Self::Validation(_) => "invalid-argument",
            Self::NotFound { .. } => "not-found",
            _ => "internal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(AppError::unauthenticated("x").code(), "unauthenticated");
        assert_eq!(AppError::permission_denied("x").code(), "permission-denied");
        assert_eq!(AppError::validation("x").code(), "invalid-argument");
        assert_eq!(AppError::not_found("users", "u1").code(), "not-found");
        assert_eq!(AppError::config("x").code(), "internal");
    }

    #[test]
    fn test_dataset_message() {
        let err = AppError::dataset("series.json", "missing field `sigle`");
        assert_eq!(
            err.to_string(),
            "Invalid dataset 'series.json': missing field `sigle`"
        );
    }
}
