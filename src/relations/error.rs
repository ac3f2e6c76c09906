//! Error types for relation operations

use std::io;
use thiserror::Error;

/// Errors that can occur while editing or persisting an association list
#[derive(Debug, Error)]
pub enum RelationError {
    /// Move/remove index outside the current list
    #[error("Index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Field is read-only
    #[error("Field '{0}' is read-only")]
    ReadOnly(String),

    /// Picker failed
    #[error("Picker error: {0}")]
    Picker(String),

    /// Stored value or catalog could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<serde_json::Error> for RelationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for RelationError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for RelationError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type for relation operations
pub type Result<T> = std::result::Result<T, RelationError>;
