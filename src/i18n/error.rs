//! Error types for localization

use std::io;
use thiserror::Error;

/// Errors that can occur while loading translations
#[derive(Debug, Error)]
pub enum I18nError {
    /// No translations exist for the requested language
    #[error("Unknown language '{0}'")]
    UnknownLanguage(String),

    /// Translation file could not be parsed
    #[error("Invalid translation file for '{language}': {message}")]
    Parse { language: String, message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for localization operations
pub type Result<T> = std::result::Result<T, I18nError>;
