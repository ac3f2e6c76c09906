//! Error types for the intake surface
//!
//! Intake itself never fails on an event; these errors only come from
//! building file handles out of platform paths and clipboard contents.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while turning platform input into file handles
#[derive(Debug, Error)]
pub enum IntakeError {
    /// Path exists but is not a regular file
    #[error("Not a regular file: {}", .0.display())]
    NotAFile(PathBuf),

    /// Clipboard could not be accessed
    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for intake operations
pub type Result<T> = std::result::Result<T, IntakeError>;
