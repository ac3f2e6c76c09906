//! Attachr - file intake and ordered relation management
//!
//! This library provides the two halves of an upload-backed relation field:
//! an intake surface that turns drops, pastes and chooser selections into
//! policy-conformant file batches, and a manager that keeps the field's
//! ordered list of related record ids.

use thiserror::Error;

pub mod cli;
pub mod commands;
pub mod config;
pub mod i18n;
pub mod intake;
pub mod logging;
pub mod relations;
pub mod ui;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum AttachrError {
    /// Intake surface error
    #[error("Intake error: {0}")]
    IntakeError(#[from] intake::IntakeError),
    /// Association list error
    #[error("Relation error: {0}")]
    RelationError(#[from] relations::RelationError),
    /// Localization error
    #[error("Localization error: {0}")]
    I18nError(#[from] i18n::I18nError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    /// Interactive prompt error
    #[error("Prompt error: {0}")]
    PromptError(#[from] dialoguer::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type used by the command layer
pub type Result<T> = std::result::Result<T, AttachrError>;
