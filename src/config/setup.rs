//! Interactive setup wizard for first-time configuration
//!
//! This module handles the interactive prompts for creating an initial
//! configuration when attachr is run for the first time.

use super::AttachrConfig;
use crate::relations::{CollectionInfo, RelationTo};
use config::ConfigError;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};
use std::path::Path;

/// Interactive first-time setup - prompts for the field and its targets
///
/// Guides the user through describing the relation field to edit:
/// 1. Prompts for the field path (default: "attachments")
/// 2. Prompts for the target collection(s), comma separated (default: "media")
/// 3. Asks whether drops and pastes may carry several files
/// 4. Saves the configuration to `config_path`
///
/// # Errors
///
/// Returns `ConfigError` if user input cannot be read or the configuration
/// cannot be saved.
pub fn first_time_setup(config_path: &Path) -> Result<AttachrConfig, ConfigError> {
    println!("Welcome to attachr! Let's describe the field you want to edit.\n");

    let theme = ColorfulTheme::default();

    let field_path: String = Input::with_theme(&theme)
        .with_prompt("Field path")
        .default("attachments".to_string())
        .interact_text()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

    let targets: String = Input::with_theme(&theme)
        .with_prompt("Target collection(s)")
        .default("media".to_string())
        .interact_text()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

    let allow_multiple = Confirm::with_theme(&theme)
        .with_prompt("Accept several files per drop or paste?")
        .default(false)
        .interact()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

    let config = build_config(&field_path, &targets, allow_multiple);
    config.save_to(config_path)?;

    println!("\nConfiguration saved to {}", config_path.display());
    Ok(config)
}

/// Turn the wizard's answers into a configuration
fn build_config(field_path: &str, targets: &str, allow_multiple: bool) -> AttachrConfig {
    let slugs: Vec<String> = targets
        .split(',')
        .map(str::trim)
        .filter(|slug| !slug.is_empty())
        .map(String::from)
        .collect();

    let mut config = AttachrConfig::default();
    config.field.path = field_path.trim().to_string();
    config.intake.allow_multiple = allow_multiple;

    if !slugs.is_empty() {
        config.collections = slugs.iter().map(CollectionInfo::new).collect();
        config.field.relation_to = if slugs.len() == 1 {
            RelationTo::Single(slugs[0].clone())
        } else {
            RelationTo::Many(slugs)
        };
    }

    config
}
