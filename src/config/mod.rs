//! Configuration module for attachr
//!
//! Manages the relation field being edited, the intake policy, the target
//! collections and where the value and catalog are stored. Configuration is
//! stored in the user's config directory unless `--config` names a file.

mod setup;

pub use setup::first_time_setup;

use crate::i18n::{BuiltinBackend, DirectoryBackend, LanguageBackend};
use crate::intake::IntakePolicy;
use crate::relations::{CollectionInfo, FieldSettings, FilterOptions, RelationTo};
use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "attachr";

fn default_language() -> String {
    "en".to_string()
}

fn default_field() -> FieldSettings {
    FieldSettings::new("attachments", RelationTo::Single("media".to_string()))
}

fn default_collections() -> Vec<CollectionInfo> {
    vec![CollectionInfo::new("media").with_singular("Media")]
}

/// Intake surface settings
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct IntakeSettings {
    /// Accept several files per drop/paste/selection
    #[serde(default)]
    pub allow_multiple: bool,

    /// MIME patterns offered to the file chooser
    #[serde(default)]
    pub mime_types: Vec<String>,
}

impl IntakeSettings {
    /// Policy the intake surface is built with
    #[must_use]
    pub fn policy(&self) -> IntakePolicy {
        IntakePolicy {
            allow_multiple: self.allow_multiple,
            ..IntakePolicy::default()
        }
        .with_mime_types(self.mime_types.clone())
    }
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AttachrConfig {
    /// Active UI language
    #[serde(default = "default_language")]
    pub language: String,

    /// Language consulted for keys missing from the active one
    #[serde(default = "default_language")]
    pub fallback_language: String,

    /// Directory of extra `<lang>.toml` translation files
    #[serde(default)]
    pub locales_dir: Option<PathBuf>,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,

    /// Where the association value is stored
    #[serde(default)]
    pub store_path: Option<PathBuf>,

    /// Where the record catalog is stored
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    #[serde(default)]
    pub intake: IntakeSettings,

    /// The relation field being edited
    #[serde(default = "default_field")]
    pub field: FieldSettings,

    /// Collections known to the host
    #[serde(default = "default_collections")]
    pub collections: Vec<CollectionInfo>,

    /// Caller-supplied picker filters, keyed by collection
    #[serde(default)]
    pub base_filters: FilterOptions,
}

impl Default for AttachrConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            fallback_language: default_language(),
            locales_dir: None,
            quiet: false,
            store_path: None,
            catalog_path: None,
            intake: IntakeSettings::default(),
            field: default_field(),
            collections: default_collections(),
            base_filters: FilterOptions::default(),
        }
    }
}

impl AttachrConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join(APP_DIR).join("config.toml"))
    }

    fn data_dir() -> Result<PathBuf, ConfigError> {
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine data directory".to_string()))?;
        Ok(data_dir.join(APP_DIR))
    }

    /// Load configuration from the default location, creating it if missing
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save_to(&config_path)?;
            return Ok(default_config);
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is missing or cannot be parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration, running first-time setup if config doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if loading or creating the configuration fails.
    pub fn load_or_setup() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            first_time_setup(&config_path)
        }
    }

    /// Save configuration to the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the path cannot be determined or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = self.to_toml()?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Serialize to pretty TOML
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))
    }

    /// Configured store path, or `<data_dir>/attachr/<field path>.json`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no path is configured and the data directory
    /// cannot be determined.
    pub fn store_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.store_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::data_dir()?.join(format!("{}.json", self.field.path))),
        }
    }

    /// Configured catalog path, or `<data_dir>/attachr/catalog.toml`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no path is configured and the data directory
    /// cannot be determined.
    pub fn catalog_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.catalog_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::data_dir()?.join("catalog.toml")),
        }
    }

    /// Backend that loads translations for a language switch
    #[must_use]
    pub fn language_backend(&self) -> Box<dyn LanguageBackend> {
        match &self.locales_dir {
            Some(dir) => Box::new(DirectoryBackend::new(dir)),
            None => Box::new(BuiltinBackend),
        }
    }
}
