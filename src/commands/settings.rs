//! Labels, language and config commands

use crate::Result;
use crate::config::AttachrConfig;
use crate::i18n::{I18n, LanguageBackend, Translator};
use crate::relations::{RelationManager, ValueStore};
use crate::ui::OutputWriter;
use std::path::Path;

/// Execute the labels command - print "A, B or C" for the eligible collections
pub fn labels<S: ValueStore>(manager: &RelationManager<S>, translator: &dyn Translator, output: &dyn OutputWriter) {
    output.write(&manager.label_set(translator));
}

/// Execute the language command
///
/// On success the language is stored in the configuration at `config_path`.
/// A language that cannot be loaded leaves both the active state and the
/// configuration unchanged and is reported, not returned as an error.
///
/// # Errors
/// Returns an error if the configuration cannot be saved
pub fn language(
    config: &mut AttachrConfig,
    config_path: &Path,
    i18n: &mut I18n,
    backend: &mut dyn LanguageBackend,
    language: &str,
    output: &dyn OutputWriter,
) -> Result<bool> {
    if !i18n.switch_language(backend, language) {
        output.warning(&format!(
            "Language '{language}' is not available; staying on '{}'",
            i18n.language()
        ));
        return Ok(false);
    }

    config.language = language.to_string();
    config.save_to(config_path)?;
    output.success(&format!(
        "Language set to '{language}' (dates as {})",
        i18n.date_locale().key()
    ));
    Ok(true)
}

/// Execute `config show`
///
/// # Errors
/// Returns an error if the configuration cannot be serialized
pub fn config_show(config: &AttachrConfig, output: &dyn OutputWriter) -> Result<()> {
    output.write(config.to_toml()?.trim_end());
    Ok(())
}

/// Execute `config path`
pub fn config_path(path: &Path, output: &dyn OutputWriter) {
    output.write(&path.display().to_string());
}
