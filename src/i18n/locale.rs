//! Active locale state and language switching
//!
//! `I18n` owns the current language, its translations, the fallback table
//! and the date locale. Switching languages goes through a
//! `LanguageBackend`; a failed switch is logged and leaves every piece of
//! prior state in place.

use super::error::{I18nError, Result};
use super::translations::{Translations, Translator, interpolate};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::PathBuf;

/// Date rendering rules for one locale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateLocale {
    key: &'static str,
    pattern: &'static str,
}

const DATE_LOCALES: &[DateLocale] = &[
    DateLocale { key: "en-US", pattern: "%m/%d/%Y %H:%M" },
    DateLocale { key: "en-GB", pattern: "%d/%m/%Y %H:%M" },
    DateLocale { key: "de", pattern: "%d.%m.%Y %H:%M" },
    DateLocale { key: "fr", pattern: "%d/%m/%Y %H:%M" },
    DateLocale { key: "ja", pattern: "%Y/%m/%d %H:%M" },
];

impl DateLocale {
    /// Look up a date locale by key (`en-US`, `de`, ...)
    #[must_use]
    pub fn resolve(key: &str) -> Option<Self> {
        DATE_LOCALES
            .iter()
            .find(|locale| locale.key.eq_ignore_ascii_case(key))
            .copied()
    }

    /// Date locale key conventionally used for a UI language
    #[must_use]
    pub fn key_for_language(language: &str) -> String {
        match language {
            "en" => "en-US".to_string(),
            other => other.to_string(),
        }
    }

    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.key
    }

    #[must_use]
    pub fn format(&self, timestamp: &DateTime<Utc>) -> String {
        timestamp.format(self.pattern).to_string()
    }
}

impl Default for DateLocale {
    fn default() -> Self {
        DATE_LOCALES[0]
    }
}

/// Source of translations for a language switch
pub trait LanguageBackend {
    /// Produce the translation table for `language`
    ///
    /// # Errors
    ///
    /// Returns an error if the language is unknown or cannot be loaded.
    fn load(&mut self, language: &str) -> Result<Translations>;
}

/// Backend over the tables that ship with the crate
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinBackend;

impl LanguageBackend for BuiltinBackend {
    fn load(&mut self, language: &str) -> Result<Translations> {
        Translations::builtin(language).ok_or_else(|| I18nError::UnknownLanguage(language.to_string()))
    }
}

/// Backend reading `<dir>/<language>.toml`, layered over the built-in table
#[derive(Debug, Clone)]
pub struct DirectoryBackend {
    dir: PathBuf,
}

impl DirectoryBackend {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl LanguageBackend for DirectoryBackend {
    fn load(&mut self, language: &str) -> Result<Translations> {
        let path = self.dir.join(format!("{language}.toml"));

        if !path.exists() {
            return BuiltinBackend.load(language);
        }

        let text = fs::read_to_string(&path)?;
        let from_file = Translations::from_toml_str(language, &text)?;
        let mut translations =
            Translations::builtin(language).unwrap_or_else(|| Translations::empty(language));
        translations.extend(from_file);
        Ok(translations)
    }
}

/// Current localization state
pub struct I18n {
    translations: Translations,
    fallback: Translations,
    date_locale: DateLocale,
    on_switched: Option<Box<dyn FnMut(&str)>>,
}

impl I18n {
    /// English with English fallback
    #[must_use]
    pub fn english() -> Self {
        Self::new(Translations::english(), Translations::english())
    }

    /// Build state from an active table and a fallback table
    #[must_use]
    pub fn new(translations: Translations, fallback: Translations) -> Self {
        let date_locale = DateLocale::resolve(&DateLocale::key_for_language(translations.language()))
            .unwrap_or_default();
        Self {
            translations,
            fallback,
            date_locale,
            on_switched: None,
        }
    }

    /// Load `language` with `fallback_language` underneath
    ///
    /// A language that cannot be loaded is logged and replaced by the
    /// fallback; a missing fallback degrades to English.
    pub fn load(backend: &mut dyn LanguageBackend, language: &str, fallback_language: &str) -> Self {
        let fallback = backend.load(fallback_language).unwrap_or_else(|e| {
            tracing::warn!(language = fallback_language, error = %e, "fallback language unavailable");
            Translations::english()
        });
        let translations = backend.load(language).unwrap_or_else(|e| {
            tracing::error!(language, error = %e, "Error loading language");
            fallback.clone()
        });
        Self::new(translations, fallback)
    }

    /// Hook run after every successful switch (e.g. to clear host caches)
    #[must_use]
    pub fn with_on_switched(mut self, hook: impl FnMut(&str) + 'static) -> Self {
        self.on_switched = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn language(&self) -> &str {
        self.translations.language()
    }

    #[must_use]
    pub fn fallback_language(&self) -> &str {
        self.fallback.language()
    }

    #[must_use]
    pub const fn date_locale(&self) -> DateLocale {
        self.date_locale
    }

    /// Switch the active language
    ///
    /// Returns whether the switch took effect. Failures are logged and never
    /// propagate; translations and date locale stay as they were.
    pub fn switch_language(&mut self, backend: &mut dyn LanguageBackend, language: &str) -> bool {
        match backend.load(language) {
            Ok(translations) => {
                self.translations = translations;
                self.set_date_locale(&DateLocale::key_for_language(language));
                if let Some(hook) = self.on_switched.as_mut() {
                    hook(language);
                }
                tracing::info!(language, "switched language");
                true
            }
            Err(e) => {
                tracing::error!(language, error = %e, "Error loading language: \"{language}\"");
                false
            }
        }
    }

    /// Change the date locale; unknown keys keep the current one
    pub fn set_date_locale(&mut self, key: &str) -> bool {
        match DateLocale::resolve(key) {
            Some(locale) => {
                self.date_locale = locale;
                true
            }
            None => {
                tracing::warn!(key, current = self.date_locale.key(), "unknown date locale");
                false
            }
        }
    }

    /// Format a timestamp with the active date locale
    #[must_use]
    pub fn format_date(&self, timestamp: &DateTime<Utc>) -> String {
        self.date_locale.format(timestamp)
    }
}

impl Translator for I18n {
    fn translate(&self, key: &str, vars: &[(&str, &str)]) -> String {
        self.translations
            .get(key)
            .or_else(|| self.fallback.get(key))
            .map_or_else(|| key.to_string(), |text| interpolate(text, vars))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct FailingBackend;

    impl LanguageBackend for FailingBackend {
        fn load(&mut self, language: &str) -> Result<Translations> {
            Err(I18nError::UnknownLanguage(language.to_string()))
        }
    }

    #[test]
    fn test_switch_language_success() {
        let switched = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::clone(&switched);
        let mut i18n = I18n::english().with_on_switched(move |lang: &str| seen.borrow_mut().push(lang.to_string()));

        assert!(i18n.switch_language(&mut BuiltinBackend, "de"));
        assert_eq!(i18n.language(), "de");
        assert_eq!(i18n.t("general:or"), "oder");
        assert_eq!(i18n.date_locale().key(), "de");
        assert_eq!(*switched.borrow(), vec!["de".to_string()]);
    }

    #[test]
    fn test_failed_switch_keeps_prior_state() {
        let mut i18n = I18n::english();
        let before = i18n.date_locale();

        assert!(!i18n.switch_language(&mut FailingBackend, "de"));
        assert_eq!(i18n.language(), "en");
        assert_eq!(i18n.t("general:or"), "or");
        assert_eq!(i18n.date_locale(), before);
    }

    #[test]
    fn test_fallback_lookup() {
        let partial = Translations::from_toml_str("fr", "[general]\nor = \"ou\"\n").unwrap();
        let i18n = I18n::new(partial, Translations::english());

        assert_eq!(i18n.t("general:or"), "ou");
        assert_eq!(i18n.t("fields:addNew"), "Add new");
        assert_eq!(i18n.t("nothing:here"), "nothing:here");
        assert_eq!(i18n.date_locale().key(), "fr");
    }

    #[test]
    fn test_directory_backend_layers_file_over_builtin() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("de.toml"), "[general]\nor = \"bzw.\"\n").unwrap();

        let mut backend = DirectoryBackend::new(dir.path());
        let de = backend.load("de").unwrap();
        assert_eq!(de.t("general:or"), "bzw.");
        assert_eq!(de.t("fields:addNew"), "Neu erstellen");

        assert!(backend.load("xx").is_err());
    }

    #[test]
    fn test_load_with_unknown_language_uses_fallback() {
        let i18n = I18n::load(&mut BuiltinBackend, "xx", "en");
        assert_eq!(i18n.language(), "en");
        assert_eq!(i18n.t("general:or"), "or");
    }

    #[test]
    fn test_date_locale_formatting() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
        let mut i18n = I18n::english();

        assert_eq!(i18n.format_date(&ts), "03/09/2024 14:05");
        assert!(i18n.set_date_locale("de"));
        assert_eq!(i18n.format_date(&ts), "09.03.2024 14:05");
        assert!(!i18n.set_date_locale("tlh"));
        assert_eq!(i18n.date_locale().key(), "de");
    }
}
