//! Translation tables and the `Translator` trait
//!
//! Keys are `namespace:key` (e.g. `upload:selectFile`). Translation files are
//! TOML with one table per namespace:
//!
//! ```toml
//! [upload]
//! selectFile = "Select a file"
//!
//! [general]
//! or = "or"
//! ```
//!
//! Values may reference variables as `{{name}}`.

use super::error::{I18nError, Result};
use std::collections::HashMap;

/// Anything that can turn a key into display text
pub trait Translator {
    /// Translate `key`, substituting `{{name}}` placeholders from `vars`
    ///
    /// Missing keys translate to the key itself.
    fn translate(&self, key: &str, vars: &[(&str, &str)]) -> String;

    /// Translate without variables
    fn t(&self, key: &str) -> String {
        self.translate(key, &[])
    }
}

const EN: &[(&str, &str)] = &[
    ("general:or", "or"),
    ("general:clearAll", "Clear all"),
    ("general:noResults", "No {{label}} found."),
    ("upload:selectFile", "Select a file"),
    ("upload:pasteURL", "Paste URL"),
    ("upload:dragAndDrop", "drag and drop a file"),
    ("upload:filesAccepted", "{{count}} file(s) accepted"),
    ("fields:addNew", "Add new"),
    ("fields:chooseFromExisting", "Choose from existing"),
    ("fields:chooseLabel", "Choose {{label}}"),
];

const DE: &[(&str, &str)] = &[
    ("general:or", "oder"),
    ("general:clearAll", "Alle entfernen"),
    ("general:noResults", "Keine {{label}} gefunden."),
    ("upload:selectFile", "Datei auswählen"),
    ("upload:pasteURL", "URL einfügen"),
    ("upload:dragAndDrop", "Datei per Drag & Drop ablegen"),
    ("upload:filesAccepted", "{{count}} Datei(en) übernommen"),
    ("fields:addNew", "Neu erstellen"),
    ("fields:chooseFromExisting", "Aus vorhandenen wählen"),
    ("fields:chooseLabel", "{{label}} auswählen"),
];

/// Flat translation table for one language
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translations {
    language: String,
    entries: HashMap<String, String>,
}

impl Translations {
    /// Empty table for `language`
    #[must_use]
    pub fn empty(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            entries: HashMap::new(),
        }
    }

    /// Built-in English table
    #[must_use]
    pub fn english() -> Self {
        Self::from_pairs("en", EN)
    }

    /// Built-in table for `language`, if one ships with the crate
    #[must_use]
    pub fn builtin(language: &str) -> Option<Self> {
        match language {
            "en" => Some(Self::english()),
            "de" => Some(Self::from_pairs("de", DE)),
            _ => None,
        }
    }

    fn from_pairs(language: &str, pairs: &[(&str, &str)]) -> Self {
        Self {
            language: language.to_string(),
            entries: pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        }
    }

    /// Parse a namespaced TOML translation file
    ///
    /// # Errors
    ///
    /// Returns `I18nError::Parse` if the text is not valid TOML or a
    /// namespace contains something other than strings.
    pub fn from_toml_str(language: &str, text: &str) -> Result<Self> {
        let parse_error = |message: String| I18nError::Parse {
            language: language.to_string(),
            message,
        };

        let table: toml::Table = toml::from_str(text).map_err(|e| parse_error(e.to_string()))?;
        let mut entries = HashMap::new();

        for (namespace, value) in table {
            let toml::Value::Table(keys) = value else {
                return Err(parse_error(format!("'{namespace}' is not a table")));
            };
            for (key, value) in keys {
                let toml::Value::String(text) = value else {
                    return Err(parse_error(format!("'{namespace}:{key}' is not a string")));
                };
                entries.insert(format!("{namespace}:{key}"), text);
            }
        }

        Ok(Self {
            language: language.to_string(),
            entries,
        })
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Overlay `other` on top of this table
    pub fn extend(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }
}

impl Translator for Translations {
    fn translate(&self, key: &str, vars: &[(&str, &str)]) -> String {
        match self.get(key) {
            Some(text) => interpolate(text, vars),
            None => key.to_string(),
        }
    }
}

/// Replace `{{name}}` placeholders; unknown names are left as-is
#[must_use]
pub fn interpolate(text: &str, vars: &[(&str, &str)]) -> String {
    if vars.is_empty() || !text.contains("{{") {
        return text.to_string();
    }

    let mut out = text.to_string();
    for (name, value) in vars {
        out = out.replace(&format!("{{{{{name}}}}}"), value);
    }
    out
}
