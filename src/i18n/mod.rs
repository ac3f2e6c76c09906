//! Localization
//!
//! Components never look translations up from ambient state; they take a
//! `&dyn Translator` (and, where dates are shown, an `I18n`) explicitly.

pub mod error;
pub mod locale;
pub mod translations;

pub use error::I18nError;
pub use locale::{BuiltinBackend, DateLocale, DirectoryBackend, I18n, LanguageBackend};
pub use translations::{Translations, Translator, interpolate};
