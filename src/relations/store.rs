//! Persistent value accessors
//!
//! The value store is the only owner of an association list. The manager
//! reads it at the start of every operation and writes the result back once.

use super::error::Result;
use super::list::AssociationValue;
use std::fs;
use std::path::{Path, PathBuf};

/// Host-owned storage for a relation field
pub trait ValueStore {
    /// Current value of the field
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn get_value(&self) -> Result<AssociationValue>;

    /// Replace the field's value
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn set_value(&mut self, value: AssociationValue) -> Result<()>;
}

/// In-memory store that also records every write
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    value: AssociationValue,
    writes: Vec<AssociationValue>,
}

impl MemoryStore {
    #[must_use]
    pub fn new(initial: AssociationValue) -> Self {
        Self {
            value: initial,
            writes: Vec::new(),
        }
    }

    /// Store holding `ids`
    #[must_use]
    pub fn with_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Some(ids.into_iter().map(Into::into).collect()))
    }

    #[must_use]
    pub const fn value(&self) -> &AssociationValue {
        &self.value
    }

    /// Every value passed to `set_value`, oldest first
    #[must_use]
    pub fn writes(&self) -> &[AssociationValue] {
        &self.writes
    }

    /// Change the value behind the manager's back (form reset, undo, ...)
    pub fn reset(&mut self, value: AssociationValue) {
        self.value = value;
    }
}

impl ValueStore for MemoryStore {
    fn get_value(&self) -> Result<AssociationValue> {
        Ok(self.value.clone())
    }

    fn set_value(&mut self, value: AssociationValue) -> Result<()> {
        self.writes.push(value.clone());
        self.value = value;
        Ok(())
    }
}

/// Store persisting the value as JSON (`null` or an array of ids)
///
/// Every read goes to disk; nothing is cached between operations.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ValueStore for JsonFileStore {
    fn get_value(&self) -> Result<AssociationValue> {
        if !self.path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&self.path)?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        Ok(serde_json::from_str(&text)?)
    }

    fn set_value(&mut self, value: AssociationValue) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&value)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
