//! Document lookup and the local catalog
//!
//! The manager only needs to turn an identifier into something displayable.
//! `Catalog` is a small TOML-backed implementation used by the CLI: it keeps
//! metadata about registered files, never their bytes.

use super::error::Result;
use super::filter::FilterOptions;
use super::list::RecordId;
use crate::intake::FileHandle;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Displayable summary of a related record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocSummary {
    pub id: RecordId,
    pub collection: String,
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filesize: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl DocSummary {
    #[must_use]
    pub fn new(id: impl Into<String>, collection: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            collection: collection.into(),
            filename: filename.into(),
            mime_type: None,
            filesize: None,
            updated_at: None,
        }
    }
}

/// Resolves identifiers to record summaries
pub trait DocumentLookup {
    /// Summary for `id`, or `None` if the record is unknown
    fn resolve(&self, id: &str) -> Option<DocSummary>;
}

/// Local record catalog persisted as TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    documents: Vec<DocSummary>,
}

impl Catalog {
    #[must_use]
    pub fn new(documents: Vec<DocSummary>) -> Self {
        Self { documents }
    }

    /// Load a catalog; a missing file is an empty catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Write the catalog, creating parent directories as needed
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    #[must_use]
    pub fn documents(&self) -> &[DocSummary] {
        &self.documents
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Record a file's metadata under `collection`, returning its new id
    ///
    /// Ids are `<collection>-<n>` with `n` one past the highest in use.
    pub fn register(&mut self, collection: &str, file: &FileHandle) -> RecordId {
        let prefix = format!("{collection}-");
        let next = self
            .documents
            .iter()
            .filter_map(|doc| doc.id.strip_prefix(&prefix)?.parse::<u64>().ok())
            .max()
            .map_or(1, |n| n + 1);

        let id = format!("{prefix}{next}");
        self.documents.push(DocSummary {
            id: id.clone(),
            collection: collection.to_string(),
            filename: file.name().to_string(),
            mime_type: Some(file.mime_type().to_string()),
            filesize: Some(file.size()),
            updated_at: Some(Utc::now()),
        });
        id
    }

    /// Records of `collections` that `filters` admit, in catalog order
    #[must_use]
    pub fn candidates(&self, collections: &[String], filters: &FilterOptions) -> Vec<&DocSummary> {
        self.documents
            .iter()
            .filter(|doc| collections.iter().any(|c| *c == doc.collection))
            .filter(|doc| filters.admits(&doc.collection, &doc.id))
            .collect()
    }
}

impl DocumentLookup for Catalog {
    fn resolve(&self, id: &str) -> Option<DocSummary> {
        self.documents.iter().find(|doc| doc.id == id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relations::filter::CollectionFilter;

    fn file(name: &str) -> FileHandle {
        FileHandle::from_bytes(name, "image/png", vec![0; 10])
    }

    #[test]
    fn test_register_assigns_sequential_ids() {
        let mut catalog = Catalog::default();
        let first = catalog.register("media", &file("a.png"));
        let second = catalog.register("media", &file("b.png"));
        let other = catalog.register("docs", &file("c.png"));

        assert_eq!(first, "media-1");
        assert_eq!(second, "media-2");
        assert_eq!(other, "docs-1");

        let doc = catalog.resolve("media-2").unwrap();
        assert_eq!(doc.filename, "b.png");
        assert_eq!(doc.filesize, Some(10));
        assert_eq!(doc.mime_type.as_deref(), Some("image/png"));
    }

    #[test]
    fn test_candidates_apply_filters() {
        let catalog = Catalog::new(vec![
            DocSummary::new("m1", "media", "a.png"),
            DocSummary::new("m2", "media", "b.png"),
            DocSummary::new("d1", "docs", "c.pdf"),
        ]);
        let mut filters = FilterOptions::new();
        filters.insert("media", CollectionFilter::not_in(vec!["m1".into()]));

        let ids: Vec<_> = catalog
            .candidates(&["media".to_string()], &filters)
            .into_iter()
            .map(|doc| doc.id.as_str())
            .collect();
        assert_eq!(ids, vec!["m2"]);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");

        let mut catalog = Catalog::default();
        catalog.register("media", &file("a.png"));
        catalog.save(&path).unwrap();

        let loaded = Catalog::load(&path).unwrap();
        assert_eq!(loaded, catalog);
    }

    #[test]
    fn test_load_missing_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::load(&dir.path().join("none.toml")).unwrap();
        assert!(catalog.is_empty());
    }
}
