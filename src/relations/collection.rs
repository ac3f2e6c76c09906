//! Target collections and the field's relation target

use crate::intake::MimeAllowList;
use serde::{Deserialize, Serialize};

/// Display labels of a collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionLabels {
    #[serde(default)]
    pub singular: Option<String>,
    #[serde(default)]
    pub plural: Option<String>,
}

/// A collection records can be related from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionInfo {
    pub slug: String,
    /// Accepted upload MIME types, if the collection restricts them
    #[serde(default)]
    pub mime_types: Vec<String>,
    #[serde(default)]
    pub labels: CollectionLabels,
}

impl CollectionInfo {
    #[must_use]
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            mime_types: Vec::new(),
            labels: CollectionLabels::default(),
        }
    }

    #[must_use]
    pub fn with_singular(mut self, singular: impl Into<String>) -> Self {
        self.labels.singular = Some(singular.into());
        self
    }

    /// Upload allow-list of the collection; empty accepts everything
    #[must_use]
    pub fn allow_list(&self) -> MimeAllowList {
        MimeAllowList::new(self.mime_types.clone())
    }

    /// Singular label, or the slug when none is configured
    #[must_use]
    pub fn singular_label(&self) -> &str {
        self.labels.singular.as_deref().unwrap_or(&self.slug)
    }
}

/// Which collection(s) a relation field points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelationTo {
    /// A single target collection
    Single(String),
    /// Several target collections (polymorphic)
    Many(Vec<String>),
}

impl RelationTo {
    /// Target slugs in declaration order
    #[must_use]
    pub fn targets(&self) -> Vec<String> {
        match self {
            Self::Single(slug) => vec![slug.clone()],
            Self::Many(slugs) => slugs.clone(),
        }
    }

    #[must_use]
    pub fn includes(&self, slug: &str) -> bool {
        match self {
            Self::Single(target) => target == slug,
            Self::Many(targets) => targets.iter().any(|t| t == slug),
        }
    }

    /// The single target, if this is not polymorphic
    #[must_use]
    pub fn single(&self) -> Option<&str> {
        match self {
            Self::Single(slug) => Some(slug),
            Self::Many(_) => None,
        }
    }
}

impl Default for RelationTo {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}
