//! File handles, batches and the intake policy
//!
//! - `FileHandle`: an opaque file offered by a drop, paste or chooser
//! - `FileBatch`: the normalized, policy-conformant sequence forwarded upward
//! - `IntakePolicy`: single/multi-file switch plus the advisory MIME allow-list

use super::error::{IntakeError, Result};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where the bytes of a file handle come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// Bytes already held in memory (clipboard images, tests)
    Memory(Arc<Vec<u8>>),
    /// A file on disk, read lazily
    Path(PathBuf),
}

impl FileContent {
    /// Read the full content
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` if the backing file cannot be read.
    pub fn read(&self) -> io::Result<Vec<u8>> {
        match self {
            Self::Memory(bytes) => Ok(bytes.as_ref().clone()),
            Self::Path(path) => fs::read(path),
        }
    }
}

/// An opaque file offered to the intake surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    name: String,
    mime_type: String,
    size: u64,
    content: FileContent,
}

impl FileHandle {
    /// Create a handle over in-memory bytes
    #[must_use]
    pub fn from_bytes(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size: bytes.len() as u64,
            content: FileContent::Memory(Arc::new(bytes)),
        }
    }

    /// Create a handle for a file on disk
    ///
    /// The size is taken from the file metadata and the MIME type is guessed
    /// from the extension, falling back to `application/octet-stream`.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::NotAFile` for directories and `IntakeError::Io`
    /// if the metadata cannot be read.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let metadata = fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(IntakeError::NotAFile(path.to_path_buf()));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| IntakeError::NotAFile(path.to_path_buf()))?;
        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        Ok(Self {
            name,
            mime_type,
            size: metadata.len(),
            content: FileContent::Path(path.to_path_buf()),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    #[must_use]
    pub const fn content(&self) -> &FileContent {
        &self.content
    }

    /// Read the file's bytes
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` if the content cannot be read.
    pub fn read(&self) -> io::Result<Vec<u8>> {
        self.content.read()
    }
}

impl fmt::Display for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use byte_unit::{Byte, UnitType};

        let size = Byte::from_u64(self.size).get_appropriate_unit(UnitType::Binary);
        write!(f, "{} ({}, {size})", self.name, self.mime_type)
    }
}

/// A policy-conformant, non-empty batch of files
///
/// Only the intake surface constructs batches, so a batch handed to a
/// handler always respects the surface's single/multi-file policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBatch {
    files: Vec<FileHandle>,
}

impl FileBatch {
    /// Normalize raw files against `allow_multiple`
    ///
    /// Returns `None` when no files were offered. When multiple files are
    /// not allowed, everything after the first file is dropped.
    pub(crate) fn normalize(mut files: Vec<FileHandle>, allow_multiple: bool) -> Option<Self> {
        if files.is_empty() {
            return None;
        }
        if !allow_multiple && files.len() > 1 {
            files.truncate(1);
        }
        Some(Self { files })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Always false for batches built by the surface
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    #[must_use]
    pub fn files(&self) -> &[FileHandle] {
        &self.files
    }

    #[must_use]
    pub fn first(&self) -> Option<&FileHandle> {
        self.files.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileHandle> {
        self.files.iter()
    }

    #[must_use]
    pub fn into_files(self) -> Vec<FileHandle> {
        self.files
    }
}

impl IntoIterator for FileBatch {
    type Item = FileHandle;
    type IntoIter = std::vec::IntoIter<FileHandle>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.into_iter()
    }
}

impl<'a> IntoIterator for &'a FileBatch {
    type Item = &'a FileHandle;
    type IntoIter = std::slice::Iter<'a, FileHandle>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

/// Advisory MIME allow-list
///
/// Handed to the native file chooser as its `accept` string. Drag, drop and
/// paste sources are never filtered against it; consumers that care must call
/// [`MimeAllowList::accepts`] themselves before trusting file content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MimeAllowList {
    patterns: Vec<String>,
}

impl MimeAllowList {
    #[must_use]
    pub fn new(patterns: Vec<String>) -> Self {
        Self { patterns }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Comma-joined form used by native choosers
    #[must_use]
    pub fn accept_string(&self) -> Option<String> {
        if self.patterns.is_empty() {
            None
        } else {
            Some(self.patterns.join(","))
        }
    }

    /// Check a MIME type against the list (exact match or `type/*`)
    ///
    /// An empty list accepts everything.
    #[must_use]
    pub fn accepts(&self, mime_type: &str) -> bool {
        if self.patterns.is_empty() {
            return true;
        }

        let mime_type = mime_type.trim().to_ascii_lowercase();
        self.patterns.iter().any(|pattern| {
            let pattern = pattern.trim().to_ascii_lowercase();
            if pattern == "*/*" {
                return true;
            }
            match pattern.strip_suffix("/*") {
                Some(major) => mime_type
                    .split_once('/')
                    .is_some_and(|(m, _)| m == major),
                None => pattern == mime_type,
            }
        })
    }
}

/// Host policy for an intake surface
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntakePolicy {
    /// Forward every offered file instead of only the first
    pub allow_multiple: bool,
    /// Advisory filter for the native chooser
    pub mime_types: MimeAllowList,
}

impl IntakePolicy {
    /// Single-file policy with no MIME restriction
    #[must_use]
    pub fn single() -> Self {
        Self::default()
    }

    /// Multi-file policy with no MIME restriction
    #[must_use]
    pub fn multiple() -> Self {
        Self {
            allow_multiple: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_mime_types(mut self, mime_types: Vec<String>) -> Self {
        self.mime_types = MimeAllowList::new(mime_types);
        self
    }
}
