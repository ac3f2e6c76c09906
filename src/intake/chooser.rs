//! Native file chooser abstraction
//!
//! The surface opens a chooser for manual selection and funnels whatever it
//! returns through the same normalization as drops and pastes.

use super::error::Result;
use super::types::{FileHandle, MimeAllowList};
use std::path::PathBuf;

/// Options the surface passes to a chooser
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChooserRequest {
    /// Comma-joined MIME patterns (`accept` attribute)
    pub accept: Option<String>,
    /// Whether the chooser should allow selecting several files
    pub multiple: bool,
}

impl ChooserRequest {
    /// Allow-list parsed back out of `accept`
    #[must_use]
    pub fn allow_list(&self) -> MimeAllowList {
        let patterns = self
            .accept
            .as_deref()
            .map(|accept| {
                accept
                    .split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();
        MimeAllowList::new(patterns)
    }
}

/// Trait for platform file choosers
pub trait FileChooser {
    /// Show the chooser and return the picked files
    ///
    /// A cancelled dialog returns an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the chooser cannot produce file handles.
    fn choose(&mut self, request: &ChooserRequest) -> Result<Vec<FileHandle>>;
}

/// Chooser over paths named up front (command line arguments)
///
/// Behaves like a native dialog: files that do not match the `accept`
/// patterns are not selectable and are skipped.
#[derive(Debug, Clone)]
pub struct PathChooser {
    paths: Vec<PathBuf>,
}

impl PathChooser {
    #[must_use]
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }
}

impl FileChooser for PathChooser {
    fn choose(&mut self, request: &ChooserRequest) -> Result<Vec<FileHandle>> {
        let allow = request.allow_list();
        let mut files = Vec::with_capacity(self.paths.len());

        for path in &self.paths {
            let handle = FileHandle::from_path(path)?;
            if allow.accepts(handle.mime_type()) {
                files.push(handle);
            } else {
                tracing::warn!(
                    file = %path.display(),
                    mime = handle.mime_type(),
                    "file not selectable: type not accepted"
                );
            }
        }

        Ok(files)
    }
}

/// Mock chooser that returns predetermined files
///
/// Useful for testing without a platform dialog.
#[derive(Debug, Clone, Default)]
pub struct MockChooser {
    /// Files to return from the next `choose`
    pub files: Vec<FileHandle>,
    /// Request seen by the last `choose`
    pub last_request: Option<ChooserRequest>,
}

impl MockChooser {
    #[must_use]
    pub fn new(files: Vec<FileHandle>) -> Self {
        Self {
            files,
            last_request: None,
        }
    }

    /// A chooser whose dialog gets cancelled
    #[must_use]
    pub fn cancelled() -> Self {
        Self::default()
    }
}

impl FileChooser for MockChooser {
    fn choose(&mut self, request: &ChooserRequest) -> Result<Vec<FileHandle>> {
        self.last_request = Some(request.clone());
        Ok(self.files.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_request_allow_list_round_trip() {
        let request = ChooserRequest {
            accept: Some("image/*, application/pdf".to_string()),
            multiple: false,
        };
        let allow = request.allow_list();
        assert_eq!(allow.patterns(), ["image/*", "application/pdf"]);
    }

    #[test]
    fn test_path_chooser_skips_unaccepted_types() {
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("cat.png");
        let txt = dir.path().join("notes.txt");
        std::fs::File::create(&png).unwrap().write_all(b"png").unwrap();
        std::fs::File::create(&txt).unwrap().write_all(b"text").unwrap();

        let mut chooser = PathChooser::new(vec![png, txt]);
        let request = ChooserRequest {
            accept: Some("image/*".to_string()),
            multiple: true,
        };
        let files = chooser.choose(&request).unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name(), "cat.png");
    }

    #[test]
    fn test_path_chooser_missing_file_errors() {
        let mut chooser = PathChooser::new(vec![PathBuf::from("/definitely/not/here.png")]);
        assert!(chooser.choose(&ChooserRequest::default()).is_err());
    }

    #[test]
    fn test_mock_chooser_records_request() {
        let mut chooser = MockChooser::cancelled();
        let request = ChooserRequest {
            accept: None,
            multiple: true,
        };
        let files = chooser.choose(&request).unwrap();

        assert!(files.is_empty());
        assert_eq!(chooser.last_request, Some(request));
    }
}
