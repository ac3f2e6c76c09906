//! System clipboard adapter
//!
//! Desktop file managers put copied files on the clipboard as a list of
//! paths or `file://` URIs. This module turns such text into a
//! `ClipboardPayload` carrying files; anything else stays plain text so the
//! paste passes through untouched.

use super::error::{IntakeError, Result};
use super::events::ClipboardPayload;
use super::types::FileHandle;
use std::path::PathBuf;
use url::Url;

/// Read the system clipboard into a paste payload
///
/// # Errors
///
/// Returns `IntakeError::Clipboard` if the clipboard cannot be opened.
/// An empty or non-text clipboard yields an empty payload.
pub fn read_system_clipboard() -> Result<ClipboardPayload> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| IntakeError::Clipboard(e.to_string()))?;

    match clipboard.get_text() {
        Ok(text) => Ok(payload_from_text(&text)),
        Err(arboard::Error::ContentNotAvailable) => Ok(ClipboardPayload::default()),
        Err(e) => Err(IntakeError::Clipboard(e.to_string())),
    }
}

/// Interpret clipboard text as a file list when every line names a file
#[must_use]
pub fn payload_from_text(text: &str) -> ClipboardPayload {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();

    if lines.is_empty() {
        return ClipboardPayload::text(text);
    }

    let mut files = Vec::with_capacity(lines.len());
    for line in &lines {
        let handle = line_to_path(line).and_then(|path| FileHandle::from_path(path).ok());
        match handle {
            Some(handle) => files.push(handle),
            None => return ClipboardPayload::text(text),
        }
    }

    ClipboardPayload {
        files,
        text: Some(text.to_string()),
    }
}

/// Path named by a clipboard line: a `file://` URI or a plain path
///
/// URIs that do not resolve to a local path (remote host, bad encoding)
/// yield `None`.
fn line_to_path(line: &str) -> Option<PathBuf> {
    if !line.starts_with("file:") {
        return Some(PathBuf::from(line));
    }
    Url::parse(line).ok()?.to_file_path().ok()
}
