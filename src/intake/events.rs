//! Platform events understood by the intake surface
//!
//! Maps the drag, drop and paste events of a host region onto a small
//! closed set, plus the hover state those events drive.

use super::types::FileHandle;
use std::fmt;

/// Hover state of the interaction region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    /// No drag in progress
    #[default]
    Idle,
    /// Something is being dragged over the region
    Dragging,
}

impl DragState {
    /// Whether the region should render its active hover state
    #[must_use]
    pub const fn is_dragging(self) -> bool {
        matches!(self, Self::Dragging)
    }

    /// Next state for an event; drag-over and paste never change it
    #[must_use]
    pub const fn next(self, kind: EventKind) -> Self {
        match kind {
            EventKind::DragEnter => Self::Dragging,
            EventKind::DragLeave | EventKind::Drop => Self::Idle,
            EventKind::DragOver | EventKind::Paste => self,
        }
    }
}

/// Listener slot an event is dispatched to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    DragEnter,
    DragLeave,
    DragOver,
    Drop,
    Paste,
}

impl EventKind {
    /// Every kind the surface listens for
    pub const ALL: [Self; 5] = [
        Self::DragEnter,
        Self::DragLeave,
        Self::DragOver,
        Self::Drop,
        Self::Paste,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DragEnter => "dragenter",
            Self::DragLeave => "dragleave",
            Self::DragOver => "dragover",
            Self::Drop => "drop",
            Self::Paste => "paste",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the platform clipboard carried on a paste
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipboardPayload {
    /// Files on the clipboard, in platform order
    pub files: Vec<FileHandle>,
    /// Plain text on the clipboard, if any
    pub text: Option<String>,
}

impl ClipboardPayload {
    #[must_use]
    pub fn files(files: Vec<FileHandle>) -> Self {
        Self { files, text: None }
    }

    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            files: Vec::new(),
            text: Some(text.into()),
        }
    }

    #[must_use]
    pub fn has_files(&self) -> bool {
        !self.files.is_empty()
    }
}

/// An event raised on the interaction region
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    DragEnter,
    DragLeave,
    /// Fired repeatedly while hovering
    DragOver,
    /// Drop carrying the data-transfer files
    Drop(Vec<FileHandle>),
    Paste(ClipboardPayload),
}

impl SurfaceEvent {
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::DragEnter => EventKind::DragEnter,
            Self::DragLeave => EventKind::DragLeave,
            Self::DragOver => EventKind::DragOver,
            Self::Drop(_) => EventKind::Drop,
            Self::Paste(_) => EventKind::Paste,
        }
    }
}

/// How the platform should treat an event after dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    /// Default action prevented and propagation stopped
    Intercepted,
    /// Let the platform's default behavior run
    PassThrough,
}

impl EventDisposition {
    #[must_use]
    pub const fn is_intercepted(self) -> bool {
        matches!(self, Self::Intercepted)
    }
}
