//! Intake surface
//!
//! Accepts files from drag-and-drop, clipboard paste and a native chooser,
//! normalizes them against a single/multi-file policy and forwards the
//! resulting `FileBatch` to a caller-supplied handler.
//!
//! # Entry points
//!
//! - **Drop**: `DragEnter` → any number of `DragOver` → `Drop(files)`
//! - **Paste**: `Paste(payload)`; only payloads carrying files are intercepted
//! - **Manual**: [`IntakeSurface::select_files`] with a [`FileChooser`]
//!
//! All three share one normalization path, so truncation under a
//! single-file policy is identical everywhere.
//!
//! # Examples
//!
//! ```
//! use attachr::intake::{
//!     FileBatch, FileHandle, IntakePolicy, IntakeSurface, InteractionRegion, MountedSurface,
//!     SurfaceEvent,
//! };
//!
//! let region = InteractionRegion::new();
//! let surface = IntakeSurface::new(IntakePolicy::single(), |batch: FileBatch| {
//!     assert_eq!(batch.len(), 1);
//! });
//! let mounted = MountedSurface::mount(surface, &region);
//!
//! region.dispatch(&SurfaceEvent::DragEnter);
//! region.dispatch(&SurfaceEvent::Drop(vec![
//!     FileHandle::from_bytes("a.png", "image/png", vec![1]),
//!     FileHandle::from_bytes("b.png", "image/png", vec![2]),
//! ]));
//!
//! mounted.unmount();
//! assert_eq!(region.listener_count(), 0);
//! ```

pub mod chooser;
pub mod clipboard;
pub mod error;
pub mod events;
pub mod region;
pub mod surface;
pub mod types;

pub use chooser::{ChooserRequest, FileChooser, MockChooser, PathChooser};
pub use error::IntakeError;
pub use events::{ClipboardPayload, DragState, EventDisposition, EventKind, SurfaceEvent};
pub use region::{InteractionRegion, Listener, ListenerGuard};
pub use surface::{BatchHandler, IntakeSurface, MountedSurface, SurfaceLabels};
pub use types::{FileBatch, FileContent, FileHandle, IntakePolicy, MimeAllowList};
