//! Terminal UI layer
//!
//! Command handlers never print directly; they write through an
//! [`OutputWriter`] and open records through a [`RecordPicker`], so the same
//! logic runs against a real terminal or against in-memory doubles.
//!
//! - **`OutputWriter`** - Status messages with severity levels
//! - **`DialoguerPicker`** - Interactive record picker over the catalog
//! - **`format`** - One-line rendering of records, rows and batches
//!
//! [`RecordPicker`]: crate::relations::RecordPicker

pub mod format;
pub mod output;
pub mod picker;

pub use format::{format_batch, format_doc, format_row};
pub use output::{BufferedWriter, MessageLevel, OutputWriter, StdoutWriter};
pub use picker::DialoguerPicker;
