//! Plain-text rendering of records and file batches

use crate::i18n::DateLocale;
use crate::intake::FileBatch;
use crate::relations::{DocSummary, RelationRow};
use byte_unit::{Byte, UnitType};
use colored::Colorize;

/// One-line description of a record: `filename (collection, size, date)`
#[must_use]
pub fn format_doc(doc: &DocSummary, date_locale: DateLocale) -> String {
    let mut details = vec![doc.collection.clone()];
    if let Some(mime) = &doc.mime_type {
        details.push(mime.clone());
    }
    if let Some(size) = doc.filesize {
        details.push(Byte::from_u64(size).get_appropriate_unit(UnitType::Binary).to_string());
    }
    if let Some(updated) = &doc.updated_at {
        details.push(date_locale.format(updated));
    }
    format!("{} ({})", doc.filename, details.join(", "))
}

/// Numbered row of the association list
///
/// Non-sortable rows get no drag handle marker.
#[must_use]
pub fn format_row(row: &RelationRow, date_locale: DateLocale) -> String {
    let handle = if row.sortable { "≡ " } else { "" };
    format!(
        "{handle}{} {} {}",
        format!("[{}]", row.index).cyan(),
        row.id.bold(),
        format_doc(&row.doc, date_locale).dimmed()
    )
}

/// One line per accepted file
#[must_use]
pub fn format_batch(batch: &FileBatch) -> Vec<String> {
    batch.iter().map(|file| format!("  {file}")).collect()
}
