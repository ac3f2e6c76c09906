//! Copy-on-write list transformations
//!
//! Every function takes a snapshot and returns a new sequence; the input is
//! never mutated. Callers write the result back to their value store once.

use super::error::{RelationError, Result};

/// Identifier of a related record
pub type RecordId = String;

/// Stored value of a relation field
///
/// `None` means the field is absent (never populated, or cleared);
/// `Some(vec![])` means it was touched and is now empty. Validation tells
/// the two apart.
pub type AssociationValue = Option<Vec<RecordId>>;

fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(RelationError::IndexOutOfRange { index, len })
    }
}

/// Move the element at `from` to `to`
///
/// Splice semantics: the element is removed first, and `to` is an index
/// into the list after removal. Both indices must be below the length.
///
/// # Errors
///
/// Returns `RelationError::IndexOutOfRange` if either index is out of range.
pub fn move_item<T: Clone>(items: &[T], from: usize, to: usize) -> Result<Vec<T>> {
    check_index(from, items.len())?;
    check_index(to, items.len())?;

    let mut moved = items.to_vec();
    let item = moved.remove(from);
    moved.insert(to, item);
    Ok(moved)
}

/// Remove the element at `index`
///
/// # Errors
///
/// Returns `RelationError::IndexOutOfRange` if `index` is out of range.
pub fn remove_item<T: Clone>(items: &[T], index: usize) -> Result<Vec<T>> {
    check_index(index, items.len())?;

    let mut remaining = items.to_vec();
    remaining.remove(index);
    Ok(remaining)
}

/// Append `additions` after `items`
#[must_use]
pub fn append_items<T: Clone>(items: &[T], additions: &[T]) -> Vec<T> {
    let mut combined = Vec::with_capacity(items.len() + additions.len());
    combined.extend_from_slice(items);
    combined.extend_from_slice(additions);
    combined
}
