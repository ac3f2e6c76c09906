//! Record picker collaborator
//!
//! The picker presents existing records of the eligible collections, minus
//! whatever the exclusion filters rule out, and reports back either a single
//! added document or a bulk selection map.

use super::error::Result;
use super::filter::FilterOptions;
use super::list::RecordId;

/// Ordered map of identifier → selected flag
///
/// Keeps first-insertion order; re-inserting an id updates it in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionMap {
    entries: Vec<(RecordId, bool)>,
}

impl SelectionMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Map with one selected id
    #[must_use]
    pub fn single(id: impl Into<String>) -> Self {
        let mut map = Self::new();
        map.insert(id, true);
        map
    }

    pub fn insert(&mut self, id: impl Into<String>, selected: bool) {
        let id = id.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == id) {
            Some(entry) => entry.1 = selected,
            None => self.entries.push((id, selected)),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids whose flag is true, in map order
    #[must_use]
    pub fn selected_ids(&self) -> Vec<RecordId> {
        self.entries
            .iter()
            .filter(|(_, selected)| *selected)
            .map(|(id, _)| id.clone())
            .collect()
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for SelectionMap {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (id, selected) in iter {
            map.insert(id, selected);
        }
        map
    }
}

/// What the picker is opened with
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PickerRequest {
    /// Collections the picker may show
    pub collections: Vec<String>,
    /// Per-collection filters, including the identifier exclusion
    pub filters: FilterOptions,
    /// Allow selecting several rows at once
    pub enable_row_selections: bool,
    /// Prompt shown above the list
    pub title: String,
}

/// How the picker closed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerOutcome {
    /// Closed without choosing anything
    Cancelled,
    /// A single document was picked (or created) in the picker
    Added(RecordId),
    /// Row selections confirmed in bulk
    Bulk(SelectionMap),
}

/// Trait for record picker implementations
pub trait RecordPicker {
    /// Show the picker and wait for it to close
    ///
    /// # Errors
    ///
    /// Returns an error if the picker cannot be shown.
    fn open(&mut self, request: &PickerRequest) -> Result<PickerOutcome>;
}

/// Mock picker returning a predetermined outcome
#[derive(Debug, Clone)]
pub struct MockPicker {
    outcome: PickerOutcome,
    /// Request seen by the last `open`
    pub last_request: Option<PickerRequest>,
}

impl MockPicker {
    #[must_use]
    pub fn new(outcome: PickerOutcome) -> Self {
        Self {
            outcome,
            last_request: None,
        }
    }

    #[must_use]
    pub fn cancelled() -> Self {
        Self::new(PickerOutcome::Cancelled)
    }
}

impl RecordPicker for MockPicker {
    fn open(&mut self, request: &PickerRequest) -> Result<PickerOutcome> {
        self.last_request = Some(request.clone());
        Ok(self.outcome.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_ids_keep_order_and_skip_false() {
        let map: SelectionMap = [("c", true), ("a", false), ("b", true)].into_iter().collect();
        assert_eq!(map.len(), 3);
        assert_eq!(map.selected_ids(), vec!["c".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_reinsert_updates_in_place() {
        let mut map = SelectionMap::new();
        map.insert("a", true);
        map.insert("b", true);
        map.insert("a", false);

        assert_eq!(map.len(), 2);
        assert_eq!(map.selected_ids(), vec!["b".to_string()]);
    }

    #[test]
    fn test_mock_picker_records_request() {
        let mut picker = MockPicker::new(PickerOutcome::Added("x".into()));
        let request = PickerRequest {
            collections: vec!["media".into()],
            ..PickerRequest::default()
        };

        assert_eq!(picker.open(&request).unwrap(), PickerOutcome::Added("x".into()));
        assert_eq!(picker.last_request.unwrap().collections, vec!["media".to_string()]);
    }
}
