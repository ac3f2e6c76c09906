//! Picker filter options and identifier exclusion
//!
//! Filters are keyed by collection slug. Only the `id` clause is interpreted
//! here; every other constraint is carried through to the picker untouched.

use super::list::{AssociationValue, RecordId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Constraint on the `id` field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdConstraint {
    /// Identifiers the picker must not offer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_in: Option<Vec<RecordId>>,

    /// Identifiers the picker may offer, if restricted
    #[serde(default, rename = "in", skip_serializing_if = "Option::is_none")]
    pub in_list: Option<Vec<RecordId>>,

    /// Other operators, passed through
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Filter for one collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<IdConstraint>,

    /// Constraints on other fields, passed through
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl CollectionFilter {
    /// Filter excluding exactly `ids`
    #[must_use]
    pub fn not_in(ids: Vec<RecordId>) -> Self {
        Self {
            id: Some(IdConstraint {
                not_in: Some(ids),
                ..IdConstraint::default()
            }),
            ..Self::default()
        }
    }

    /// The effective `not_in` set, if any
    #[must_use]
    pub fn excluded_ids(&self) -> Option<&[RecordId]> {
        self.id.as_ref()?.not_in.as_deref()
    }

    /// Whether the id clause lets `id` through
    #[must_use]
    pub fn admits(&self, id: &str) -> bool {
        let Some(constraint) = &self.id else {
            return true;
        };

        let excluded = constraint
            .not_in
            .as_ref()
            .is_some_and(|ids| ids.iter().any(|x| x == id));
        let restricted_out = constraint
            .in_list
            .as_ref()
            .is_some_and(|ids| !ids.iter().any(|x| x == id));

        !excluded && !restricted_out
    }
}

/// Filters for every collection the picker may show
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterOptions(BTreeMap<String, CollectionFilter>);

impl FilterOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, collection: &str) -> Option<&CollectionFilter> {
        self.0.get(collection)
    }

    pub fn insert(&mut self, collection: impl Into<String>, filter: CollectionFilter) {
        self.0.insert(collection.into(), filter);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &CollectionFilter)> {
        self.0.iter()
    }

    /// Whether `id` from `collection` may be offered
    ///
    /// Collections without a filter admit everything.
    #[must_use]
    pub fn admits(&self, collection: &str, id: &str) -> bool {
        self.get(collection).is_none_or(|filter| filter.admits(id))
    }
}

impl FromIterator<(String, CollectionFilter)> for FilterOptions {
    fn from_iter<I: IntoIterator<Item = (String, CollectionFilter)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Exclusion filter for one target collection
///
/// Starts from the caller's base filter and fills the `id.not_in` set with
/// the current association list. A `not_in` the caller already set wins
/// outright (even an empty one); the two are never merged.
#[must_use]
pub fn exclusion_filter(base: Option<&CollectionFilter>, current: &AssociationValue) -> CollectionFilter {
    let mut filter = base.cloned().unwrap_or_default();
    let mut id = filter.id.take().unwrap_or_default();

    if id.not_in.is_none() {
        id.not_in.clone_from(current);
    }

    filter.id = Some(id);
    filter
}

/// Apply [`exclusion_filter`] to every target, keeping other base entries
#[must_use]
pub fn filter_options(base: &FilterOptions, targets: &[String], current: &AssociationValue) -> FilterOptions {
    let mut options = base.clone();
    for target in targets {
        let filter = exclusion_filter(base.get(target), current);
        options.insert(target.clone(), filter);
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ids(values: &[&str]) -> Vec<RecordId> {
        values.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_exclusion_uses_current_list() {
        let current = Some(ids(&["x", "y"]));
        let filter = exclusion_filter(None, &current);

        assert_eq!(filter.excluded_ids(), Some(ids(&["x", "y"]).as_slice()));
        assert!(!filter.admits("x"));
        assert!(filter.admits("z"));
    }

    #[test]
    fn test_caller_not_in_wins() {
        let current = Some(ids(&["x", "y"]));
        let base = CollectionFilter::not_in(ids(&["z"]));
        let filter = exclusion_filter(Some(&base), &current);

        assert_eq!(filter.excluded_ids(), Some(ids(&["z"]).as_slice()));
        assert!(filter.admits("x"));
    }

    #[test]
    fn test_caller_empty_not_in_still_wins() {
        let current = Some(ids(&["x"]));
        let base = CollectionFilter::not_in(Vec::new());
        let filter = exclusion_filter(Some(&base), &current);

        assert_eq!(filter.excluded_ids(), Some(&[][..]));
    }

    #[test]
    fn test_absent_value_excludes_nothing() {
        let filter = exclusion_filter(None, &None);
        assert!(filter.excluded_ids().is_none());
        assert!(filter.admits("anything"));
    }

    #[test]
    fn test_base_constraints_are_preserved() {
        let base: CollectionFilter = serde_json::from_value(json!({
            "mimeType": { "like": "image" },
            "id": { "exists": true }
        }))
        .unwrap();
        let filter = exclusion_filter(Some(&base), &Some(ids(&["a"])));

        assert_eq!(filter.other.get("mimeType"), Some(&json!({ "like": "image" })));
        let id = filter.id.as_ref().unwrap();
        assert_eq!(id.other.get("exists"), Some(&json!(true)));
        assert_eq!(id.not_in, Some(ids(&["a"])));
    }

    #[test]
    fn test_filter_options_keeps_unrelated_collections() {
        let mut base = FilterOptions::new();
        base.insert("docs", CollectionFilter::not_in(ids(&["d1"])));

        let options = filter_options(&base, &ids(&["media"]), &Some(ids(&["m1"])));

        assert_eq!(options.len(), 2);
        assert!(!options.admits("media", "m1"));
        assert!(options.admits("media", "m2"));
        assert!(!options.admits("docs", "d1"));
        assert!(options.admits("other", "anything"));
    }

    #[test]
    fn test_in_list_restricts() {
        let filter: CollectionFilter = serde_json::from_value(json!({
            "id": { "in": ["a", "b"] }
        }))
        .unwrap();
        assert!(filter.admits("a"));
        assert!(!filter.admits("c"));
    }

    #[test]
    fn test_serialized_shape() {
        let filter = exclusion_filter(None, &Some(ids(&["x"])));
        let value = serde_json::to_value(&filter).unwrap();
        assert_eq!(value, json!({ "id": { "not_in": ["x"] } }));
    }
}
