//! Ordered association manager
//!
//! Edits the association list of one relation field. The manager holds no
//! copy of the list: each operation reads the store, computes a new
//! sequence from that snapshot and writes it back once.

use super::collection::{CollectionInfo, RelationTo};
use super::error::{RelationError, Result};
use super::filter::{CollectionFilter, FilterOptions, exclusion_filter, filter_options};
use super::labels::label_set;
use super::list::{AssociationValue, RecordId, append_items, move_item, remove_item};
use super::lookup::{DocSummary, DocumentLookup};
use super::picker::{PickerOutcome, PickerRequest, RecordPicker, SelectionMap};
use super::store::ValueStore;
use crate::i18n::Translator;
use serde::{Deserialize, Serialize};

const fn default_true() -> bool {
    true
}

/// Static settings of a relation field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSettings {
    /// Field path in the host document
    pub path: String,
    /// Target collection(s)
    pub relation_to: RelationTo,
    /// Whether the field holds a list rather than a single id
    #[serde(default = "default_true")]
    pub has_many: bool,
    /// Whether rows can be reordered
    #[serde(default = "default_true")]
    pub sortable: bool,
    #[serde(default)]
    pub read_only: bool,
    /// Whether the user may create new records from the field
    #[serde(default = "default_true")]
    pub can_create: bool,
    /// Slug of the upload drawer opened by "add new"
    #[serde(default)]
    pub drawer_slug: Option<String>,
}

impl FieldSettings {
    #[must_use]
    pub fn new(path: impl Into<String>, relation_to: RelationTo) -> Self {
        Self {
            path: path.into(),
            relation_to,
            has_many: true,
            sortable: true,
            read_only: false,
            can_create: true,
            drawer_slug: None,
        }
    }

    /// Configured drawer slug, or one derived from the field path
    #[must_use]
    pub fn drawer_slug(&self) -> String {
        self.drawer_slug
            .clone()
            .unwrap_or_else(|| format!("bulk-upload-drawer-{}", self.path.replace('.', "-")))
    }
}

/// How picker selections are folded into the list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    /// Selected ids become the whole list
    Replace,
    /// Selected ids are appended to the current list
    Append,
}

/// One displayable row of the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationRow {
    /// Position in the association list (what move/remove take)
    pub index: usize,
    pub id: RecordId,
    pub doc: DocSummary,
    pub sortable: bool,
}

/// A button the field shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub label: String,
    pub disabled: bool,
}

/// Buttons below the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldControls {
    /// Opens the upload drawer; only with `can_create && has_many`
    pub add_new: Option<Control>,
    /// Opens the record picker; disabled when read-only
    pub choose_existing: Control,
    /// Sets the value to absent; only with `has_many`
    pub clear_all: Option<Control>,
}

/// Request to open the bulk upload drawer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadDrawerRequest {
    pub drawer_slug: String,
    /// Target collection when the relation is not polymorphic
    pub collection: Option<String>,
}

/// Manager for one relation field backed by a value store
pub struct RelationManager<S: ValueStore> {
    field: FieldSettings,
    collections: Vec<CollectionInfo>,
    base_filters: FilterOptions,
    store: S,
}

impl<S: ValueStore> RelationManager<S> {
    /// Create a manager over `store`
    ///
    /// `collections` is every collection the host knows about; only those the
    /// field relates to are treated as eligible.
    pub fn new(field: FieldSettings, collections: Vec<CollectionInfo>, store: S) -> Self {
        Self {
            field,
            collections,
            base_filters: FilterOptions::default(),
            store,
        }
    }

    /// Caller-supplied picker filters
    #[must_use]
    pub fn with_base_filters(mut self, base_filters: FilterOptions) -> Self {
        self.base_filters = base_filters;
        self
    }

    #[must_use]
    pub const fn field(&self) -> &FieldSettings {
        &self.field
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Current stored value, read fresh from the store
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn value(&self) -> Result<AssociationValue> {
        self.store.get_value()
    }

    /// Current ids, treating an absent value as empty
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn ids(&self) -> Result<Vec<RecordId>> {
        Ok(self.value()?.unwrap_or_default())
    }

    fn write(&mut self, value: AssociationValue) -> Result<()> {
        tracing::debug!(
            field = %self.field.path,
            len = value.as_ref().map(Vec::len),
            "writing association list"
        );
        self.store.set_value(value)
    }

    /// Move the row at `from` to `to` (splice semantics)
    ///
    /// # Errors
    ///
    /// Returns `RelationError::IndexOutOfRange` (store untouched) if either
    /// index is out of range, or a store error.
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<()> {
        let current = self.ids()?;
        let moved = move_item(&current, from, to)?;
        self.write(Some(moved))
    }

    /// Remove the row at `index`
    ///
    /// Removing the last row stores an explicit empty list, not an absent
    /// value.
    ///
    /// # Errors
    ///
    /// Returns `RelationError::IndexOutOfRange` (store untouched) if `index`
    /// is out of range, or a store error.
    pub fn remove_item(&mut self, index: usize) -> Result<()> {
        let current = self.ids()?;
        let remaining = remove_item(&current, index)?;
        self.write(Some(remaining))
    }

    /// Set the value to absent
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn clear_all(&mut self) -> Result<()> {
        self.write(None)
    }

    /// Fold a selection map into the list
    ///
    /// Returns the ids that were selected.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written.
    pub fn merge_selections(&mut self, selection: &SelectionMap, mode: MergeMode) -> Result<Vec<RecordId>> {
        let selected = selection.selected_ids();
        let next = match mode {
            MergeMode::Replace => selected.clone(),
            MergeMode::Append => append_items(&self.ids()?, &selected),
        };
        self.write(Some(next))?;
        Ok(selected)
    }

    /// Bulk selection from the picker list: replaces the whole list
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn select_from_list(&mut self, selection: &SelectionMap) -> Result<Vec<RecordId>> {
        self.merge_selections(selection, MergeMode::Replace)
    }

    /// A single document added through the picker: appended
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written.
    pub fn add_document(&mut self, id: impl Into<String>) -> Result<()> {
        self.merge_selections(&SelectionMap::single(id), MergeMode::Append)?;
        Ok(())
    }

    /// Append ids produced by a successful upload
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written.
    pub fn attach_uploaded(&mut self, ids: &[RecordId]) -> Result<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let next = append_items(&self.ids()?, ids);
        self.write(Some(next))
    }

    /// Apply whatever the picker returned
    ///
    /// Returns whether the list changed hands (anything but a cancel).
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written.
    pub fn apply_picker_outcome(&mut self, outcome: PickerOutcome) -> Result<bool> {
        match outcome {
            PickerOutcome::Cancelled => Ok(false),
            PickerOutcome::Added(id) => {
                self.add_document(id)?;
                Ok(true)
            }
            PickerOutcome::Bulk(selection) => {
                self.select_from_list(&selection)?;
                Ok(true)
            }
        }
    }

    /// Settings of an eligible collection
    #[must_use]
    pub fn collection(&self, slug: &str) -> Option<&CollectionInfo> {
        if !self.field.relation_to.includes(slug) {
            return None;
        }
        self.collections.iter().find(|c| c.slug == slug)
    }

    /// Collections the picker may show
    ///
    /// Only the field's `relation_to` targets, in declaration order; other
    /// collections the host configured are never offered, even for a
    /// polymorphic field.
    #[must_use]
    pub fn eligible_collections(&self) -> Vec<String> {
        self.field.relation_to.targets()
    }

    /// Exclusion filter for one target collection
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn exclusion_filter(&self, collection: &str) -> Result<CollectionFilter> {
        Ok(exclusion_filter(self.base_filters.get(collection), &self.value()?))
    }

    /// Base filters with the exclusion applied to every eligible collection
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn filter_options(&self) -> Result<FilterOptions> {
        Ok(filter_options(
            &self.base_filters,
            &self.eligible_collections(),
            &self.value()?,
        ))
    }

    /// "A, B or C" label of the eligible collections
    pub fn label_set(&self, translator: &dyn Translator) -> String {
        label_set(&self.collections, &self.field.relation_to, translator)
    }

    /// Request the picker is opened with
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn picker_request(&self, translator: &dyn Translator) -> Result<PickerRequest> {
        let label = self.label_set(translator);
        Ok(PickerRequest {
            collections: self.eligible_collections(),
            filters: self.filter_options()?,
            enable_row_selections: self.field.has_many,
            title: translator.translate("fields:chooseLabel", &[("label", &label)]),
        })
    }

    /// Open the picker and fold its result into the list
    ///
    /// # Errors
    ///
    /// Returns `RelationError::ReadOnly` without opening the picker when the
    /// field is read-only, or any picker/store error.
    pub fn choose_existing(&mut self, picker: &mut dyn RecordPicker, translator: &dyn Translator) -> Result<bool> {
        if self.field.read_only {
            return Err(RelationError::ReadOnly(self.field.path.clone()));
        }
        let request = self.picker_request(translator)?;
        let outcome = picker.open(&request)?;
        self.apply_picker_outcome(outcome)
    }

    /// Rows for every id the lookup can resolve
    ///
    /// Unknown ids are skipped; `index` still points into the full list.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn rows(&self, lookup: &dyn DocumentLookup) -> Result<Vec<RelationRow>> {
        Ok(self
            .ids()?
            .into_iter()
            .enumerate()
            .filter_map(|(index, id)| {
                let doc = lookup.resolve(&id)?;
                Some(RelationRow {
                    index,
                    id,
                    doc,
                    sortable: self.field.sortable,
                })
            })
            .collect())
    }

    /// Which controls to show, with their labels
    pub fn controls(&self, translator: &dyn Translator) -> FieldControls {
        FieldControls {
            add_new: (self.field.can_create && self.field.has_many).then(|| Control {
                label: translator.t("fields:addNew"),
                disabled: false,
            }),
            choose_existing: Control {
                label: translator.t("fields:chooseFromExisting"),
                disabled: self.field.read_only,
            },
            clear_all: self.field.has_many.then(|| Control {
                label: translator.t("general:clearAll"),
                disabled: false,
            }),
        }
    }

    /// Drawer to open for "add new", if that control is available
    #[must_use]
    pub fn add_new_request(&self) -> Option<UploadDrawerRequest> {
        (self.field.can_create && self.field.has_many).then(|| UploadDrawerRequest {
            drawer_slug: self.field.drawer_slug(),
            collection: self.field.relation_to.single().map(String::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Translations;
    use crate::relations::lookup::Catalog;
    use crate::relations::picker::MockPicker;
    use crate::relations::store::MemoryStore;

    fn manager(initial: AssociationValue) -> RelationManager<MemoryStore> {
        let field = FieldSettings::new("gallery", RelationTo::Single("media".into()));
        let collections = vec![
            CollectionInfo::new("media").with_singular("Image"),
            CollectionInfo::new("docs").with_singular("Document"),
        ];
        RelationManager::new(field, collections, MemoryStore::new(initial))
    }

    fn ids(values: &[&str]) -> Vec<RecordId> {
        values.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_move_item_writes_new_order() {
        let mut m = manager(Some(ids(&["A", "B", "C", "D"])));

        m.move_item(0, 2).unwrap();
        assert_eq!(m.value().unwrap(), Some(ids(&["B", "C", "A", "D"])));

        m.move_item(2, 0).unwrap();
        assert_eq!(m.value().unwrap(), Some(ids(&["A", "B", "C", "D"])));
    }

    #[test]
    fn test_out_of_range_leaves_store_untouched() {
        let mut m = manager(Some(ids(&["A", "B"])));

        assert!(matches!(
            m.move_item(0, 5),
            Err(RelationError::IndexOutOfRange { index: 5, len: 2 })
        ));
        assert!(m.remove_item(2).is_err());
        assert!(m.store().writes().is_empty());
    }

    #[test]
    fn test_remove_last_is_empty_list_and_clear_is_absent() {
        let mut m = manager(Some(ids(&["only"])));

        m.remove_item(0).unwrap();
        assert_eq!(m.value().unwrap(), Some(Vec::new()));

        let mut m = manager(Some(ids(&["only"])));
        m.clear_all().unwrap();
        assert_eq!(m.value().unwrap(), None);
    }

    #[test]
    fn test_operations_reread_store() {
        let mut m = manager(Some(ids(&["A", "B"])));
        m.store_mut().reset(Some(ids(&["X", "Y", "Z"])));

        m.remove_item(1).unwrap();
        assert_eq!(m.value().unwrap(), Some(ids(&["X", "Z"])));
    }

    #[test]
    fn test_select_from_list_replaces() {
        let mut m = manager(Some(ids(&["A"])));
        let selection: SelectionMap = [("B", true), ("C", false), ("D", true)].into_iter().collect();

        let selected = m.select_from_list(&selection).unwrap();
        assert_eq!(selected, ids(&["B", "D"]));
        assert_eq!(m.value().unwrap(), Some(ids(&["B", "D"])));
    }

    #[test]
    fn test_add_document_appends() {
        let mut m = manager(Some(ids(&["A"])));
        m.add_document("B").unwrap();
        assert_eq!(m.value().unwrap(), Some(ids(&["A", "B"])));

        let mut m = manager(None);
        m.add_document("B").unwrap();
        assert_eq!(m.value().unwrap(), Some(ids(&["B"])));
    }

    #[test]
    fn test_attach_uploaded() {
        let mut m = manager(Some(ids(&["A"])));
        m.attach_uploaded(&ids(&["u1", "u2"])).unwrap();
        assert_eq!(m.value().unwrap(), Some(ids(&["A", "u1", "u2"])));

        m.attach_uploaded(&[]).unwrap();
        assert_eq!(m.store().writes().len(), 1);
    }

    #[test]
    fn test_exclusion_filter_from_current_value() {
        let m = manager(Some(ids(&["x", "y"])));
        let filter = m.exclusion_filter("media").unwrap();
        assert_eq!(filter.excluded_ids(), Some(ids(&["x", "y"]).as_slice()));

        let mut base = FilterOptions::new();
        base.insert("media", CollectionFilter::not_in(ids(&["z"])));
        let m = manager(Some(ids(&["x", "y"]))).with_base_filters(base);
        let filter = m.exclusion_filter("media").unwrap();
        assert_eq!(filter.excluded_ids(), Some(ids(&["z"]).as_slice()));
    }

    #[test]
    fn test_choose_existing_uses_picker() {
        let en = Translations::english();
        let mut m = manager(Some(ids(&["m1"])));
        let mut picker = MockPicker::new(PickerOutcome::Bulk(SelectionMap::single("m2")));

        assert!(m.choose_existing(&mut picker, &en).unwrap());
        assert_eq!(m.value().unwrap(), Some(ids(&["m2"])));

        let request = picker.last_request.unwrap();
        assert_eq!(request.collections, ids(&["media"]));
        assert!(request.enable_row_selections);
        assert_eq!(request.title, "Choose Image");
        assert!(!request.filters.admits("media", "m1"));
    }

    #[test]
    fn test_choose_existing_cancelled_writes_nothing() {
        let en = Translations::english();
        let mut m = manager(Some(ids(&["m1"])));
        let mut picker = MockPicker::cancelled();

        assert!(!m.choose_existing(&mut picker, &en).unwrap());
        assert!(m.store().writes().is_empty());
    }

    #[test]
    fn test_read_only_does_not_open_picker() {
        let en = Translations::english();
        let mut field = FieldSettings::new("gallery", RelationTo::Single("media".into()));
        field.read_only = true;
        let mut m = RelationManager::new(field, Vec::new(), MemoryStore::default());
        let mut picker = MockPicker::cancelled();

        assert!(matches!(
            m.choose_existing(&mut picker, &en),
            Err(RelationError::ReadOnly(_))
        ));
        assert!(picker.last_request.is_none());
        assert!(m.controls(&en).choose_existing.disabled);
    }

    #[test]
    fn test_rows_skip_unknown_ids() {
        let m = manager(Some(ids(&["m1", "gone", "m2"])));
        let catalog = Catalog::new(vec![
            DocSummary::new("m1", "media", "a.png"),
            DocSummary::new("m2", "media", "b.png"),
        ]);

        let rows = m.rows(&catalog).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].index, 0);
        assert_eq!(rows[1].index, 2);
        assert_eq!(rows[1].doc.filename, "b.png");
        assert!(rows[1].sortable);
    }

    #[test]
    fn test_controls_follow_field_settings() {
        let en = Translations::english();
        let m = manager(None);
        let controls = m.controls(&en);

        assert_eq!(controls.add_new.unwrap().label, "Add new");
        assert_eq!(controls.choose_existing.label, "Choose from existing");
        assert!(!controls.choose_existing.disabled);
        assert_eq!(controls.clear_all.unwrap().label, "Clear all");

        let mut field = FieldSettings::new("cover", RelationTo::Single("media".into()));
        field.has_many = false;
        let single = RelationManager::new(field, Vec::new(), MemoryStore::default());
        let controls = single.controls(&en);
        assert!(controls.add_new.is_none());
        assert!(controls.clear_all.is_none());
        assert!(single.add_new_request().is_none());
    }

    #[test]
    fn test_add_new_request() {
        let m = manager(None);
        let request = m.add_new_request().unwrap();
        assert_eq!(request.drawer_slug, "bulk-upload-drawer-gallery");
        assert_eq!(request.collection.as_deref(), Some("media"));
    }

    #[test]
    fn test_label_set_for_polymorphic_field() {
        let en = Translations::english();
        let field = FieldSettings::new("assets", RelationTo::Many(ids(&["media", "docs"])));
        let collections = vec![
            CollectionInfo::new("media").with_singular("Image"),
            CollectionInfo::new("docs").with_singular("Document"),
            CollectionInfo::new("users").with_singular("User"),
        ];
        let m = RelationManager::new(field, collections, MemoryStore::default());

        assert_eq!(m.label_set(&en), "Image or Document");
        assert_eq!(m.eligible_collections(), ids(&["media", "docs"]));
        assert_eq!(m.collection("docs").map(CollectionInfo::singular_label), Some("Document"));
        assert!(m.collection("users").is_none());
    }
}
