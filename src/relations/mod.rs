//! Ordered association manager
//!
//! Manages the ordered list of record ids a relation field points at:
//! reorder, remove, clear, merge picker selections and attach fresh uploads.
//! The list itself lives in a host-owned [`ValueStore`]; the picker and the
//! document lookup are injected collaborators.
//!
//! # Examples
//!
//! ```
//! use attachr::relations::{FieldSettings, MemoryStore, RelationManager, RelationTo};
//!
//! let field = FieldSettings::new("gallery", RelationTo::Single("media".into()));
//! let store = MemoryStore::with_ids(["a", "b", "c", "d"]);
//! let mut manager = RelationManager::new(field, Vec::new(), store);
//!
//! manager.move_item(0, 2).unwrap();
//! assert_eq!(manager.ids().unwrap(), ["b", "c", "a", "d"]);
//! ```

pub mod collection;
pub mod error;
pub mod filter;
pub mod labels;
pub mod list;
pub mod lookup;
pub mod manager;
pub mod picker;
pub mod store;

pub use collection::{CollectionInfo, CollectionLabels, RelationTo};
pub use error::RelationError;
pub use filter::{CollectionFilter, FilterOptions, IdConstraint, exclusion_filter, filter_options};
pub use labels::{join_with_or, label_set};
pub use list::{AssociationValue, RecordId, append_items, move_item, remove_item};
pub use lookup::{Catalog, DocSummary, DocumentLookup};
pub use manager::{
    Control, FieldControls, FieldSettings, MergeMode, RelationManager, RelationRow, UploadDrawerRequest,
};
pub use picker::{MockPicker, PickerOutcome, PickerRequest, RecordPicker, SelectionMap};
pub use store::{JsonFileStore, MemoryStore, ValueStore};
