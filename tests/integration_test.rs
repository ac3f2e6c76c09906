//! Integration tests for attachr
//!
//! These tests drive the intake surface and the association manager together
//! against temporary, file-backed stores and verify the complete workflows.

use attachr::commands;
use attachr::config::AttachrConfig;
use attachr::i18n::{BuiltinBackend, DirectoryBackend, I18n, Translator};
use attachr::intake::{
    ClipboardPayload, DragState, EventDisposition, FileBatch, FileHandle, IntakePolicy, IntakeSurface,
    InteractionRegion, MountedSurface, SurfaceEvent,
};
use attachr::relations::{
    Catalog, CollectionInfo, FieldSettings, JsonFileStore, MemoryStore, MockPicker, PickerOutcome, RelationManager,
    RelationTo, SelectionMap, ValueStore,
};
use attachr::ui::{BufferedWriter, MessageLevel};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Helper function to create test files in `dir`
fn create_test_files(dir: &Path, names: &[&str]) -> Vec<PathBuf> {
    names
        .iter()
        .map(|name| {
            let path = dir.join(name);
            fs::write(&path, format!("content of {name}")).unwrap();
            path
        })
        .collect()
}

/// Helper function to build a file-backed manager for a media gallery
fn gallery_manager(dir: &Path) -> RelationManager<JsonFileStore> {
    let field = FieldSettings::new("gallery", RelationTo::Single("media".into()));
    let collections = vec![CollectionInfo::new("media").with_singular("Image")];
    RelationManager::new(field, collections, JsonFileStore::new(dir.join("gallery.json")))
}

#[test]
fn test_single_file_drop_hands_first_file_to_manager() {
    let field = FieldSettings::new("gallery", RelationTo::Single("media".into()));
    let manager = Rc::new(RefCell::new(RelationManager::new(
        field,
        Vec::new(),
        MemoryStore::default(),
    )));
    let catalog = Rc::new(RefCell::new(Catalog::default()));
    let calls = Rc::new(RefCell::new(0));

    let handler = {
        let manager = Rc::clone(&manager);
        let catalog = Rc::clone(&catalog);
        let calls = Rc::clone(&calls);
        move |batch: FileBatch| {
            *calls.borrow_mut() += 1;
            let ids: Vec<String> = batch
                .iter()
                .map(|file| catalog.borrow_mut().register("media", file))
                .collect();
            manager.borrow_mut().attach_uploaded(&ids).unwrap();
        }
    };

    let region = InteractionRegion::new();
    let mounted = MountedSurface::mount(IntakeSurface::new(IntakePolicy::single(), handler), &region);

    assert_eq!(region.dispatch(&SurfaceEvent::DragEnter), EventDisposition::Intercepted);
    assert_eq!(mounted.drag_state(), DragState::Dragging);
    region.dispatch(&SurfaceEvent::DragOver);
    region.dispatch(&SurfaceEvent::Drop(vec![
        FileHandle::from_bytes("first.png", "image/png", vec![1]),
        FileHandle::from_bytes("second.png", "image/png", vec![2]),
        FileHandle::from_bytes("third.png", "image/png", vec![3]),
    ]));

    assert_eq!(mounted.drag_state(), DragState::Idle);
    assert_eq!(*calls.borrow(), 1);
    assert_eq!(manager.borrow().ids().unwrap(), vec!["media-1"]);
    assert_eq!(catalog.borrow().documents()[0].filename, "first.png");

    mounted.unmount();
    assert_eq!(region.listener_count(), 0);
}

#[test]
fn test_repeated_mounts_leave_no_listeners() {
    let region = InteractionRegion::new();
    let delivered = Rc::new(RefCell::new(0));

    for _ in 0..10 {
        let sink = Rc::clone(&delivered);
        let mounted = MountedSurface::mount(
            IntakeSurface::new(IntakePolicy::multiple(), move |_batch: FileBatch| *sink.borrow_mut() += 1),
            &region,
        );
        region.dispatch(&SurfaceEvent::Paste(ClipboardPayload::files(vec![
            FileHandle::from_bytes("a.txt", "text/plain", vec![0]),
        ])));
        mounted.unmount();
    }

    assert_eq!(region.listener_count(), 0);
    assert_eq!(*delivered.borrow(), 10);

    // Nothing is listening any more
    let disposition = region.dispatch(&SurfaceEvent::Drop(vec![FileHandle::from_bytes(
        "late.txt",
        "text/plain",
        vec![0],
    )]));
    assert_eq!(disposition, EventDisposition::PassThrough);
    assert_eq!(*delivered.borrow(), 10);
}

#[test]
fn test_text_paste_is_not_captured() {
    let region = InteractionRegion::new();
    let delivered = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&delivered);
    let _mounted = MountedSurface::mount(
        IntakeSurface::new(IntakePolicy::single(), move |_batch: FileBatch| *sink.borrow_mut() += 1),
        &region,
    );

    let disposition = region.dispatch(&SurfaceEvent::Paste(ClipboardPayload::text("just words")));

    assert_eq!(disposition, EventDisposition::PassThrough);
    assert_eq!(*delivered.borrow(), 0);
}

#[test]
fn test_drop_attach_reorder_remove_workflow() {
    let dir = tempfile::tempdir().unwrap();
    let paths = create_test_files(dir.path(), &["a.png", "b.png", "c.png"]);
    let output = BufferedWriter::new();
    let en = I18n::english();
    let mut manager = gallery_manager(dir.path());
    let mut catalog = Catalog::default();

    let batch = commands::drop(&paths, IntakePolicy::multiple(), &en, &output)
        .unwrap()
        .unwrap();
    let ids = commands::attach(&batch, "media", &mut manager, &mut catalog, &output).unwrap();
    assert_eq!(ids, vec!["media-1", "media-2", "media-3"]);

    let catalog_path = dir.path().join("catalog.toml");
    catalog.save(&catalog_path).unwrap();

    // A fresh manager over the same file sees the persisted list
    let mut manager = gallery_manager(dir.path());
    commands::move_row(&mut manager, 0, 2, &output).unwrap();
    assert_eq!(manager.ids().unwrap(), vec!["media-2", "media-3", "media-1"]);

    commands::remove_row(&mut manager, 1, &output).unwrap();
    assert_eq!(manager.ids().unwrap(), vec!["media-2", "media-1"]);

    let listing = BufferedWriter::new();
    let catalog = Catalog::load(&catalog_path).unwrap();
    commands::list(&manager, &catalog, &en, &listing).unwrap();
    let rows = listing.at_level(MessageLevel::Normal);
    assert_eq!(rows.len(), 2);
    assert!(rows[0].contains("b.png"));
    assert!(rows[1].contains("a.png"));
}

#[test]
fn test_out_of_range_move_keeps_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let mut manager = gallery_manager(dir.path());
    manager.store_mut().set_value(Some(vec!["x".into(), "y".into()])).unwrap();
    let before = fs::read_to_string(dir.path().join("gallery.json")).unwrap();

    let output = BufferedWriter::new();
    assert!(commands::move_row(&mut manager, 0, 2, &output).is_err());
    assert!(commands::remove_row(&mut manager, 7, &output).is_err());

    let after = fs::read_to_string(dir.path().join("gallery.json")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_removing_last_item_differs_from_clear() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gallery.json");
    let mut manager = gallery_manager(dir.path());
    let output = BufferedWriter::new();

    manager.attach_uploaded(&["only".to_string()]).unwrap();
    commands::remove_row(&mut manager, 0, &output).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap().trim(), "[]");
    assert_eq!(manager.value().unwrap(), Some(Vec::new()));

    manager.attach_uploaded(&["again".to_string()]).unwrap();
    commands::clear(&mut manager, &output).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap().trim(), "null");
    assert_eq!(manager.value().unwrap(), None);
}

#[test]
fn test_picker_sees_exclusion_and_bulk_replaces() {
    let dir = tempfile::tempdir().unwrap();
    let mut manager = gallery_manager(dir.path());
    manager.attach_uploaded(&["media-1".to_string()]).unwrap();

    let mut picker = MockPicker::new(PickerOutcome::Bulk(
        [("media-2", true), ("media-3", true)].into_iter().collect::<SelectionMap>(),
    ));
    let output = BufferedWriter::new();

    assert!(commands::choose(&mut manager, &mut picker, &I18n::english(), &output).unwrap());
    assert_eq!(manager.ids().unwrap(), vec!["media-2", "media-3"]);

    let request = picker.last_request.unwrap();
    assert_eq!(request.title, "Choose Image");
    assert!(!request.filters.admits("media", "media-1"));
    assert!(request.filters.admits("media", "media-2"));

    // The next request excludes what is associated now
    let next = manager.picker_request(&I18n::english()).unwrap();
    assert!(next.filters.admits("media", "media-1"));
    assert!(!next.filters.admits("media", "media-3"));
}

#[test]
fn test_config_drives_policy_filters_and_labels() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        format!(
            r#"
language = "de"
store_path = "{}"

[intake]
allow_multiple = false

[field]
path = "assets"
relation_to = ["media", "docs"]

[[collections]]
slug = "media"
labels = {{ singular = "Bild" }}

[[collections]]
slug = "docs"
labels = {{ singular = "Dokument" }}

[base_filters.docs.id]
not_in = ["archived"]
"#,
            dir.path().join("assets.json").display()
        ),
    )
    .unwrap();

    let config = AttachrConfig::load_from(&config_path).unwrap();
    let i18n = I18n::load(&mut BuiltinBackend, &config.language, &config.fallback_language);
    let store = JsonFileStore::new(config.store_path().unwrap());
    let mut manager = RelationManager::new(config.field.clone(), config.collections.clone(), store)
        .with_base_filters(config.base_filters.clone());
    manager.attach_uploaded(&["m1".to_string(), "d1".to_string()]).unwrap();

    assert!(!config.intake.policy().allow_multiple);
    assert_eq!(manager.label_set(&i18n), "Bild oder Dokument");

    let options = manager.filter_options().unwrap();
    assert!(!options.admits("media", "m1"));
    // A caller-supplied not_in wins over the derived exclusion
    assert!(options.admits("docs", "d1"));
    assert!(!options.admits("docs", "archived"));

    assert_eq!(
        commands::resolve_collection(None, &config.field).unwrap_err().to_string(),
        "Invalid input: Field 'assets' relates to several collections; pass --collection"
    );
}

#[test]
fn test_failed_language_switch_keeps_translations() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("de.toml"),
        "[fields]\naddNew = \"Neu hochladen\"\n",
    )
    .unwrap();
    fs::write(dir.path().join("fr.toml"), "this is = not [valid toml").unwrap();

    let mut backend = DirectoryBackend::new(dir.path());
    let mut i18n = I18n::load(&mut backend, "de", "en");
    assert_eq!(i18n.t("fields:addNew"), "Neu hochladen");
    assert_eq!(i18n.t("general:or"), "oder");

    assert!(!i18n.switch_language(&mut backend, "fr"));
    assert_eq!(i18n.language(), "de");
    assert_eq!(i18n.t("fields:addNew"), "Neu hochladen");
    assert_eq!(i18n.date_locale().key(), "de");
}
