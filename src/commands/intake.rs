//! Drop, paste and select commands
//!
//! Each command mounts an intake surface on a fresh region, drives one
//! interaction through it and reports the batch the surface delivered.
//! With `--attach` the batch is registered in the catalog and appended to
//! the field, standing in for the host's upload step.

use crate::i18n::Translator;
use crate::intake::{
    ClipboardPayload, EventDisposition, FileBatch, FileHandle, IntakePolicy, IntakeSurface, InteractionRegion,
    MountedSurface, PathChooser, SurfaceEvent, SurfaceLabels,
};
use crate::relations::{Catalog, CollectionInfo, FieldSettings, RecordId, RelationManager, ValueStore};
use crate::ui::{OutputWriter, format_batch};
use crate::{AttachrError, Result};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

/// Mount a surface, run one interaction and return what it delivered
/// together with the surface's labels
fn with_surface<F>(
    policy: IntakePolicy,
    translator: &dyn Translator,
    interact: F,
) -> Result<(Option<FileBatch>, SurfaceLabels)>
where
    F: FnOnce(&InteractionRegion, &MountedSurface) -> Result<()>,
{
    let delivered: Rc<RefCell<Vec<FileBatch>>> = Rc::default();
    let sink = Rc::clone(&delivered);

    let region = InteractionRegion::new();
    let surface = IntakeSurface::new(policy, move |batch: FileBatch| sink.borrow_mut().push(batch));
    let mounted = MountedSurface::mount(surface, &region);
    let labels = mounted.surface().labels(translator);

    let result = interact(&region, &mounted);
    mounted.unmount();
    result?;

    let batch = delivered.borrow_mut().pop();
    Ok((batch, labels))
}

/// Print the accepted batch, or the drag instructions if nothing came through
fn report(
    batch: Option<&FileBatch>,
    labels: &SurfaceLabels,
    translator: &dyn Translator,
    output: &dyn OutputWriter,
) {
    match batch {
        Some(batch) => {
            let count = batch.len().to_string();
            output.success(&translator.translate("upload:filesAccepted", &[("count", &count)]));
            for line in format_batch(batch) {
                output.write(&line);
            }
        }
        None => output.info(&format!("{} {}", labels.select_file, labels.instructions)),
    }
}

/// Execute the drop command - drag the files over the surface and drop them
///
/// # Errors
/// Returns an error if a path does not name a readable file
pub fn drop(
    paths: &[PathBuf],
    policy: IntakePolicy,
    translator: &dyn Translator,
    output: &dyn OutputWriter,
) -> Result<Option<FileBatch>> {
    let files = paths
        .iter()
        .map(FileHandle::from_path)
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let (batch, labels) = with_surface(policy, translator, |region, mounted| {
        region.dispatch(&SurfaceEvent::DragEnter);
        region.dispatch(&SurfaceEvent::DragOver);
        tracing::debug!(state = ?mounted.drag_state(), "hovering");
        region.dispatch(&SurfaceEvent::Drop(files));
        tracing::debug!(state = ?mounted.drag_state(), "dropped");
        Ok(())
    })?;

    report(batch.as_ref(), &labels, translator, output);
    Ok(batch)
}

/// Execute the paste command with a clipboard payload
///
/// A payload without files passes through; its text, if any, is echoed.
///
/// # Errors
/// Never fails for a well-formed payload; the signature matches the other intake commands
pub fn paste(
    payload: ClipboardPayload,
    policy: IntakePolicy,
    translator: &dyn Translator,
    output: &dyn OutputWriter,
) -> Result<Option<FileBatch>> {
    let text = payload.text.clone();
    let mut disposition = EventDisposition::PassThrough;

    let (batch, labels) = with_surface(policy, translator, |region, _| {
        disposition = region.dispatch(&SurfaceEvent::Paste(payload));
        Ok(())
    })?;

    if disposition.is_intercepted() {
        report(batch.as_ref(), &labels, translator, output);
    } else {
        output.info("Clipboard holds no files; paste passed through");
        if let Some(text) = text {
            output.write(&text);
        }
    }
    Ok(batch)
}

/// Execute the select command - offer the paths through the chooser
///
/// # Errors
/// Returns an error if a path does not name a readable file
pub fn select(
    paths: Vec<PathBuf>,
    policy: IntakePolicy,
    translator: &dyn Translator,
    output: &dyn OutputWriter,
) -> Result<Option<FileBatch>> {
    let mut chooser = PathChooser::new(paths);

    let (batch, labels) = with_surface(policy, translator, |_, mounted| {
        mounted.select_files(&mut chooser)?;
        Ok(())
    })?;

    report(batch.as_ref(), &labels, translator, output);
    Ok(batch)
}

/// Collection accepted files are registered under
///
/// # Errors
/// Returns an error if no collection is given for a polymorphic field, or if
/// the given one is not a target of the field
pub fn resolve_collection(requested: Option<&str>, field: &FieldSettings) -> Result<String> {
    match requested {
        Some(slug) if field.relation_to.includes(slug) => Ok(slug.to_string()),
        Some(slug) => Err(AttachrError::InvalidInput(format!(
            "Collection '{slug}' is not a target of field '{}'",
            field.path
        ))),
        None => field.relation_to.single().map(String::from).ok_or_else(|| {
            AttachrError::InvalidInput(format!(
                "Field '{}' relates to several collections; pass --collection",
                field.path
            ))
        }),
    }
}

/// Register the batch in the catalog and append the new ids to the field
///
/// Files whose type the collection's `mime_types` reject are skipped with a
/// warning.
///
/// # Errors
/// Returns an error if the field's value cannot be read or written
pub fn attach<S: ValueStore>(
    batch: &FileBatch,
    collection: &str,
    manager: &mut RelationManager<S>,
    catalog: &mut Catalog,
    output: &dyn OutputWriter,
) -> Result<Vec<RecordId>> {
    let allow = manager
        .collection(collection)
        .map(CollectionInfo::allow_list)
        .unwrap_or_default();

    let mut ids: Vec<RecordId> = Vec::with_capacity(batch.len());
    for file in batch {
        if allow.accepts(file.mime_type()) {
            ids.push(catalog.register(collection, file));
        } else {
            output.warning(&format!(
                "Skipped {}: '{collection}' does not accept {}",
                file.name(),
                file.mime_type()
            ));
        }
    }

    if ids.is_empty() {
        output.info(&format!("Nothing attached to '{}'", manager.field().path));
        return Ok(ids);
    }

    manager.attach_uploaded(&ids)?;
    output.success(&format!("Attached {} to '{}'", ids.join(", "), manager.field().path));
    Ok(ids)
}
