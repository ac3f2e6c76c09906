//! List command

use crate::Result;
use crate::i18n::{I18n, Translator};
use crate::relations::{DocumentLookup, FieldControls, RelationManager, ValueStore};
use crate::ui::{OutputWriter, format_row};

/// Execute the list command - print the resolvable rows and the field's controls
///
/// Ids the lookup cannot resolve are counted but not shown.
///
/// # Errors
/// Returns an error if the field's value cannot be read
pub fn execute<S: ValueStore>(
    manager: &RelationManager<S>,
    lookup: &dyn DocumentLookup,
    i18n: &I18n,
    output: &dyn OutputWriter,
) -> Result<()> {
    let rows = manager.rows(lookup)?;
    let total = manager.ids()?.len();

    if rows.is_empty() {
        let label = manager.label_set(i18n);
        output.info(&i18n.translate("general:noResults", &[("label", &label)]));
    }

    for row in &rows {
        output.write(&format_row(row, i18n.date_locale()));
    }

    let missing = total - rows.len();
    if missing > 0 {
        output.warning(&format!("{missing} associated record(s) could not be found"));
    }

    output.info(&describe_controls(&manager.controls(i18n)));
    Ok(())
}

/// `Add new | Choose from existing | Clear all`, marking disabled controls
#[must_use]
pub fn describe_controls(controls: &FieldControls) -> String {
    let mut parts = Vec::new();
    if let Some(add_new) = &controls.add_new {
        parts.push(add_new.label.clone());
    }
    if controls.choose_existing.disabled {
        parts.push(format!("{} (read-only)", controls.choose_existing.label));
    } else {
        parts.push(controls.choose_existing.label.clone());
    }
    if let Some(clear_all) = &controls.clear_all {
        parts.push(clear_all.label.clone());
    }
    parts.join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relations::{Catalog, CollectionInfo, DocSummary, FieldSettings, MemoryStore, RelationTo};
    use crate::ui::{BufferedWriter, MessageLevel};

    fn manager(ids: &[&str]) -> RelationManager<MemoryStore> {
        let field = FieldSettings::new("gallery", RelationTo::Single("media".into()));
        let collections = vec![CollectionInfo::new("media").with_singular("Image")];
        RelationManager::new(field, collections, MemoryStore::with_ids(ids.iter().copied()))
    }

    #[test]
    fn test_list_prints_rows_in_order() {
        colored::control::set_override(false);
        let catalog = Catalog::new(vec![
            DocSummary::new("m1", "media", "a.png"),
            DocSummary::new("m2", "media", "b.png"),
        ]);
        let output = BufferedWriter::new();

        execute(&manager(&["m2", "m1"]), &catalog, &I18n::english(), &output).unwrap();

        let rows = output.at_level(MessageLevel::Normal);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].contains("m2"));
        assert!(rows[1].contains("m1"));
        assert!(output.at_level(MessageLevel::Warning).is_empty());
    }

    #[test]
    fn test_list_empty_uses_no_results_label() {
        let output = BufferedWriter::new();
        execute(&manager(&[]), &Catalog::default(), &I18n::english(), &output).unwrap();

        let info = output.at_level(MessageLevel::Info);
        assert_eq!(info[0], "No Image found.");
        assert_eq!(info[1], "Add new | Choose from existing | Clear all");
    }

    #[test]
    fn test_list_warns_about_unresolved_ids() {
        let catalog = Catalog::new(vec![DocSummary::new("m1", "media", "a.png")]);
        let output = BufferedWriter::new();

        execute(&manager(&["m1", "gone"]), &catalog, &I18n::english(), &output).unwrap();

        assert_eq!(output.at_level(MessageLevel::Normal).len(), 1);
        assert_eq!(
            output.at_level(MessageLevel::Warning),
            vec!["1 associated record(s) could not be found".to_string()]
        );
    }
}
