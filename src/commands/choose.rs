//! Choose command

use crate::Result;
use crate::i18n::Translator;
use crate::relations::{RecordPicker, RelationManager, ValueStore};
use crate::ui::OutputWriter;

/// Execute the choose command - open the picker and fold its result in
///
/// Returns whether the list changed.
///
/// # Errors
/// Returns an error if the field is read-only, the picker fails or the store fails
pub fn execute<S: ValueStore>(
    manager: &mut RelationManager<S>,
    picker: &mut dyn RecordPicker,
    translator: &dyn Translator,
    output: &dyn OutputWriter,
) -> Result<bool> {
    let before = manager.ids()?.len();
    let changed = manager.choose_existing(picker, translator)?;

    if changed {
        let after = manager.ids()?.len();
        output.success(&format!(
            "'{}' now holds {after} record(s) (was {before})",
            manager.field().path
        ));
    } else {
        output.info("Nothing chosen; the list is unchanged");
    }
    Ok(changed)
}
