//! Move, remove and clear commands

use crate::Result;
use crate::relations::{RelationManager, ValueStore};
use crate::ui::OutputWriter;

/// Execute the move command
///
/// # Errors
/// Returns an error if either index is out of range (the value is left
/// untouched) or the store fails
pub fn move_row<S: ValueStore>(
    manager: &mut RelationManager<S>,
    from: usize,
    to: usize,
    output: &dyn OutputWriter,
) -> Result<()> {
    manager.move_item(from, to)?;
    output.success(&format!("Moved row {from} to {to}"));
    Ok(())
}

/// Execute the remove command
///
/// # Errors
/// Returns an error if the index is out of range (the value is left
/// untouched) or the store fails
pub fn remove_row<S: ValueStore>(manager: &mut RelationManager<S>, index: usize, output: &dyn OutputWriter) -> Result<()> {
    manager.remove_item(index)?;
    output.success(&format!("Removed row {index}"));
    Ok(())
}

/// Execute the clear command - the field's value becomes absent
///
/// # Errors
/// Returns an error if the store fails
pub fn clear<S: ValueStore>(manager: &mut RelationManager<S>, output: &dyn OutputWriter) -> Result<()> {
    let count = manager.ids()?.len();
    manager.clear_all()?;
    output.success(&format!("Cleared {count} record(s) from '{}'", manager.field().path));
    Ok(())
}
