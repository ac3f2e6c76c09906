//! Command implementations
//!
//! Each command is a function that takes the already-loaded collaborators
//! (manager, catalog, localization, output) and performs one operation.
//! Loading and saving happen in `main`.

pub mod choose;
pub mod edit;
pub mod intake;
pub mod list;
pub mod settings;

// Re-export execute functions for convenience
pub use choose::execute as choose;
pub use edit::{clear, move_row, remove_row};
pub use intake::{attach, drop, paste, resolve_collection, select};
pub use list::execute as list;
pub use settings::{config_path, config_show, labels, language};
