//! Command-line interface definitions and parsing
//!
//! This module defines the complete CLI structure for attachr using the `clap` crate.
//!
//! # Commands
//!
//! - **drop**, **paste**, **select**: feed files through the intake surface
//! - **list**, **move**, **remove**, **clear**: edit the association list
//! - **choose**: pick existing records (bulk replace, or `--add` to append one)
//! - **labels**, **language**, **config**: inspect and adjust settings
//!
//! # Examples
//!
//! ```
//! use attachr::cli::{Cli, Commands};
//! use clap::Parser;
//!
//! let cli = Cli::parse_from(["attachr", "move", "0", "2"]);
//! assert!(matches!(cli.get_command(), Commands::Move { from: 0, to: 2 }));
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Options shared by the intake commands
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachArgs {
    /// Register accepted files in the catalog and append them to the field
    #[arg(short = 'a', long = "attach")]
    pub attach: bool,

    /// Collection to register files under (defaults to the field's single target)
    #[arg(short = 'c', long = "collection", value_name = "SLUG", requires = "attach")]
    pub collection: Option<String>,
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,

    /// Print the path of the configuration file
    Path,
}

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "attachr")]
#[command(about = "Drop, paste and order attachments of a relation field", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Use this configuration file instead of the default one
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Override the configured UI language
    #[arg(short = 'l', long = "language", value_name = "LANG", global = true)]
    pub language: Option<String>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Log debug output to stderr
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Drag files onto the intake surface and drop them
    #[command(visible_alias = "d")]
    Drop {
        /// Files to drop
        #[arg(value_name = "FILE", required = true)]
        paths: Vec<PathBuf>,

        #[command(flatten)]
        attach: AttachArgs,
    },

    /// Paste files from the system clipboard
    #[command(visible_alias = "p")]
    Paste {
        #[command(flatten)]
        attach: AttachArgs,
    },

    /// Select files through the chooser (honors the configured MIME types)
    #[command(visible_alias = "s")]
    Select {
        /// Files offered to the chooser
        #[arg(value_name = "FILE", required = true)]
        paths: Vec<PathBuf>,

        #[command(flatten)]
        attach: AttachArgs,
    },

    /// Show the associated records in order (default)
    #[command(visible_alias = "ls")]
    List,

    /// Move the row at FROM to position TO
    #[command(visible_alias = "mv")]
    Move {
        #[arg(value_name = "FROM")]
        from: usize,

        #[arg(value_name = "TO")]
        to: usize,
    },

    /// Remove the row at INDEX
    #[command(visible_alias = "rm")]
    Remove {
        #[arg(value_name = "INDEX")]
        index: usize,
    },

    /// Clear the field
    Clear {
        /// Do not ask for confirmation
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },

    /// Choose existing records not yet associated
    Choose {
        /// Pick a single record and append it instead of replacing the list
        #[arg(long = "add")]
        add: bool,
    },

    /// Print the label of the eligible collections
    Labels,

    /// Switch the UI language and remember it
    Language {
        #[arg(value_name = "LANG")]
        language: String,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to List if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::List)
    }
}
