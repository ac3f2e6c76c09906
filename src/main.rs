//! Attachr CLI application entry point
//!
//! Drives an intake surface and the ordered association manager of one
//! relation field from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Drop files on the surface (only the first is kept unless allow_multiple is set)
//! attachr drop a.png b.png
//!
//! # Drop and attach the accepted files to the field
//! attachr drop a.png --attach
//!
//! # Paste files copied in a file manager
//! attachr paste --attach
//!
//! # Show, reorder and prune the field
//! attachr list
//! attachr move 0 2
//! attachr remove 1
//! attachr clear --yes
//!
//! # Pick existing records that are not attached yet
//! attachr choose
//! attachr choose --add
//! ```
//!
//! # Configuration
//!
//! On first run, attachr will prompt for initial setup. Configuration is stored in
//! the user's config directory (`~/.config/attachr/config.toml` on Linux).

use attachr::{
    AttachrError,
    cli::{AttachArgs, Cli, Commands, ConfigCommands},
    commands,
    config::AttachrConfig,
    i18n::I18n,
    intake::{FileBatch, clipboard::read_system_clipboard},
    relations::{Catalog, JsonFileStore, RelationManager},
    ui::{DialoguerPicker, OutputWriter, StdoutWriter},
};
use dialoguer::{Confirm, theme::ColorfulTheme};
use std::io::IsTerminal;
use std::path::PathBuf;

type Result<T> = std::result::Result<T, AttachrError>;

/// The field's manager, its catalog and where the catalog is saved
struct FieldContext {
    manager: RelationManager<JsonFileStore>,
    catalog: Catalog,
    catalog_path: PathBuf,
}

impl FieldContext {
    fn open(config: &AttachrConfig) -> Result<Self> {
        let store = JsonFileStore::new(config.store_path()?);
        let manager = RelationManager::new(config.field.clone(), config.collections.clone(), store)
            .with_base_filters(config.base_filters.clone());
        let catalog_path = config.catalog_path()?;
        let catalog = Catalog::load(&catalog_path)?;

        tracing::debug!(
            field = %config.field.path,
            store = %manager.store().path().display(),
            catalog = %catalog_path.display(),
            "opened field"
        );

        Ok(Self {
            manager,
            catalog,
            catalog_path,
        })
    }
}

/// Load the configuration named by `--config`, or the default one
///
/// First-time setup only runs when stdin is a terminal.
fn load_config(cli: &Cli) -> Result<(AttachrConfig, PathBuf)> {
    if let Some(path) = &cli.config {
        return Ok((AttachrConfig::load_from(path)?, path.clone()));
    }

    let config = if std::io::stdin().is_terminal() {
        AttachrConfig::load_or_setup()?
    } else {
        AttachrConfig::load()?
    };
    Ok((config, AttachrConfig::config_path()?))
}

/// Prompt user for yes/no confirmation
fn confirm(prompt: &str) -> Result<bool> {
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}

/// Register an accepted batch and append it to the field when `--attach` is set
fn attach_batch(
    batch: Option<FileBatch>,
    args: &AttachArgs,
    config: &AttachrConfig,
    output: &dyn OutputWriter,
) -> Result<()> {
    let Some(batch) = batch.filter(|_| args.attach) else {
        return Ok(());
    };

    let collection = commands::resolve_collection(args.collection.as_deref(), &config.field)?;
    let mut ctx = FieldContext::open(config)?;

    let Some(drawer) = ctx.manager.add_new_request() else {
        return Err(AttachrError::InvalidInput(format!(
            "Field '{}' does not accept new records",
            config.field.path
        )));
    };
    tracing::debug!(drawer = %drawer.drawer_slug, %collection, "uploading batch");

    commands::attach(&batch, &collection, &mut ctx.manager, &mut ctx.catalog, output)?;
    ctx.catalog.save(&ctx.catalog_path)?;
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let (mut config, config_path) = load_config(cli)?;
    let output = StdoutWriter::new(cli.quiet || config.quiet);

    let mut backend = config.language_backend();
    let language = cli.language.clone().unwrap_or_else(|| config.language.clone());
    let mut i18n = I18n::load(backend.as_mut(), &language, &config.fallback_language);

    match cli.get_command() {
        Commands::Drop { paths, attach } => {
            let batch = commands::drop(&paths, config.intake.policy(), &i18n, &output)?;
            attach_batch(batch, &attach, &config, &output)
        }
        Commands::Paste { attach } => {
            let payload = read_system_clipboard()?;
            let batch = commands::paste(payload, config.intake.policy(), &i18n, &output)?;
            attach_batch(batch, &attach, &config, &output)
        }
        Commands::Select { paths, attach } => {
            let batch = commands::select(paths, config.intake.policy(), &i18n, &output)?;
            attach_batch(batch, &attach, &config, &output)
        }
        Commands::List => {
            let ctx = FieldContext::open(&config)?;
            commands::list(&ctx.manager, &ctx.catalog, &i18n, &output)
        }
        Commands::Move { from, to } => {
            let mut ctx = FieldContext::open(&config)?;
            commands::move_row(&mut ctx.manager, from, to, &output)
        }
        Commands::Remove { index } => {
            let mut ctx = FieldContext::open(&config)?;
            commands::remove_row(&mut ctx.manager, index, &output)
        }
        Commands::Clear { yes } => {
            if !config.field.has_many {
                return Err(AttachrError::InvalidInput(format!(
                    "Field '{}' holds a single value; remove it instead",
                    config.field.path
                )));
            }
            if !yes && !confirm(&format!("Clear every record from '{}'?", config.field.path))? {
                output.info("Cancelled");
                return Ok(());
            }
            let mut ctx = FieldContext::open(&config)?;
            commands::clear(&mut ctx.manager, &output)
        }
        Commands::Choose { add } => {
            let mut ctx = FieldContext::open(&config)?;
            let mut picker = DialoguerPicker::new(&ctx.catalog, i18n.date_locale()).add_mode(add);
            commands::choose(&mut ctx.manager, &mut picker, &i18n, &output)?;
            Ok(())
        }
        Commands::Labels => {
            let ctx = FieldContext::open(&config)?;
            commands::labels(&ctx.manager, &i18n, &output);
            Ok(())
        }
        Commands::Language { language } => {
            commands::language(
                &mut config,
                &config_path,
                &mut i18n,
                backend.as_mut(),
                &language,
                &output,
            )?;
            Ok(())
        }
        Commands::Config { command } => match command {
            ConfigCommands::Show => commands::config_show(&config, &output),
            ConfigCommands::Path => {
                commands::config_path(&config_path, &output);
                Ok(())
            }
        },
    }
}

fn main() {
    let cli = Cli::parse_args();

    if let Err(e) = attachr::logging::init_tracing(cli.verbose) {
        eprintln!("Failed to initialize logging: {e}");
    }

    if let Err(e) = run(&cli) {
        StdoutWriter::default().error(&e.to_string());
        std::process::exit(1);
    }
}
