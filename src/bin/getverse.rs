//! Command-line front end over the verse runtime.
//!
//! Every subcommand that reads verses resolves the root (`--root`,
//! `GETVERSE_ROOT`, settings, bundled `public/verses`), starts the runtime and
//! prints plain lines or JSON on stdout. Logs and errors go to stderr so the
//! output can be piped.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use getverse::passage::TEXT_LAYER;
use getverse::{Reference, Runtime, RuntimeError, Settings, VerseStore, resolve_verses_root};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "getverse", version, about = "Query verse files and compose passages")]
struct Cli {
    /// Verses root laid out as <root>/<language>/<verse>.json.
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Enable verbose logging. Repeat for more (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List discovered languages.
    Languages,
    /// List verse ids of a language.
    Verses { language: String },
    /// Print one verse record as JSON.
    Show { language: String, id: String },
    /// Compose paste-ready text for a chapter:verse reference.
    Passage(PassageArgs),
    /// Load the tree and print the load report as JSON.
    Check {
        /// Exit non-zero when any file was skipped.
        #[arg(long)]
        strict: bool,
    },
    /// Show or update persisted settings.
    #[command(subcommand)]
    Settings(SettingsCommand),
}

#[derive(Args, Debug)]
struct PassageArgs {
    /// Reference such as 2:255, 5.6-10 or 1:1-1:7.
    reference: String,
    /// Language directory to read from (defaults to the configured language).
    #[arg(long, short)]
    language: Option<String>,
    /// Layer to include, in order; `text` is the verse body. Repeatable.
    #[arg(long = "layer")]
    layers: Vec<String>,
    /// Leave the verse body out.
    #[arg(long)]
    no_text: bool,
    /// Citation label for the suffix.
    #[arg(long)]
    label: Option<String>,
}

#[derive(Subcommand, Debug)]
enum SettingsCommand {
    /// Print the effective settings as JSON.
    Show,
    /// Update and save settings.
    Set(SettingsSetArgs),
}

#[derive(Args, Debug)]
struct SettingsSetArgs {
    /// Verses root to use when no --root or GETVERSE_ROOT is given.
    #[arg(long = "verses-root")]
    verses_root: Option<PathBuf>,
    /// Forget the saved verses root.
    #[arg(long, conflicts_with = "verses_root")]
    clear_root: bool,
    #[arg(long)]
    language: Option<String>,
    /// Replace the saved layers (repeatable, in order).
    #[arg(long = "layer")]
    layers: Vec<String>,
    #[arg(long)]
    label: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("getverse: {err:#}");
            ExitCode::from(1)
        }
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let settings = Settings::load();

    match cli.command {
        Commands::Languages => {
            let runtime = start(cli.root.as_deref(), &settings)?;
            for language in runtime.languages() {
                println!("{language}");
            }
        }
        Commands::Verses { language } => {
            let runtime = start(cli.root.as_deref(), &settings)?;
            for id in runtime.verses(&language)? {
                println!("{id}");
            }
        }
        Commands::Show { language, id } => {
            let runtime = start(cli.root.as_deref(), &settings)?;
            let record = runtime.verse(&language, &id)?;
            println!("{}", serde_json::to_string_pretty(record)?);
        }
        Commands::Passage(args) => {
            let runtime = start(cli.root.as_deref(), &settings)?;
            run_passage(&runtime, &settings, args)?;
        }
        Commands::Check { strict } => return run_check(cli.root.as_deref(), &settings, strict),
        Commands::Settings(command) => run_settings(settings, command)?,
    }

    Ok(ExitCode::SUCCESS)
}

fn start(explicit_root: Option<&Path>, settings: &Settings) -> Result<Runtime> {
    let root = resolve_verses_root(explicit_root, settings)?;
    debug!(root = %root.path.display(), source = ?root.source, "starting runtime");
    Runtime::start(&root.path).with_context(|| format!("loading verses from {}", root.path.display()))
}

fn run_passage(runtime: &Runtime, settings: &Settings, args: PassageArgs) -> Result<()> {
    let reference = Reference::parse(&args.reference)?;
    let language = args
        .language
        .unwrap_or_else(|| settings.default_language.clone());

    let mut options = settings.passage_options();
    if !args.layers.is_empty() {
        options.layers = args.layers;
    }
    if args.no_text {
        options.layers.retain(|layer| layer != TEXT_LAYER);
    }
    if let Some(label) = args.label {
        options.citation_label = label;
    }

    let text = runtime.passage(&language, &reference, &options)?;
    println!("{text}");
    Ok(())
}

fn run_check(explicit_root: Option<&Path>, settings: &Settings, strict: bool) -> Result<ExitCode> {
    let root = resolve_verses_root(explicit_root, settings)?;
    let outcome = VerseStore::load(&root.path)?;
    println!("{}", serde_json::to_string_pretty(&outcome.report)?);

    if outcome.store.is_empty() {
        return Err(RuntimeError::EmptyStore {
            root: root.path,
            issues: outcome.report.len(),
        }
        .into());
    }

    let errors = outcome.report.errors().count();
    info!(
        languages = outcome.store.languages().len(),
        verses = outcome.store.len(),
        errors,
        warnings = outcome.report.warnings().count(),
        "check complete"
    );
    if strict && errors > 0 {
        eprintln!("getverse: {errors} file(s) skipped; see report");
        return Ok(ExitCode::from(1));
    }
    Ok(ExitCode::SUCCESS)
}

fn run_settings(mut settings: Settings, command: SettingsCommand) -> Result<()> {
    match command {
        SettingsCommand::Show => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        SettingsCommand::Set(args) => {
            if let Some(root) = args.verses_root {
                settings.verses_root = Some(root);
            }
            if args.clear_root {
                settings.verses_root = None;
            }
            if let Some(language) = args.language {
                settings.default_language = language;
            }
            if !args.layers.is_empty() {
                settings.layers = args.layers;
            }
            if let Some(label) = args.label {
                settings.citation_label = label;
            }
            let path = settings.save()?;
            info!(path = %path.display(), "settings saved");
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
    }
    Ok(())
}
