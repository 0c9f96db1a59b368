//! contract-tools: API contract extraction and breaking-change detection
//!
//! Extracts the exported API surface of a Go package and classifies the
//! differences between two versions as breaking, additive, or modifying.

#![allow(clippy::struct_excessive_bools, clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use contract_tools::{
    cli,
    config::{self, AppConfig, ConfigPreset, DiffConfig, DiffPaths, ExtractConfig},
    diff::DiffOptions,
    extract::ExtractOptions,
    pipeline::exit_codes,
    reports::ReportFormat,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with language support info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nSupported languages:",
        "\n  Go (package directories, go.mod module paths)",
        "\n\nOutput Formats:",
        "\n  json, markdown, text"
    )
}

#[derive(Parser)]
#[command(name = "contract-tools")]
#[command(version, long_version = build_long_version())]
#[command(about = "API contract extraction and breaking-change detection", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  Changes detected (--fail-on-change)
    2  Breaking changes detected (--fail-on-breaking)
    3  Error occurred

EXAMPLES:
    # Snapshot the API of a package
    contract-tools extract ./pkg/users -O users-v1.json

    # Compare a snapshot against the working tree
    contract-tools diff users-v1.json ./pkg/users

    # CI gate with a Markdown report
    contract-tools diff v1/ v2/ -O CHANGES.md --current-version 1.4.0 --fail-on-breaking")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "CONTRACT_TOOLS_CONFIG")]
    config: Option<PathBuf>,

    /// Configuration preset (default, strict, lenient)
    #[arg(long, global = true)]
    preset: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Symbol selection flags shared by `extract` and `diff`
#[derive(Parser)]
struct ExtractFlags {
    /// Include unexported symbols and members
    #[arg(long)]
    include_private: bool,

    /// Include symbols declared in _test.go files
    #[arg(long)]
    include_tests: bool,

    /// Descend into internal/ sub-packages
    #[arg(long)]
    include_internal: bool,

    /// Record declaration file and line for each symbol
    #[arg(long)]
    positions: bool,
}

impl ExtractFlags {
    const fn options(&self) -> ExtractOptions {
        ExtractOptions {
            include_private: self.include_private,
            include_tests: self.include_tests,
            include_internal: self.include_internal,
            record_positions: self.positions,
        }
    }
}

/// Arguments for the `extract` subcommand
#[derive(Parser)]
struct ExtractArgs {
    /// Package directory to extract
    package: PathBuf,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    #[command(flatten)]
    flags: ExtractFlags,
}

/// Arguments for the `diff` subcommand
#[derive(Parser)]
struct DiffArgs {
    /// Old package directory or contract document
    old: PathBuf,

    /// New package directory or contract document
    new: PathBuf,

    /// Output format (auto picks from the output file extension, text otherwise)
    #[arg(short, long, default_value = "auto")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Do not report documentation-only changes
    #[arg(long)]
    ignore_comments: bool,

    /// Report declarations that moved within their source files
    #[arg(long)]
    no_ignore_positions: bool,

    /// Treat parameter and result renames as breaking
    #[arg(long)]
    strict_param_names: bool,

    /// Treat struct tag edits as breaking
    #[arg(long)]
    strict_tags: bool,

    /// Released version of the old contract (enables next-version output)
    #[arg(long, value_name = "X.Y.Z")]
    current_version: Option<String>,

    /// Exit with code 2 if breaking changes are found
    #[arg(long)]
    fail_on_breaking: bool,

    /// Exit with code 1 if any changes are found
    #[arg(long)]
    fail_on_change: bool,

    /// List only breaking changes (summary counts stay complete)
    #[arg(long)]
    breaking_only: bool,

    #[command(flatten)]
    flags: ExtractFlags,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the API contract of a package directory
    Extract(ExtractArgs),

    /// Compare two contracts and classify the changes
    Diff(DiffArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .contract-tools.yaml in the current directory
    Init,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match run(cli) {
        Ok(exit_codes::SUCCESS) => {}
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

/// Start from the requested preset, or the defaults.
fn base_config(preset: Option<&str>) -> Result<AppConfig> {
    match preset {
        Some(name) => {
            let preset = ConfigPreset::from_name(name).with_context(|| {
                let known: Vec<&str> = ConfigPreset::all().iter().map(|p| p.name()).collect();
                format!("Unknown preset '{name}' (expected one of: {})", known.join(", "))
            })?;
            Ok(AppConfig::from_preset(preset))
        }
        None => Ok(AppConfig::default()),
    }
}

/// Merge the config file (if any) under the CLI overrides.
fn effective_config(cli: &Cli, overrides: &AppConfig) -> AppConfig {
    let (config, loaded_from) =
        AppConfig::from_file_with_overrides(cli.config.as_deref(), overrides);
    if let Some(path) = loaded_from {
        tracing::debug!("Loaded configuration from {}", path.display());
    }
    config
}

fn run(cli: Cli) -> Result<i32> {
    match &cli.command {
        Commands::Extract(args) => {
            let mut overrides = base_config(cli.preset.as_deref())?;
            overrides.extraction = args.flags.options();
            overrides.behavior.quiet = cli.quiet;
            let app = effective_config(&cli, &overrides);

            cli::run_extract(ExtractConfig {
                package: args.package.clone(),
                extraction: app.extraction,
                output_file: args.output_file.clone(),
                quiet: app.behavior.quiet,
            })
        }

        Commands::Diff(args) => {
            let mut overrides = base_config(cli.preset.as_deref())?;
            overrides.extraction = args.flags.options();
            overrides.diff = DiffOptions {
                ignore_positions: !args.no_ignore_positions && overrides.diff.ignore_positions,
                ignore_comments: args.ignore_comments || overrides.diff.ignore_comments,
                param_name_changes_breaking: args.strict_param_names
                    || overrides.diff.param_name_changes_breaking,
                tag_changes_breaking: args.strict_tags || overrides.diff.tag_changes_breaking,
            };
            if args.no_ignore_positions {
                overrides.extraction.record_positions = true;
            }
            overrides.output.format = args.output;
            overrides.output.file.clone_from(&args.output_file);
            overrides.output.no_color = cli.no_color;
            overrides.output.breaking_only = args.breaking_only;
            overrides.behavior.fail_on_breaking |= args.fail_on_breaking;
            overrides.behavior.fail_on_change |= args.fail_on_change;
            overrides.behavior.quiet = cli.quiet;
            overrides.behavior.current_version.clone_from(&args.current_version);
            let app = effective_config(&cli, &overrides);

            let config = DiffConfig::from_app_config(
                DiffPaths {
                    old: args.old.clone(),
                    new: args.new.clone(),
                },
                app,
            );
            cli::run_diff(config)
        }

        Commands::Completions { shell } => {
            generate(*shell, &mut Cli::command(), "contract-tools", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigSchema { output } => {
            let schema = config::generate_json_schema().context("failed to generate schema")?;
            match output {
                Some(path) => {
                    std::fs::write(path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => println!("{schema}"),
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => {
            run_config_action(action, &cli)?;
            Ok(exit_codes::SUCCESS)
        }
    }
}

fn run_config_action(action: &ConfigAction, cli: &Cli) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let overrides = base_config(cli.preset.as_deref())?;
            let (config, loaded_from) =
                AppConfig::from_file_with_overrides(cli.config.as_deref(), &overrides);
            match &loaded_from {
                Some(path) => eprintln!("# Loaded from: {}", path.display()),
                None => eprintln!("# No config file found; showing defaults"),
            }
            let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
            print!("{yaml}");
            Ok(())
        }
        ConfigAction::Path => {
            eprintln!("Config file search paths (in order):");
            for dir in config::file::search_dirs() {
                eprintln!("  {}", dir.display());
            }
            eprintln!();
            eprintln!("Recognized file names:");
            for name in config::CONFIG_FILE_NAMES {
                eprintln!("  {name}");
            }
            eprintln!();
            match config::discover_config_file(cli.config.as_deref()) {
                Some(path) => eprintln!("Active config file: {}", path.display()),
                None => eprintln!("No config file found."),
            }
            Ok(())
        }
        ConfigAction::Init => {
            let target = std::env::current_dir()
                .context("cannot determine current directory")?
                .join(".contract-tools.yaml");
            if target.exists() {
                anyhow::bail!(
                    "{} already exists. Remove it first to re-initialize.",
                    target.display()
                );
            }
            let content = config::generate_full_example_config();
            std::fs::write(&target, content)
                .with_context(|| format!("failed to write {}", target.display()))?;
            eprintln!("Created {}", target.display());
            Ok(())
        }
    }
}
