//! Command-line interface for projscan.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::audit::Auditor;
use crate::config::{self, AuditConfig};
use crate::report;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Default config template written by `init`.
const CONFIG_TEMPLATE: &str = include_str!("templates/projscan.yaml");

/// Static project audit - file counts, risky patterns and a health score.
///
/// Without a subcommand the current directory is audited and a
/// human-readable report is printed.
#[derive(Parser)]
#[command(name = "projscan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Whether the selected command prints a JSON document on stdout.
    pub fn emits_json(&self) -> bool {
        matches!(&self.command, Some(Commands::Audit(args)) if args.format == "json")
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Audit a project directory
    #[command(visible_alias = "check")]
    Audit(AuditArgs),
    /// Write a projscan config file with the default settings
    Init(InitArgs),
}

/// Arguments for the audit command.
#[derive(Parser, Default)]
pub struct AuditArgs {
    /// Project root to audit
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Path to config YAML file (default: projscan.yaml in the root, if any)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Exit non-zero when the score is below this value
    #[arg(long)]
    pub fail_under: Option<i32>,
}

impl AuditArgs {
    /// Arguments used when no subcommand is given.
    pub fn current_dir() -> Self {
        Self {
            path: PathBuf::from("."),
            format: "pretty".to_string(),
            ..Default::default()
        }
    }
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "projscan.yaml")]
    pub output: PathBuf,
}

/// Dispatch a parsed command line.
pub fn run(cli: Cli) -> anyhow::Result<i32> {
    match cli.command {
        Some(Commands::Audit(args)) => run_audit(&args),
        Some(Commands::Init(args)) => run_init(&args),
        None => run_audit(&AuditArgs::current_dir()),
    }
}

/// Run the audit command.
pub fn run_audit(args: &AuditArgs) -> anyhow::Result<i32> {
    // Validate format
    if args.format != "pretty" && args.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    if let Some(min) = args.fail_under {
        if !(0..=100).contains(&min) {
            eprintln!("Error: --fail-under must be between 0 and 100, got {}", min);
            return Ok(EXIT_ERROR);
        }
    }

    let (config, config_path) = match AuditConfig::load(&args.path, args.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };
    if let Some(p) = &config_path {
        tracing::debug!("using config {}", p.display());
    }

    let report = Auditor::new(&args.path)
        .config(config)
        .threshold(args.fail_under)
        .run()?;

    match args.format.as_str() {
        "json" => report::write_json(&report)?,
        _ => report::write_pretty(&report)?,
    }

    if report.score.passed {
        Ok(EXIT_SUCCESS)
    } else {
        Ok(EXIT_FAILED)
    }
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    // Check if output already exists
    if args.output.exists() {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Remove it or use --output to specify a different path");
        return Ok(EXIT_ERROR);
    }

    // Create output directory if needed
    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    }

    // Sanity check: the template must round-trip through the parser
    let parsed = AuditConfig::parse_str(CONFIG_TEMPLATE)?;
    config::validate(&parsed)?;

    if let Err(e) = std::fs::write(&args.output, CONFIG_TEMPLATE) {
        eprintln!("Error: failed to write config: {}", e);
        return Ok(EXIT_ERROR);
    }

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Edit {} to list your project's leftover identifiers",
        args.output.display()
    );
    println!("  2. Run: projscan audit . --config {}", args.output.display());

    Ok(EXIT_SUCCESS)
}
