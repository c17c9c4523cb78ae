//! projscan CLI entry point.

use clap::Parser;
use projscan::cli::{self, Cli, EXIT_ERROR};
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, EnvFilter};

fn main() {
    let cli = Cli::parse();

    // Logs share stdout with the pretty report; JSON output keeps stdout clean.
    // RUST_LOG overrides the level.
    let writer = if cli.emits_json() {
        BoxMakeWriter::new(std::io::stderr)
    } else {
        BoxMakeWriter::new(std::io::stdout)
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(writer))
        .with(filter)
        .init();

    let exit_code = match cli::run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}
