//! Main entry point for the labels CLI application.
//!
//! Lists or sets sensitivity labels for a single Office document or every
//! document in a directory. Files are processed one at a time; the first
//! error stops the run.

use anyhow::Result;
use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use mip_labels::report::{self, Summary};
use mip_labels::resolve::NameTable;
use mip_labels::{Cli, Command, discover_archives, process_file};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let command = cli.pipeline_command();
    let config = cli.config();
    debug!(?command, path = %cli.path().display(), ?config, "starting");

    // Names are only used for get output.
    let names = match (&cli.resolve, &command) {
        (Some(path), Command::Get) => load_names(path),
        _ => None,
    };

    let files = discover_archives(cli.path(), &config.extensions, config.recursive)?;
    if files.is_empty() {
        println!("No files found");
        return Ok(());
    }

    println!("{}", report::HEADER);

    let mut summary = Summary::default();
    for file in &files {
        let result = process_file(file, &command, &config).await?;
        summary.add(&result);

        if cli.labeled && result.labels.is_empty() {
            continue;
        }
        println!("{}", report::format_result(&result, names.as_ref()));
    }

    if cli.summary {
        println!("{summary}");
    }

    Ok(())
}

/// Load the ID-to-name table; a table that can't be used is skipped.
fn load_names(path: &std::path::Path) -> Option<NameTable> {
    match NameTable::load(path) {
        Ok(names) => {
            debug!(path = %path.display(), entries = names.len(), "loaded name table");
            Some(names)
        }
        Err(err) => {
            warn!("skipping ID resolution: {err:#}");
            None
        }
    }
}

/// Diagnostics go to stderr so report lines stay clean on stdout.
/// `RUST_LOG` overrides the level chosen by `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
