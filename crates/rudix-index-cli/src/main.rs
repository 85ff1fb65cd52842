//! `make-index` - Rudix download page generator.
//!
//! Reads a package manifest and metadata table and writes `index.html`.

use std::fs::File;
use std::io::BufWriter;

use anyhow::{Context, Result};
use clap::Parser;
use rudix_index_core::Page;
use tracing_subscriber::EnvFilter;

mod config;

use config::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over --quiet/--verbose
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!("{cli:?}");

    let sources = cli.load_sources()?;
    let page = Page::build(&sources, &cli.classifier(), &cli.render_options())
        .with_context(|| format!("Failed to parse metadata {}", cli.metadata.display()))?;

    let file = File::create(&cli.output)
        .with_context(|| format!("Failed to create {}", cli.output.display()))?;
    page.write_to(BufWriter::new(file))
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;

    tracing::info!(
        "Wrote {} ({} rows, {} bytes)",
        cli.output.display(),
        page.rows,
        page.html.len()
    );
    Ok(())
}
