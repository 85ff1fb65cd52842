//! Command-line options and input resolution

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use rudix_index_core::{Classifier, DEFAULT_URL, PageSources, Platform, RenderOptions};

#[derive(Parser, Debug)]
#[command(name = "make-index")]
#[command(version = env!("RUDIX_INDEX_VERSION"))]
#[command(about = "Generate the Rudix package download page", long_about = None)]
pub(crate) struct Cli {
    /// Only report errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub(crate) quiet: bool,

    /// Show per-package debug output
    #[arg(short, long)]
    pub(crate) verbose: bool,

    /// Base URL for package download links
    #[arg(long, env = "RUDIX_INDEX_URL", default_value = DEFAULT_URL)]
    pub(crate) url: String,

    /// Package filename list, one per line ("-" or omitted reads stdin)
    #[arg(long)]
    pub(crate) manifest: Option<PathBuf>,

    /// Package metadata CSV (name, version, summary, license, homepage)
    #[arg(long, default_value = "metadata.csv")]
    pub(crate) metadata: PathBuf,

    /// HTML placed before the package tables
    #[arg(long, default_value = "index_begin.html")]
    pub(crate) begin: PathBuf,

    /// HTML placed after the package tables
    #[arg(long, default_value = "index_end.html")]
    pub(crate) end: PathBuf,

    /// Output file (created or truncated)
    #[arg(short, long, default_value = "index.html")]
    pub(crate) output: PathBuf,

    /// Platform table to render; repeat for several, in page order
    #[arg(long = "platform", value_name = "PLATFORM", default_value = "macos10.15")]
    pub(crate) platforms: Vec<Platform>,

    /// Activate a dormant suffix rule (e.g. macos10.14)
    #[arg(long = "enable-rule", value_name = "PLATFORM")]
    pub(crate) enable_rules: Vec<Platform>,

    /// Do not emit the extra `</table>` after the last table
    #[arg(long)]
    pub(crate) no_trailing_close: bool,
}

impl Cli {
    /// Default log directive when `RUST_LOG` is unset.
    pub(crate) fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }

    pub(crate) fn classifier(&self) -> Classifier {
        let mut classifier = Classifier::default();
        for &platform in &self.enable_rules {
            classifier.enable(platform);
        }
        classifier
    }

    pub(crate) fn render_options(&self) -> RenderOptions {
        RenderOptions {
            url: self.url.clone(),
            platforms: self.platforms.clone(),
            trailing_close: !self.no_trailing_close,
        }
    }

    /// Read every input. Handles are closed before the output is created.
    pub(crate) fn load_sources(&self) -> Result<PageSources> {
        let manifest = match self.manifest.as_deref() {
            Some(path) if path != Path::new("-") => read_file(path, "manifest")?,
            _ => {
                tracing::debug!("Reading manifest from stdin");
                let mut text = String::new();
                io::stdin()
                    .lock()
                    .read_to_string(&mut text)
                    .context("Failed to read manifest from stdin")?;
                text
            }
        };

        Ok(PageSources {
            manifest,
            metadata: read_file(&self.metadata, "metadata")?,
            header: read_file(&self.begin, "header")?,
            footer: read_file(&self.end, "footer")?,
        })
    }
}

fn read_file(path: &Path, what: &str) -> Result<String> {
    tracing::debug!("Reading {what} from {}", path.display());
    fs::read_to_string(path).with_context(|| format!("Failed to read {what} {}", path.display()))
}
