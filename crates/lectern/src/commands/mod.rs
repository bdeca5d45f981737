//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod list;
pub(crate) mod page;
pub(crate) mod resolve;

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use lectern_config::{CliSettings, Config};
use lectern_xref::{CrossReferenceIndex, DuplicatePolicy, Sitemap};

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use list::ListArgs;
pub(crate) use page::PageArgs;
pub(crate) use resolve::ResolveArgs;

/// Options shared by every command.
#[derive(Args)]
pub(crate) struct CommonArgs {
    /// Path to configuration file (default: auto-discover lectern.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Sitemap YAML file (overrides config).
    #[arg(short, long, env = "LECTERN_SITEMAP")]
    sitemap: Option<PathBuf>,

    /// Keep the last page on duplicate paths or identifiers instead of failing.
    #[arg(long)]
    allow_duplicates: bool,

    /// Base path for generated links (overrides config).
    #[arg(long)]
    base_path: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Configuration, sitemap and index loaded for one command run.
pub(crate) struct LoadedSite {
    pub config: Config,
    pub sitemap: Sitemap,
    pub index: CrossReferenceIndex,
}

impl CommonArgs {
    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            sitemap_path: self.sitemap.clone(),
            duplicates: self
                .allow_duplicates
                .then_some(DuplicatePolicy::LastWriteWins),
            base_path: self.base_path.clone(),
        }
    }

    /// Load configuration and sitemap, then build the index.
    pub(crate) fn load(&self) -> Result<LoadedSite, CliError> {
        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;
        load_site(config)
    }
}

/// Load the sitemap named by `config` and build a fresh index from it.
pub(crate) fn load_site(config: Config) -> Result<LoadedSite, CliError> {
    let start = Instant::now();
    let sitemap = Sitemap::load(&config.sitemap_resolved.path)?;
    let index = sitemap.build_index(config.sitemap_resolved.duplicates)?;
    tracing::info!(
        sitemap = %config.sitemap_resolved.path.display(),
        page_count = index.len(),
        elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        "Cross-reference index loaded"
    );
    Ok(LoadedSite {
        config,
        sitemap,
        index,
    })
}
