//! CLI error types.

use lectern_config::ConfigError;
use lectern_xref::{ResolveError, SitemapError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Sitemap(#[from] SitemapError),

    #[error("{0}")]
    Resolve(#[from] ResolveError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}
