//! `lectern check` command implementation.

use clap::Args;

use super::{CommonArgs, LoadedSite};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the config or sitemap cannot be loaded, or if the
    /// index cannot be built.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let site = self.common.load()?;

        output.info(&format!(
            "Sitemap: {}",
            site.config.sitemap_resolved.path.display()
        ));
        output.success(&summary(&site));
        Ok(())
    }
}

fn summary(site: &LoadedSite) -> String {
    let total = site.sitemap.len();
    let paths_overwritten = total - site.index.by_path().len();
    let ids_overwritten = total - site.index.by_identifier().len();

    let mut overwritten = Vec::new();
    if paths_overwritten > 0 {
        overwritten.push(format!("{paths_overwritten} duplicate paths"));
    }
    if ids_overwritten > 0 {
        overwritten.push(format!("{ids_overwritten} duplicate identifiers"));
    }

    if overwritten.is_empty() {
        format!("OK: {} pages indexed", site.index.len())
    } else {
        format!(
            "OK: {} pages indexed ({} overwritten)",
            site.index.len(),
            overwritten.join(", ")
        )
    }
}
