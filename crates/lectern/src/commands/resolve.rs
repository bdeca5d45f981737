//! `lectern resolve` command implementation.

use clap::Args;
use lectern_xref::{Link, PageContext, resolve_links};

use super::{CommonArgs, LoadedSite};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Named identifiers to resolve.
    #[arg(required = true)]
    identifiers: Vec<String>,

    /// Path name of the page requesting the links.
    #[arg(long)]
    from: Option<String>,

    /// Print links as JSON.
    #[arg(long)]
    json: bool,
}

impl ResolveArgs {
    /// Execute the resolve command.
    ///
    /// # Errors
    ///
    /// Returns an error naming every identifier that could not be resolved.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let site = self.common.load()?;
        let links = resolve(&site, self.from.as_deref(), &self.identifiers)?;

        if self.json {
            output.result(&serde_json::to_string_pretty(&links)?);
        } else {
            for link in &links {
                output.result(&format!("{}\t{}", link.href, link.title));
            }
        }
        Ok(())
    }
}

fn resolve(
    site: &LoadedSite,
    from: Option<&str>,
    identifiers: &[String],
) -> Result<Vec<Link>, CliError> {
    let base_path = &site.config.links.base_path;
    let links = match from {
        Some(page) => PageContext::new(&site.index, page, base_path)?.links(identifiers)?,
        None => resolve_links(&site.index, identifiers, base_path)?,
    };
    Ok(links)
}
