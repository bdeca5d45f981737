//! `lectern page` command implementation.

use clap::Args;
use lectern_xref::PageContext;
use serde::Serialize;

use super::{CommonArgs, LoadedSite};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the page command.
#[derive(Args)]
pub(crate) struct PageArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Path name of the page.
    path: String,

    /// Print the page as JSON.
    #[arg(long)]
    json: bool,
}

/// Page metadata as printed by the command.
#[derive(Debug, PartialEq, Eq, Serialize)]
struct PageInfo {
    path: String,
    title: String,
    id: String,
    href: String,
}

impl PageArgs {
    /// Execute the page command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let site = self.common.load()?;
        let info = page_info(&site, &self.path)?;

        if self.json {
            output.result(&serde_json::to_string_pretty(&info)?);
        } else {
            output.highlight(&info.title);
            output.result(&format!("id:   {}\nhref: {}", info.id, info.href));
        }
        Ok(())
    }
}

fn page_info(site: &LoadedSite, path: &str) -> Result<PageInfo, CliError> {
    let base_path = &site.config.links.base_path;
    let page = PageContext::new(&site.index, path, base_path)?;
    Ok(PageInfo {
        path: page.path_name().to_owned(),
        title: page.title().to_owned(),
        id: page.identifier().to_owned(),
        href: page.href(),
    })
}
