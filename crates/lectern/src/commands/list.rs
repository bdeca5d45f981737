//! `lectern list` command implementation.

use clap::Args;
use lectern_xref::Sitemap;

use super::CommonArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the list command.
#[derive(Args)]
pub(crate) struct ListArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Print pages as JSON.
    #[arg(long)]
    json: bool,
}

impl ListArgs {
    /// Execute the list command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let site = self.common.load()?;

        let rendered = if self.json {
            serde_json::to_string_pretty(&site.sitemap.pages)?
        } else {
            render_table(&site.sitemap)
        };
        output.result(&rendered);
        Ok(())
    }
}

/// One tab-separated line per page: path, identifier, title.
fn render_table(sitemap: &Sitemap) -> String {
    sitemap
        .pages
        .iter()
        .map(|p| format!("{}\t{}\t{}", p.path_name, p.named_identifier, p.page_title))
        .collect::<Vec<_>>()
        .join("\n")
}
