//! Per-page link resolution.
//!
//! A [`PageContext`] is created for the page being rendered, with its own
//! path name supplied by the caller. It resolves the page's own title and
//! turns named identifiers found in lecture content into [`Link`]s. Failures
//! carry the requesting page so broken cross-links can be located.

use serde::Serialize;

use crate::descriptor::PageEntry;
use crate::error::ResolveError;
use crate::index::CrossReferenceIndex;

/// Resolved hyperlink to another page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Link {
    /// Link target (e.g., "/lectures/vim/").
    pub href: String,
    /// Display title of the target page.
    pub title: String,
    /// Path name of the target page.
    pub path_name: String,
}

/// Resolution context for a single page.
#[derive(Debug)]
pub struct PageContext<'a> {
    index: &'a CrossReferenceIndex,
    path_name: String,
    entry: &'a PageEntry,
    base_path: String,
}

impl<'a> PageContext<'a> {
    /// Create a context for the page at `path_name`.
    ///
    /// `base_path` prefixes every generated href; it is normalized to start
    /// and end with `/`.
    pub fn new(
        index: &'a CrossReferenceIndex,
        path_name: &str,
        base_path: &str,
    ) -> Result<Self, ResolveError> {
        let entry = index.page(path_name)?;
        Ok(Self {
            index,
            path_name: path_name.to_owned(),
            entry,
            base_path: normalize_base_path(base_path),
        })
    }

    /// Path name of this page.
    #[must_use]
    pub fn path_name(&self) -> &str {
        &self.path_name
    }

    /// Display title of this page.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.entry.page_title
    }

    /// Named identifier of this page.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.entry.named_identifier
    }

    /// Href of this page, built from its own path name.
    #[must_use]
    pub fn href(&self) -> String {
        page_href(&self.base_path, &self.path_name)
    }

    /// Resolve a named identifier to a link.
    pub fn link(&self, identifier: &str) -> Result<Link, ResolveError> {
        resolve_link(self.index, identifier, &self.base_path)
            .map_err(|e| e.from_page(&self.path_name))
    }

    /// Resolve several identifiers, reporting every failure at once.
    pub fn links<I, S>(&self, identifiers: I) -> Result<Vec<Link>, ResolveError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        resolve_links(self.index, identifiers, &self.base_path)
            .map_err(|e| e.from_page(&self.path_name))
    }
}

/// Resolve a named identifier to a link outside any page context.
pub fn resolve_link(
    index: &CrossReferenceIndex,
    identifier: &str,
    base_path: &str,
) -> Result<Link, ResolveError> {
    let target = index.target(identifier)?;
    Ok(Link {
        href: page_href(&normalize_base_path(base_path), &target.path_name),
        title: target.page_title.clone(),
        path_name: target.path_name.clone(),
    })
}

/// Resolve several identifiers outside any page context.
///
/// Every identifier is attempted; a single failure is returned as is, several
/// as [`ResolveError::Many`].
pub fn resolve_links<I, S>(
    index: &CrossReferenceIndex,
    identifiers: I,
    base_path: &str,
) -> Result<Vec<Link>, ResolveError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut links = Vec::new();
    let mut errors = Vec::new();
    for identifier in identifiers {
        match resolve_link(index, identifier.as_ref(), base_path) {
            Ok(link) => links.push(link),
            Err(e) => errors.push(e),
        }
    }

    match errors.len() {
        0 => Ok(links),
        1 => Err(errors.remove(0)),
        _ => Err(ResolveError::Many(errors)),
    }
}

/// Href for `path_name` under an already normalized base path.
fn page_href(base_path: &str, path_name: &str) -> String {
    format!("{base_path}{path_name}/")
}

/// Ensure a base path starts and ends with a single `/`.
fn normalize_base_path(base_path: &str) -> String {
    let trimmed = base_path.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_owned()
    } else {
        format!("/{trimmed}/")
    }
}
