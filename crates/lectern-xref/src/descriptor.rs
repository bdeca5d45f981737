//! Page descriptors and the records stored in the cross-reference index.

use serde::{Deserialize, Serialize};

/// One content page as declared in the sitemap.
///
/// `path_name` and `named_identifier` must each be unique across a sitemap.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDescriptor {
    /// Route segment (e.g., "python-basics").
    #[serde(rename = "path", alias = "pathName")]
    pub path_name: String,
    /// Display title.
    #[serde(rename = "title", alias = "pageTitle")]
    pub page_title: String,
    /// Stable symbolic name used by other pages to link here.
    #[serde(rename = "id", alias = "namedIdentifier")]
    pub named_identifier: String,
}

impl PageDescriptor {
    /// Create a new descriptor.
    pub fn new(
        path_name: impl Into<String>,
        page_title: impl Into<String>,
        named_identifier: impl Into<String>,
    ) -> Self {
        Self {
            path_name: path_name.into(),
            page_title: page_title.into(),
            named_identifier: named_identifier.into(),
        }
    }

    /// Check that all fields are set and the path name is a URL-safe segment.
    ///
    /// Returns a human-readable description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.path_name.trim().is_empty() {
            return Err("path cannot be empty".to_owned());
        }
        if self.page_title.trim().is_empty() {
            return Err(format!("title of '{}' cannot be empty", self.path_name));
        }
        if self.named_identifier.trim().is_empty() {
            return Err(format!("id of '{}' cannot be empty", self.path_name));
        }
        if let Some(c) = self.path_name.chars().find(|&c| !is_segment_char(c)) {
            return Err(format!(
                "path '{}' contains {c:?}, which is not allowed in a URL segment",
                self.path_name
            ));
        }
        Ok(())
    }

    /// Split into the two records stored by the index.
    pub(crate) fn entries(&self) -> (PageEntry, TargetEntry) {
        (
            PageEntry {
                page_title: self.page_title.clone(),
                named_identifier: self.named_identifier.clone(),
            },
            TargetEntry {
                path_name: self.path_name.clone(),
                page_title: self.page_title.clone(),
            },
        )
    }
}

fn is_segment_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}

/// Metadata of a page, looked up by its path name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageEntry {
    /// Display title.
    pub page_title: String,
    /// Named identifier of the page.
    pub named_identifier: String,
}

/// Link target of a page, looked up by its named identifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TargetEntry {
    /// Route segment of the page.
    pub path_name: String,
    /// Display title.
    pub page_title: String,
}
