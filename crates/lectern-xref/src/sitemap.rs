//! YAML sitemap parsing.
//!
//! A sitemap lists the lecture pages in display order. Either form is accepted:
//!
//! ```yaml
//! pages:
//!   - path: python-basics
//!     title: Python Basics
//!     id: python-basics-id
//! ```
//!
//! or the bare list without the `pages` key.

use std::path::Path;

use serde::Deserialize;

use crate::descriptor::PageDescriptor;
use crate::error::SitemapError;
use crate::index::{CrossReferenceIndex, DuplicatePolicy};

/// Ordered list of page descriptors loaded from YAML.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sitemap {
    /// Pages in sitemap order.
    pub pages: Vec<PageDescriptor>,
}

/// `pages:` table form of the sitemap.
#[derive(Deserialize)]
struct SitemapTable {
    pages: Vec<PageDescriptor>,
}

impl Sitemap {
    /// Create a sitemap from already-loaded descriptors.
    #[must_use]
    pub fn new(pages: Vec<PageDescriptor>) -> Self {
        Self { pages }
    }

    /// Parse and validate a sitemap from YAML content.
    ///
    /// Empty content yields an empty sitemap.
    pub fn from_yaml(content: &str) -> Result<Self, SitemapError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        // Pick the form from the top-level node, then parse the text again so
        // field errors keep their location.
        let document: serde_yaml::Value = serde_yaml::from_str(trimmed)?;
        let pages: Vec<PageDescriptor> = if document.is_sequence() {
            serde_yaml::from_str(trimmed)?
        } else {
            serde_yaml::from_str::<SitemapTable>(trimmed)?.pages
        };

        for (index, page) in pages.iter().enumerate() {
            page.validate()
                .map_err(|message| SitemapError::InvalidDescriptor { index, message })?;
        }

        Ok(Self { pages })
    }

    /// Read and parse a sitemap file.
    pub fn load(path: &Path) -> Result<Self, SitemapError> {
        let content = std::fs::read_to_string(path).map_err(|source| SitemapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let sitemap = Self::from_yaml(&content)?;
        tracing::debug!(
            path = %path.display(),
            page_count = sitemap.pages.len(),
            "Sitemap loaded"
        );
        Ok(sitemap)
    }

    /// Build a fresh cross-reference index from the pages.
    pub fn build_index(
        &self,
        policy: DuplicatePolicy,
    ) -> Result<CrossReferenceIndex, SitemapError> {
        Ok(CrossReferenceIndex::build_with_policy(&self.pages, policy)?)
    }

    /// Number of pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// True if the sitemap lists no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
