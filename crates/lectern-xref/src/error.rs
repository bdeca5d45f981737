//! Error types for sitemap loading, index construction and resolution.

use std::fmt;
use std::path::PathBuf;

/// Error building a [`CrossReferenceIndex`](crate::CrossReferenceIndex).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
    /// Two descriptors share a path name.
    #[error("duplicate path name '{path}' (descriptors #{first} and #{second})")]
    DuplicatePath {
        /// The repeated path name.
        path: String,
        /// Position of the first descriptor using it.
        first: usize,
        /// Position of the repeated descriptor.
        second: usize,
    },
    /// Two descriptors share a named identifier.
    #[error("duplicate named identifier '{identifier}' (descriptors #{first} and #{second})")]
    DuplicateIdentifier {
        /// The repeated identifier.
        identifier: String,
        /// Position of the first descriptor using it.
        first: usize,
        /// Position of the repeated descriptor.
        second: usize,
    },
}

/// Error loading a sitemap file.
#[derive(Debug, thiserror::Error)]
pub enum SitemapError {
    /// Sitemap file could not be read.
    #[error("failed to read sitemap {}: {source}", .path.display())]
    Io {
        /// Path of the sitemap file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Sitemap content is not valid YAML or has the wrong shape.
    #[error("invalid sitemap YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    /// A page descriptor failed validation.
    #[error("invalid page descriptor #{index}: {message}")]
    InvalidDescriptor {
        /// Position of the descriptor in the sitemap.
        index: usize,
        /// What is wrong with it.
        message: String,
    },
    /// Descriptors could not be indexed.
    #[error(transparent)]
    Index(#[from] IndexError),
}

/// A reference that could not be resolved against the index.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// No page is registered under this path name.
    #[error("unknown page path '{path}'{}", FromPage(.from_page.as_deref()))]
    UnknownPath {
        /// Requested path name.
        path: String,
        /// Page that requested the resolution, if any.
        from_page: Option<String>,
    },
    /// No page is registered under this named identifier.
    #[error("unresolvable reference '{identifier}'{}", FromPage(.from_page.as_deref()))]
    UnknownIdentifier {
        /// Requested identifier.
        identifier: String,
        /// Page that requested the resolution, if any.
        from_page: Option<String>,
    },
    /// Several references failed on the same page.
    #[error("{} unresolvable references: {}", .0.len(), JoinErrors(.0))]
    Many(Vec<ResolveError>),
}

impl ResolveError {
    /// Attach the requesting page to a resolution failure.
    #[must_use]
    pub fn from_page(self, page: &str) -> Self {
        match self {
            Self::UnknownPath { path, .. } => Self::UnknownPath {
                path,
                from_page: Some(page.to_owned()),
            },
            Self::UnknownIdentifier { identifier, .. } => Self::UnknownIdentifier {
                identifier,
                from_page: Some(page.to_owned()),
            },
            Self::Many(errors) => {
                Self::Many(errors.into_iter().map(|e| e.from_page(page)).collect())
            }
        }
    }
}

struct FromPage<'a>(Option<&'a str>);

impl fmt::Display for FromPage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(page) => write!(f, " (requested from page '{page}')"),
            None => Ok(()),
        }
    }
}

struct JoinErrors<'a>(&'a [ResolveError]);

impl fmt::Display for JoinErrors<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}
