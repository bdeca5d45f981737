//! Sitemap loading and cross-reference resolution for Lectern.
//!
//! This crate provides:
//! - [`Sitemap`]: ordered page descriptors parsed from YAML
//! - [`CrossReferenceIndex`]: path name ↔ named identifier lookup
//! - [`PageContext`]: link resolution on behalf of a single page
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use lectern_xref::{DuplicatePolicy, PageContext, Sitemap};
//!
//! let sitemap = Sitemap::load(Path::new("sitemap.yaml"))?;
//! let index = sitemap.build_index(DuplicatePolicy::Reject)?;
//!
//! let page = PageContext::new(&index, "python-basics", "/")?;
//! let link = page.link("vim-id")?;
//! println!("{} -> {}", link.title, link.href);
//! # Ok(())
//! # }
//! ```

mod descriptor;
mod error;
mod index;
mod resolver;
mod sitemap;

pub use descriptor::{PageDescriptor, PageEntry, TargetEntry};
pub use error::{IndexError, ResolveError, SitemapError};
pub use index::{CrossReferenceIndex, DuplicatePolicy};
pub use resolver::{Link, PageContext, resolve_link, resolve_links};
pub use sitemap::Sitemap;
