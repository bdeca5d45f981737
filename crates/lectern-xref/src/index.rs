//! Cross-reference index between page paths and named identifiers.
//!
//! The index is built once from an ordered list of [`PageDescriptor`]s and
//! is read-only afterwards. It holds two mappings:
//!
//! - path name → [`PageEntry`] (title and identifier of the page)
//! - named identifier → [`TargetEntry`] (path and title of the link target)

use std::collections::HashMap;

use serde::Deserialize;

use crate::descriptor::{PageDescriptor, PageEntry, TargetEntry};
use crate::error::{IndexError, ResolveError};

/// How repeated path names or identifiers are handled during construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Fail on the first repeated key.
    #[default]
    Reject,
    /// Later descriptors replace earlier ones.
    LastWriteWins,
}

/// Bidirectional lookup between path names and named identifiers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CrossReferenceIndex {
    by_path: HashMap<String, PageEntry>,
    by_identifier: HashMap<String, TargetEntry>,
}

impl CrossReferenceIndex {
    /// Build an index, rejecting duplicate keys.
    pub fn build(descriptors: &[PageDescriptor]) -> Result<Self, IndexError> {
        Self::build_with_policy(descriptors, DuplicatePolicy::Reject)
    }

    /// Build an index with an explicit duplicate-key policy.
    ///
    /// Descriptors are visited once, in order. Under
    /// [`DuplicatePolicy::LastWriteWins`] each mapping keeps the value of the
    /// last descriptor carrying its key; this never returns an error.
    pub fn build_with_policy(
        descriptors: &[PageDescriptor],
        policy: DuplicatePolicy,
    ) -> Result<Self, IndexError> {
        let mut by_path = HashMap::with_capacity(descriptors.len());
        let mut by_identifier = HashMap::with_capacity(descriptors.len());
        // Positions of the descriptor that last wrote each key, for diagnostics.
        let mut path_pos: HashMap<&str, usize> = HashMap::with_capacity(descriptors.len());
        let mut id_pos: HashMap<&str, usize> = HashMap::with_capacity(descriptors.len());

        for (i, descriptor) in descriptors.iter().enumerate() {
            if let Some(first) = path_pos.insert(&descriptor.path_name, i) {
                match policy {
                    DuplicatePolicy::Reject => {
                        return Err(IndexError::DuplicatePath {
                            path: descriptor.path_name.clone(),
                            first,
                            second: i,
                        });
                    }
                    DuplicatePolicy::LastWriteWins => tracing::warn!(
                        path = %descriptor.path_name,
                        previous = first,
                        current = i,
                        "Duplicate path name in sitemap, keeping the later page"
                    ),
                }
            }
            if let Some(first) = id_pos.insert(&descriptor.named_identifier, i) {
                match policy {
                    DuplicatePolicy::Reject => {
                        return Err(IndexError::DuplicateIdentifier {
                            identifier: descriptor.named_identifier.clone(),
                            first,
                            second: i,
                        });
                    }
                    DuplicatePolicy::LastWriteWins => tracing::warn!(
                        identifier = %descriptor.named_identifier,
                        previous = first,
                        current = i,
                        "Duplicate named identifier in sitemap, keeping the later page"
                    ),
                }
            }

            let (page, target) = descriptor.entries();
            by_path.insert(descriptor.path_name.clone(), page);
            by_identifier.insert(descriptor.named_identifier.clone(), target);
        }

        tracing::debug!(
            page_count = by_path.len(),
            identifier_count = by_identifier.len(),
            "Cross-reference index built"
        );

        Ok(Self {
            by_path,
            by_identifier,
        })
    }

    /// Get page metadata by path name.
    #[must_use]
    pub fn get_page(&self, path: &str) -> Option<&PageEntry> {
        self.by_path.get(path)
    }

    /// Get link target by named identifier.
    #[must_use]
    pub fn get_target(&self, identifier: &str) -> Option<&TargetEntry> {
        self.by_identifier.get(identifier)
    }

    /// Get page metadata by path name, failing if the path is unknown.
    pub fn page(&self, path: &str) -> Result<&PageEntry, ResolveError> {
        self.get_page(path).ok_or_else(|| ResolveError::UnknownPath {
            path: path.to_owned(),
            from_page: None,
        })
    }

    /// Get link target by named identifier, failing if the identifier is unknown.
    pub fn target(&self, identifier: &str) -> Result<&TargetEntry, ResolveError> {
        self.get_target(identifier)
            .ok_or_else(|| ResolveError::UnknownIdentifier {
                identifier: identifier.to_owned(),
                from_page: None,
            })
    }

    /// Path name → page metadata mapping.
    #[must_use]
    pub fn by_path(&self) -> &HashMap<String, PageEntry> {
        &self.by_path
    }

    /// Named identifier → link target mapping.
    #[must_use]
    pub fn by_identifier(&self) -> &HashMap<String, TargetEntry> {
        &self.by_identifier
    }

    /// Number of distinct path names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    /// True if no pages are indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }
}

#[cfg(test)]
mod tests {
    static_assertions::assert_impl_all!(super::CrossReferenceIndex: Send, Sync);

    use pretty_assertions::assert_eq;

    use super::*;

    fn lectures() -> Vec<PageDescriptor> {
        vec![
            PageDescriptor::new("python-basics", "Python Basics", "python-basics-id"),
            PageDescriptor::new("vim", "Vim", "vim-id"),
        ]
    }

    #[test]
    fn test_concrete_lookups() {
        let index = CrossReferenceIndex::build(&lectures()).unwrap();

        assert_eq!(
            index.get_page("vim"),
            Some(&PageEntry {
                page_title: "Vim".to_owned(),
                named_identifier: "vim-id".to_owned(),
            })
        );
        assert_eq!(
            index.get_target("python-basics-id"),
            Some(&TargetEntry {
                path_name: "python-basics".to_owned(),
                page_title: "Python Basics".to_owned(),
            })
        );
    }

    #[test]
    fn test_every_descriptor_indexed_both_ways() {
        let descriptors: Vec<_> = (0..50)
            .map(|i| {
                PageDescriptor::new(format!("page-{i}"), format!("Page {i}"), format!("id-{i}"))
            })
            .collect();
        let index = CrossReferenceIndex::build(&descriptors).unwrap();

        assert_eq!(index.len(), descriptors.len());
        assert_eq!(index.by_identifier().len(), descriptors.len());
        for d in &descriptors {
            let page = index.page(&d.path_name).unwrap();
            assert_eq!(page.page_title, d.page_title);
            assert_eq!(page.named_identifier, d.named_identifier);

            let target = index.target(&d.named_identifier).unwrap();
            assert_eq!(target.path_name, d.path_name);
            assert_eq!(target.page_title, d.page_title);
        }
    }

    #[test]
    fn test_round_trip_path_to_identifier_to_path() {
        let descriptors = lectures();
        let index = CrossReferenceIndex::build(&descriptors).unwrap();

        for d in &descriptors {
            let identifier = &index.page(&d.path_name).unwrap().named_identifier;
            assert_eq!(index.target(identifier).unwrap().path_name, d.path_name);
        }
    }

    #[test]
    fn test_build_is_idempotent() {
        let descriptors = lectures();
        let first = CrossReferenceIndex::build(&descriptors).unwrap();
        let second = CrossReferenceIndex::build(&descriptors).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_descriptor_list() {
        let index = CrossReferenceIndex::build(&[]).unwrap();
        assert!(index.is_empty());
        assert!(index.by_path().is_empty());
        assert!(index.by_identifier().is_empty());
    }

    #[test]
    fn test_duplicate_path_rejected_by_default() {
        let descriptors = vec![
            PageDescriptor::new("a", "A1", "x"),
            PageDescriptor::new("a", "A2", "y"),
        ];
        let err = CrossReferenceIndex::build(&descriptors).unwrap_err();
        assert_eq!(
            err,
            IndexError::DuplicatePath {
                path: "a".to_owned(),
                first: 0,
                second: 1,
            }
        );
    }

    #[test]
    fn test_duplicate_identifier_rejected_by_default() {
        let descriptors = vec![
            PageDescriptor::new("a", "A", "x"),
            PageDescriptor::new("b", "B", "y"),
            PageDescriptor::new("c", "C", "x"),
        ];
        let err = CrossReferenceIndex::build(&descriptors).unwrap_err();
        assert_eq!(
            err,
            IndexError::DuplicateIdentifier {
                identifier: "x".to_owned(),
                first: 0,
                second: 2,
            }
        );
    }

    #[test]
    fn test_duplicate_path_last_write_wins() {
        let descriptors = vec![
            PageDescriptor::new("a", "A1", "x"),
            PageDescriptor::new("a", "A2", "y"),
        ];
        let index =
            CrossReferenceIndex::build_with_policy(&descriptors, DuplicatePolicy::LastWriteWins)
                .unwrap();

        assert_eq!(index.len(), 1);
        assert_eq!(index.page("a").unwrap().page_title, "A2");
        assert_eq!(index.page("a").unwrap().named_identifier, "y");
        // Both identifiers survive, each pointing at the shared path.
        assert_eq!(index.target("x").unwrap().page_title, "A1");
        assert_eq!(index.target("y").unwrap().page_title, "A2");
    }

    #[test]
    fn test_duplicate_identifier_last_write_wins() {
        let descriptors = vec![
            PageDescriptor::new("a", "A", "x"),
            PageDescriptor::new("b", "B", "x"),
        ];
        let index =
            CrossReferenceIndex::build_with_policy(&descriptors, DuplicatePolicy::LastWriteWins)
                .unwrap();

        assert_eq!(index.by_path().len(), 2);
        assert_eq!(index.by_identifier().len(), 1);
        assert_eq!(index.target("x").unwrap().path_name, "b");
        assert_eq!(index.page("a").unwrap().named_identifier, "x");
        assert_eq!(index.page("b").unwrap().named_identifier, "x");
    }

    #[test]
    fn test_missing_key_is_distinct_from_present_record() {
        let descriptors = vec![PageDescriptor::new("empty", "Empty", "")];
        let index =
            CrossReferenceIndex::build_with_policy(&descriptors, DuplicatePolicy::Reject).unwrap();

        assert!(index.get_target("").is_some());
        assert!(index.get_target("nonexistent").is_none());
        assert_eq!(
            index.target("nonexistent").unwrap_err(),
            ResolveError::UnknownIdentifier {
                identifier: "nonexistent".to_owned(),
                from_page: None,
            }
        );
        assert!(matches!(
            index.page("nonexistent"),
            Err(ResolveError::UnknownPath { .. })
        ));
    }

    #[test]
    fn test_policy_deserializes_kebab_case() {
        let policy: DuplicatePolicy = serde_yaml::from_str("last-write-wins").unwrap();
        assert_eq!(policy, DuplicatePolicy::LastWriteWins);
        let policy: DuplicatePolicy = serde_yaml::from_str("reject").unwrap();
        assert_eq!(policy, DuplicatePolicy::Reject);
    }
}
