//! Newest-first ordering of validated releases.

use super::catalog::CatalogEntry;
use super::validation::ValidatedCatalog;
use thiserror::Error;

/// Errors raised when ordering releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OrderingError {
    /// No release was found, so there is no latest release.
    #[error("no release versions were found on the page")]
    NoVersions,
}

/// Validated releases ordered strictly newest-first.
///
/// The latest release is held apart from the rest so that a non-empty
/// ordering is guaranteed by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedReleases {
    latest: CatalogEntry,
    older: Vec<CatalogEntry>,
}

impl OrderedReleases {
    /// Return the newest release.
    #[must_use]
    pub fn latest(&self) -> &CatalogEntry {
        &self.latest
    }

    /// Iterate over every release, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        std::iter::once(&self.latest).chain(&self.older)
    }

    /// Return the number of releases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.older.len() + 1
    }

    /// Always false; an ordering holds at least the latest release.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Order validated releases by descending semantic version.
///
/// # Errors
///
/// Returns [`OrderingError::NoVersions`] when the catalog is empty.
///
/// # Examples
///
/// ```
/// use go_release_json::release::catalog::{Catalog, CatalogEntry};
/// use go_release_json::release::ordering::order_releases;
/// use go_release_json::release::validation::{ValidationPolicy, validate};
/// use go_release_json::release::version::VersionRecord;
///
/// let entries = ["1.9.0", "1.21.0"]
///     .into_iter()
///     .map(|v| CatalogEntry::new(VersionRecord::parse(v).expect("valid"), Vec::new()))
///     .collect();
/// let validated = validate(Catalog::new(entries), &ValidationPolicy::default()).expect("valid");
/// let ordered = order_releases(validated).expect("non-empty");
/// assert_eq!(ordered.latest().version(), "1.21.0");
/// ```
pub fn order_releases(validated: ValidatedCatalog) -> Result<OrderedReleases, OrderingError> {
    let mut entries = validated.into_catalog().into_entries();
    entries.sort_by(|a, b| b.record.cmp(&a.record));
    let mut newest_first = entries.into_iter();
    let latest = newest_first.next().ok_or(OrderingError::NoVersions)?;
    Ok(OrderedReleases {
        latest,
        older: newest_first.collect(),
    })
}
