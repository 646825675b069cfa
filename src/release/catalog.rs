//! The extracted mapping from release versions to their artifacts.

use super::artifact::Artifact;
use super::version::VersionRecord;

/// One release together with its artifacts in row order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Identity of the release.
    pub record: VersionRecord,
    /// Artifacts in the order their rows appear on the page.
    pub artifacts: Vec<Artifact>,
}

impl CatalogEntry {
    /// Create an entry from a version record and its artifacts.
    #[must_use]
    pub fn new(record: VersionRecord, artifacts: Vec<Artifact>) -> Self {
        Self { record, artifacts }
    }

    /// Return the display version of the release.
    #[must_use]
    pub fn version(&self) -> &str {
        self.record.display()
    }
}

/// All releases found on the page, in discovery order.
///
/// Each display version appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Create a catalog from entries with unique display versions.
    #[must_use]
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Return the entries in discovery order.
    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Consume the catalog and return its entries.
    #[must_use]
    pub fn into_entries(self) -> Vec<CatalogEntry> {
        self.entries
    }

    /// Look up the artifacts of a release by display version.
    #[must_use]
    pub fn artifacts_for(&self, version: &str) -> Option<&[Artifact]> {
        self.entries
            .iter()
            .find(|entry| entry.version() == version)
            .map(|entry| entry.artifacts.as_slice())
    }

    /// Return the number of releases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no releases were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the total number of artifacts across all releases.
    #[must_use]
    pub fn artifact_count(&self) -> usize {
        self.entries.iter().map(|entry| entry.artifacts.len()).sum()
    }
}
