//! Publication model for the static release API.
//!
//! [`Publication::build`] projects ordered, validated releases into the set
//! of documents consumers read:
//!
//! - `latest_version.txt`: the newest version string;
//! - `latest_release.json`: the newest release bundle;
//! - `versions/<version>/artifacts.json`: one bundle per release;
//! - `all_versions.json`: newest-first index linking to each bundle;
//! - `all_versions.txt`: newest-first version strings, one per line.
//!
//! Rendering returns bytes and relative paths; writing them is left to the
//! caller.

use super::artifact::Artifact;
use super::catalog::CatalogEntry;
use super::ordering::OrderedReleases;
use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// File holding the newest version string.
pub const LATEST_VERSION_FILE: &str = "latest_version.txt";
/// File holding the newest release bundle.
pub const LATEST_RELEASE_FILE: &str = "latest_release.json";
/// File holding the version index as JSON.
pub const ALL_VERSIONS_JSON_FILE: &str = "all_versions.json";
/// File holding the version index as text.
pub const ALL_VERSIONS_TEXT_FILE: &str = "all_versions.txt";
/// Directory holding one subdirectory per release.
pub const VERSIONS_DIR: &str = "versions";
/// File name of each per-release bundle.
pub const RELEASE_FILE: &str = "artifacts.json";

/// One release with all of its artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseBundle {
    /// Artifacts in page row order.
    pub artifacts: Vec<Artifact>,
    /// Display version of the release.
    pub version: String,
}

impl From<&CatalogEntry> for ReleaseBundle {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            artifacts: entry.artifacts.clone(),
            version: entry.version().to_owned(),
        }
    }
}

/// Index entry pointing at a release bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionIndexEntry {
    /// Display version of the release.
    pub version: String,
    /// Path of the release's published bundle.
    pub link: String,
}

/// Newest-first index of every release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionIndex {
    /// Index entries, newest first.
    pub versions: Vec<VersionIndexEntry>,
}

/// A rendered output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Path relative to the output root.
    pub path: Utf8PathBuf,
    /// File contents.
    pub contents: Vec<u8>,
}

impl Document {
    fn text(path: impl Into<Utf8PathBuf>, contents: String) -> Self {
        Self {
            path: path.into(),
            contents: contents.into_bytes(),
        }
    }

    fn json<T: Serialize>(path: impl Into<Utf8PathBuf>, value: &T) -> serde_json::Result<Self> {
        Ok(Self {
            path: path.into(),
            contents: serde_json::to_vec(value)?,
        })
    }
}

/// Relative path of a release's bundle under the output root.
///
/// # Examples
///
/// ```
/// use go_release_json::release::publication::release_path;
///
/// assert_eq!(release_path("1.21.1").as_str(), "versions/1.21.1/artifacts.json");
/// ```
#[must_use]
pub fn release_path(version: &str) -> Utf8PathBuf {
    [VERSIONS_DIR, version, RELEASE_FILE].iter().collect()
}

/// Link to a release's bundle as listed in the index.
///
/// The prefix is joined to the bundle path with a single slash.
#[must_use]
pub fn release_link(prefix: &str, version: &str) -> String {
    let trimmed = prefix.trim_end_matches('/');
    format!("{trimmed}/{VERSIONS_DIR}/{version}/{RELEASE_FILE}")
}

/// Everything to publish for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publication {
    latest: ReleaseBundle,
    releases: Vec<ReleaseBundle>,
    index: VersionIndex,
    versions: Vec<String>,
}

impl Publication {
    /// Project ordered releases into the publication model.
    ///
    /// `link_prefix` is the path prefix of index links (for example
    /// `/docs/api`).
    #[must_use]
    pub fn build(releases: &OrderedReleases, link_prefix: &str) -> Self {
        let bundles: Vec<ReleaseBundle> = releases.iter().map(ReleaseBundle::from).collect();
        let index = VersionIndex {
            versions: bundles
                .iter()
                .map(|bundle| VersionIndexEntry {
                    version: bundle.version.clone(),
                    link: release_link(link_prefix, &bundle.version),
                })
                .collect(),
        };
        Self {
            latest: ReleaseBundle::from(releases.latest()),
            versions: bundles.iter().map(|bundle| bundle.version.clone()).collect(),
            releases: bundles,
            index,
        }
    }

    /// Return the newest release bundle.
    #[must_use]
    pub fn latest(&self) -> &ReleaseBundle {
        &self.latest
    }

    /// Return every release bundle, newest first.
    #[must_use]
    pub fn releases(&self) -> &[ReleaseBundle] {
        &self.releases
    }

    /// Return the version index.
    #[must_use]
    pub fn index(&self) -> &VersionIndex {
        &self.index
    }

    /// Return the version strings, newest first.
    #[must_use]
    pub fn versions(&self) -> &[String] {
        &self.versions
    }

    /// Render every output document.
    ///
    /// Documents are returned in a fixed order: each release bundle newest
    /// first, then both indices, then the latest release and version. Every
    /// document only refers to documents that precede it.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if a document cannot be serialised.
    pub fn render(&self) -> serde_json::Result<Vec<Document>> {
        let mut documents = Vec::with_capacity(self.releases.len() + 4);
        for bundle in &self.releases {
            documents.push(Document::json(release_path(&bundle.version), bundle)?);
        }
        documents.push(Document::json(ALL_VERSIONS_JSON_FILE, &self.index)?);
        documents.push(Document::text(
            ALL_VERSIONS_TEXT_FILE,
            self.versions.join("\n"),
        ));
        documents.push(Document::json(LATEST_RELEASE_FILE, &self.latest)?);
        documents.push(Document::text(
            LATEST_VERSION_FILE,
            self.latest.version.clone(),
        ));
        Ok(documents)
    }
}

#[cfg(test)]
#[path = "publication_tests.rs"]
mod tests;
