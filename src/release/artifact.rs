//! The artifact record and its published JSON form.

use serde::{Deserialize, Serialize};

/// One downloadable file belonging to a release.
///
/// Field names on the wire are `version`, `link`, `kind`, `os`, `arch`,
/// `size`, `sha256` and `sha1`. Checksum fields are omitted when absent.
///
/// # Examples
///
/// ```
/// use go_release_json::release::artifact::Artifact;
///
/// let artifact = Artifact {
///     version: "1.21.1".to_owned(),
///     link: "/dl/go1.21.1.src.tar.gz".to_owned(),
///     kind: "Source".to_owned(),
///     sha256: Some("a".repeat(64)),
///     ..Artifact::default()
/// };
/// let json = serde_json::to_string(&artifact).expect("serialisable");
/// assert!(json.contains(r#""kind":"Source""#));
/// assert!(!json.contains("sha1"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Display version of the owning release.
    pub version: String,
    /// Download URL, absolute or relative to the page.
    pub link: String,
    /// Kind label as shown on the page.
    pub kind: String,
    /// Operating system label.
    pub os: String,
    /// Architecture label.
    pub arch: String,
    /// Human-readable size.
    pub size: String,
    /// SHA-256 digest, hex-encoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
    /// SHA-1 digest, hex-encoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha1: Option<String>,
    /// Checksum cell text that matched neither digest length.
    ///
    /// Kept for validation under a rejecting checksum policy; never
    /// published.
    #[serde(skip)]
    pub unrecognised_checksum: Option<String>,
}

impl Artifact {
    /// Whether at least one checksum field is populated.
    #[must_use]
    pub fn has_checksum(&self) -> bool {
        self.sha256.is_some() || self.sha1.is_some()
    }
}
