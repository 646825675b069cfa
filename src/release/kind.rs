//! Recognised artifact kinds.
//!
//! The downloads page labels every file with a kind. Only the kinds listed
//! here are accepted; anything else means the page format changed and the
//! run must stop before publishing.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a kind label is outside the recognised set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown artifact kind \"{value}\"; expected one of: {expected}")]
pub struct UnknownKind {
    /// The rejected label.
    pub value: String,
    /// Comma-separated list of accepted labels.
    pub expected: String,
}

/// Category of a downloadable file.
///
/// # Examples
///
/// ```
/// use go_release_json::release::kind::ArtifactKind;
///
/// let kind: ArtifactKind = "Archive".parse().expect("known kind");
/// assert_eq!(kind, ArtifactKind::Archive);
/// assert!("Unknown".parse::<ArtifactKind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// A source tarball.
    Source,
    /// A platform installer package.
    Installer,
    /// A binary archive.
    Archive,
}

impl ArtifactKind {
    /// All recognised kinds, in the order the page usually lists them.
    pub const ALL: [Self; 3] = [Self::Source, Self::Archive, Self::Installer];

    /// Return the label used on the page and in published JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Source => "Source",
            Self::Installer => "Installer",
            Self::Archive => "Archive",
        }
    }

    fn expected_labels() -> String {
        Self::ALL
            .iter()
            .map(|kind| kind.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for ArtifactKind {
    type Err = UnknownKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| UnknownKind {
                value: value.to_owned(),
                expected: Self::expected_labels(),
            })
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
