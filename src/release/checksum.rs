//! Checksum cell classification and policy.
//!
//! The checksum column does not say which algorithm produced it. The text
//! length decides: 64 characters is a SHA-256 digest, 40 characters is a
//! SHA-1 digest, and any other text is unrecognised.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Length of a hex-encoded SHA-256 digest.
pub const SHA256_HEX_LEN: usize = 64;

/// Length of a hex-encoded SHA-1 digest.
pub const SHA1_HEX_LEN: usize = 40;

/// The reading of one checksum cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Checksum {
    /// The cell is empty.
    Absent,
    /// Text of SHA-256 length.
    Sha256(String),
    /// Text of SHA-1 length.
    Sha1(String),
    /// Text of any other length.
    Unrecognised(String),
}

impl Checksum {
    /// Classify checksum text by its length in characters.
    ///
    /// # Examples
    ///
    /// ```
    /// use go_release_json::release::checksum::Checksum;
    ///
    /// let digest = "a".repeat(64);
    /// assert_eq!(Checksum::classify(&digest), Checksum::Sha256(digest.clone()));
    /// assert_eq!(Checksum::classify(""), Checksum::Absent);
    /// ```
    #[must_use]
    pub fn classify(text: &str) -> Self {
        match text.chars().count() {
            0 => Self::Absent,
            SHA256_HEX_LEN => Self::Sha256(text.to_owned()),
            SHA1_HEX_LEN => Self::Sha1(text.to_owned()),
            _ => Self::Unrecognised(text.to_owned()),
        }
    }
}

/// Whether `value` consists solely of ASCII hex digits.
#[must_use]
pub fn is_hex(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_hexdigit())
}

/// What to do with checksum text of unrecognised length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecksumPolicy {
    /// Drop the text with a warning; the artifact still needs another checksum.
    #[default]
    Drop,
    /// Treat the text as a validation failure.
    Reject,
}

/// Error returned when parsing an unknown policy name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown checksum policy \"{0}\"; expected \"drop\" or \"reject\"")]
pub struct UnknownPolicy(pub String);

impl FromStr for ChecksumPolicy {
    type Err = UnknownPolicy;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "drop" => Ok(Self::Drop),
            "reject" => Ok(Self::Reject),
            other => Err(UnknownPolicy(other.to_owned())),
        }
    }
}

impl fmt::Display for ChecksumPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Drop => write!(f, "drop"),
            Self::Reject => write!(f, "reject"),
        }
    }
}
