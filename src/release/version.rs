//! Version identifiers for release sections.
//!
//! Release sections on the downloads page carry an `id` such as `go1.21.1`.
//! The prefix marks the section as a release; the remainder is parsed with
//! tolerant semantic-version rules so that tokens like `1.20`, `1.021` or
//! `1.21rc2` still yield a comparable [`semver::Version`].

use semver::{BuildMetadata, Prerelease, Version};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

/// Maximum number of dot-separated numeric components in a version core.
const MAX_CORE_COMPONENTS: usize = 3;

/// Errors arising from tolerant version parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionParseError {
    /// The token is empty once the prefix and whitespace are removed.
    #[error("version token is empty")]
    Empty,

    /// A numeric component of the version core is missing or not a number.
    #[error("version component \"{component}\" is not a number")]
    InvalidComponent {
        /// The rejected component text.
        component: String,
    },

    /// The version core has more than three numeric components.
    #[error("version core has {count} components; at most 3 are allowed")]
    TooManyComponents {
        /// Number of components found.
        count: usize,
    },

    /// The pre-release or build suffix is not valid semantic-version syntax.
    #[error("invalid version suffix \"{suffix}\": {reason}")]
    InvalidSuffix {
        /// The rejected suffix text.
        suffix: String,
        /// Description of the failure reported by the semver parser.
        reason: String,
    },
}

/// Outcome of inspecting one section identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionId {
    /// The identifier does not carry the release prefix and is ignored.
    NotARelease,
    /// The identifier names a release with a parseable version.
    Release(VersionRecord),
    /// The identifier carries the release prefix but the version is malformed.
    Malformed(VersionParseError),
}

/// The parsed identity of one release.
///
/// `display` is the token exactly as it appears after the prefix and is the
/// unique key of the release. `parsed` exists only for ordering.
///
/// # Examples
///
/// ```
/// use go_release_json::release::version::VersionRecord;
///
/// let newer = VersionRecord::parse("1.21.0").expect("valid version");
/// let older = VersionRecord::parse("1.9.0").expect("valid version");
/// assert!(newer > older);
/// assert_eq!(newer.display(), "1.21.0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionRecord {
    display: String,
    parsed: Version,
}

impl VersionRecord {
    /// Parse a display token into a version record.
    ///
    /// # Errors
    ///
    /// Returns [`VersionParseError`] when the token cannot be read as a
    /// version even under tolerant rules.
    pub fn parse(display: &str) -> Result<Self, VersionParseError> {
        let parsed = parse_tolerant(display)?;
        Ok(Self {
            display: display.to_owned(),
            parsed,
        })
    }

    /// Inspect a section identifier using the given release prefix.
    ///
    /// # Examples
    ///
    /// ```
    /// use go_release_json::release::version::{SectionId, VersionRecord};
    ///
    /// let id = VersionRecord::from_section_id("go1.20", "go");
    /// assert!(matches!(id, SectionId::Release(record) if record.display() == "1.20"));
    /// assert_eq!(VersionRecord::from_section_id("featured", "go"), SectionId::NotARelease);
    /// ```
    #[must_use]
    pub fn from_section_id(id: &str, prefix: &str) -> SectionId {
        let Some(token) = id.strip_prefix(prefix) else {
            return SectionId::NotARelease;
        };
        match Self::parse(token) {
            Ok(record) => SectionId::Release(record),
            Err(err) => SectionId::Malformed(err),
        }
    }

    /// Return the display token.
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Return the semantic version used for ordering.
    #[must_use]
    pub fn parsed(&self) -> &Version {
        &self.parsed
    }
}

impl Ord for VersionRecord {
    /// Orders by semantic version; distinct tokens that parse to the same
    /// version fall back to comparing the tokens themselves.
    fn cmp(&self, other: &Self) -> Ordering {
        self.parsed
            .cmp(&other.parsed)
            .then_with(|| self.display.cmp(&other.display))
    }
}

impl PartialOrd for VersionRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for VersionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display)
    }
}

/// Parse a version token, accepting common deviations from strict semver.
///
/// Accepted deviations: surrounding whitespace, a leading `v`, leading zeros,
/// missing minor or patch components, and a pre-release suffix glued to the
/// core without a hyphen. A glued suffix of letters followed by digits is
/// split into two identifiers so the number compares numerically
/// (`1.21rc2` reads as `1.21.0-rc.2`, and sorts below `1.21rc10`).
///
/// # Errors
///
/// Returns [`VersionParseError`] when no plausible reading exists.
///
/// # Examples
///
/// ```
/// use go_release_json::release::version::parse_tolerant;
///
/// assert_eq!(parse_tolerant("1.20").expect("valid").to_string(), "1.20.0");
/// assert_eq!(parse_tolerant("1.21rc2").expect("valid").to_string(), "1.21.0-rc.2");
/// assert!(parse_tolerant("banana").is_err());
/// ```
pub fn parse_tolerant(token: &str) -> Result<Version, VersionParseError> {
    let trimmed = token.trim();
    let unprefixed = trimmed.strip_prefix('v').unwrap_or(trimmed);
    if unprefixed.is_empty() {
        return Err(VersionParseError::Empty);
    }

    let core_end = unprefixed
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(unprefixed.len());
    let (core, suffix) = unprefixed.split_at(core_end);
    let [major, minor, patch] = parse_core(core.trim_end_matches('.'), unprefixed)?;

    let mut version = Version::new(major, minor, patch);
    let (pre, build) = split_suffix(suffix);
    if !pre.is_empty() {
        let glued = !suffix.starts_with(['-', '+']);
        let pre = if glued {
            split_glued_prerelease(pre)
        } else {
            pre.to_owned()
        };
        version.pre = Prerelease::new(&pre).map_err(|err| invalid_suffix(suffix, &err))?;
    }
    if !build.is_empty() {
        version.build = BuildMetadata::new(build).map_err(|err| invalid_suffix(suffix, &err))?;
    }
    Ok(version)
}

/// Parse up to three dot-separated numbers, padding missing ones with zero.
fn parse_core(core: &str, token: &str) -> Result<[u64; 3], VersionParseError> {
    if core.is_empty() {
        return Err(VersionParseError::InvalidComponent {
            component: token.to_owned(),
        });
    }
    let components: Vec<&str> = core.split('.').collect();
    if components.len() > MAX_CORE_COMPONENTS {
        return Err(VersionParseError::TooManyComponents {
            count: components.len(),
        });
    }

    let mut numbers = [0_u64; 3];
    for (slot, component) in numbers.iter_mut().zip(&components) {
        *slot = component
            .parse::<u64>()
            .map_err(|_| VersionParseError::InvalidComponent {
                component: (*component).to_owned(),
            })?;
    }
    Ok(numbers)
}

/// Split a suffix into pre-release and build parts.
///
/// A suffix may start with `-` (strict pre-release), `+` (build metadata),
/// or directly with the pre-release identifier as Go tokens do.
fn split_suffix(suffix: &str) -> (&str, &str) {
    let without_dash = suffix.strip_prefix('-').unwrap_or(suffix);
    match without_dash.split_once('+') {
        Some((pre, build)) => (pre, build),
        None => (without_dash, ""),
    }
}

/// Separate Go's `rc10` into `rc.10`; other identifiers pass through.
fn split_glued_prerelease(pre: &str) -> String {
    let digits_start = pre
        .rfind(|c: char| !c.is_ascii_digit())
        .map_or(0, |index| index + 1);
    let (label, number) = pre.split_at(digits_start);
    if !label.is_empty() && !number.is_empty() && label.chars().all(|c| c.is_ascii_alphabetic()) {
        format!("{label}.{number}")
    } else {
        pre.to_owned()
    }
}

fn invalid_suffix(suffix: &str, err: &semver::Error) -> VersionParseError {
    VersionParseError::InvalidSuffix {
        suffix: suffix.to_owned(),
        reason: err.to_string(),
    }
}
