//! Whole-batch validation of extracted artifacts.
//!
//! Every artifact of every release is checked before anything is published.
//! The first violation aborts the run; there is no partial success. A
//! [`ValidatedCatalog`] can only be obtained through [`validate`], so later
//! stages never see unchecked data.

use super::artifact::Artifact;
use super::catalog::{Catalog, CatalogEntry};
use super::checksum::{ChecksumPolicy, SHA1_HEX_LEN, SHA256_HEX_LEN, is_hex};
use super::kind::ArtifactKind;
use log::debug;
use thiserror::Error;
use url::Url;

/// A violated artifact invariant, naming the release and the field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The artifact's version does not match the release listing it.
    #[error("release {version} lists artifact {link} belonging to release {artifact_version}")]
    VersionMismatch {
        /// Release being validated.
        version: String,
        /// Link of the offending artifact.
        link: String,
        /// Version recorded on the artifact.
        artifact_version: String,
    },

    /// The kind is outside the recognised set.
    #[error("release {version} has an artifact ({link}) with unknown kind \"{kind}\"; expected one of: {expected}")]
    UnknownKind {
        /// Release being validated.
        version: String,
        /// Link of the offending artifact.
        link: String,
        /// The rejected kind label.
        kind: String,
        /// Comma-separated list of accepted labels.
        expected: String,
    },

    /// Checksum text of unrecognised length under a rejecting policy.
    #[error("release {version} has an artifact ({link}) with checksum \"{value}\" of unrecognised length {}", .value.chars().count())]
    UnrecognisedChecksum {
        /// Release being validated.
        version: String,
        /// Link of the offending artifact.
        link: String,
        /// The checksum text.
        value: String,
    },

    /// Neither `sha256` nor `sha1` is set.
    #[error("release {version} has an artifact ({link}) with no sha256 or sha1 checksum")]
    MissingChecksum {
        /// Release being validated.
        version: String,
        /// Link of the offending artifact.
        link: String,
    },

    /// A checksum field holds text of the wrong length.
    #[error("release {version} has an artifact ({link}) whose {field} is {actual} characters instead of {expected}")]
    ChecksumLength {
        /// Release being validated.
        version: String,
        /// Link of the offending artifact.
        link: String,
        /// Name of the checksum field.
        field: &'static str,
        /// Required length.
        expected: usize,
        /// Length found.
        actual: usize,
    },

    /// A checksum field holds non-hexadecimal characters.
    #[error("release {version} has an artifact ({link}) whose {field} \"{value}\" is not hexadecimal")]
    ChecksumNotHex {
        /// Release being validated.
        version: String,
        /// Link of the offending artifact.
        link: String,
        /// Name of the checksum field.
        field: &'static str,
        /// The checksum text.
        value: String,
    },

    /// The download link is not a well-formed URL.
    #[error("release {version} has an artifact with an unparseable link \"{link}\": {reason}")]
    UnparseableLink {
        /// Release being validated.
        version: String,
        /// The rejected link.
        link: String,
        /// Description of the parse failure.
        reason: String,
    },
}

/// Rules applied during validation.
///
/// # Examples
///
/// ```
/// use go_release_json::release::checksum::ChecksumPolicy;
/// use go_release_json::release::validation::ValidationPolicy;
///
/// let policy = ValidationPolicy::default();
/// assert_eq!(policy.checksum(), ChecksumPolicy::Drop);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationPolicy {
    checksum: ChecksumPolicy,
    link_base: Option<Url>,
}

impl ValidationPolicy {
    /// Create a policy.
    ///
    /// Relative links are resolved against `link_base` to check that they
    /// are well formed. Without a base, only absolute links are parsed and
    /// relative ones are accepted as they are.
    #[must_use]
    pub fn new(checksum: ChecksumPolicy, link_base: Option<Url>) -> Self {
        Self {
            checksum,
            link_base,
        }
    }

    /// Return the policy for unrecognised checksum text.
    #[must_use]
    pub fn checksum(&self) -> ChecksumPolicy {
        self.checksum
    }

    /// Return the base URL for relative links.
    #[must_use]
    pub fn link_base(&self) -> Option<&Url> {
        self.link_base.as_ref()
    }
}

/// A catalog whose every artifact passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCatalog(Catalog);

impl ValidatedCatalog {
    /// Return the validated catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.0
    }

    /// Consume the wrapper and return the catalog.
    #[must_use]
    pub fn into_catalog(self) -> Catalog {
        self.0
    }
}

/// Validate every artifact in the catalog.
///
/// Releases are checked in discovery order and artifacts in row order; the
/// first violation is returned.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found.
pub fn validate(
    catalog: Catalog,
    policy: &ValidationPolicy,
) -> Result<ValidatedCatalog, ValidationError> {
    for entry in catalog.entries() {
        validate_entry(entry, policy)?;
    }
    debug!(
        "validated {} artifact(s) across {} release(s)",
        catalog.artifact_count(),
        catalog.len()
    );
    Ok(ValidatedCatalog(catalog))
}

fn validate_entry(entry: &CatalogEntry, policy: &ValidationPolicy) -> Result<(), ValidationError> {
    entry
        .artifacts
        .iter()
        .try_for_each(|artifact| validate_artifact(entry.version(), artifact, policy))
}

fn validate_artifact(
    version: &str,
    artifact: &Artifact,
    policy: &ValidationPolicy,
) -> Result<(), ValidationError> {
    if artifact.version != version {
        return Err(ValidationError::VersionMismatch {
            version: version.to_owned(),
            link: artifact.link.clone(),
            artifact_version: artifact.version.clone(),
        });
    }
    if let Err(err) = artifact.kind.parse::<ArtifactKind>() {
        return Err(ValidationError::UnknownKind {
            version: version.to_owned(),
            link: artifact.link.clone(),
            kind: err.value,
            expected: err.expected,
        });
    }
    if let (ChecksumPolicy::Reject, Some(value)) =
        (policy.checksum(), &artifact.unrecognised_checksum)
    {
        return Err(ValidationError::UnrecognisedChecksum {
            version: version.to_owned(),
            link: artifact.link.clone(),
            value: value.clone(),
        });
    }
    if !artifact.has_checksum() {
        return Err(ValidationError::MissingChecksum {
            version: version.to_owned(),
            link: artifact.link.clone(),
        });
    }
    check_digest(version, artifact, "sha256", artifact.sha256.as_deref(), SHA256_HEX_LEN)?;
    check_digest(version, artifact, "sha1", artifact.sha1.as_deref(), SHA1_HEX_LEN)?;
    check_link(version, &artifact.link, policy.link_base())
}

fn check_digest(
    version: &str,
    artifact: &Artifact,
    field: &'static str,
    value: Option<&str>,
    expected: usize,
) -> Result<(), ValidationError> {
    let Some(value) = value else {
        return Ok(());
    };
    let actual = value.chars().count();
    if actual != expected {
        return Err(ValidationError::ChecksumLength {
            version: version.to_owned(),
            link: artifact.link.clone(),
            field,
            expected,
            actual,
        });
    }
    if !is_hex(value) {
        return Err(ValidationError::ChecksumNotHex {
            version: version.to_owned(),
            link: artifact.link.clone(),
            field,
            value: value.to_owned(),
        });
    }
    Ok(())
}

fn check_link(version: &str, link: &str, base: Option<&Url>) -> Result<(), ValidationError> {
    let unparseable = |reason: String| ValidationError::UnparseableLink {
        version: version.to_owned(),
        link: link.to_owned(),
        reason,
    };
    if link.trim().is_empty() {
        return Err(unparseable("link is empty".to_owned()));
    }
    match Url::options().base_url(base).parse(link) {
        Ok(_) | Err(url::ParseError::RelativeUrlWithoutBase) => Ok(()),
        Err(err) => Err(unparseable(err.to_string())),
    }
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
