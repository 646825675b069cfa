//! Run configuration loaded from an optional TOML file.
//!
//! [`Config`] mirrors the file format: every key is optional and unknown keys
//! are rejected, so a typo never silently falls back to a default. Command
//! line flags are applied on top of it before [`Config::resolve`] turns the
//! result into validated [`Settings`].

use crate::release::checksum::ChecksumPolicy;
use crate::release::extraction::PageLayout;
use crate::release::validation::ValidationPolicy;
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Default directory receiving the published documents.
pub const DEFAULT_OUTPUT_DIR: &str = "docs/api";
/// Default location of the downloads page.
pub const DEFAULT_SOURCE_URL: &str = "https://golang.org/dl/";
/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors raised while loading or resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file {path}: {source}")]
    Read {
        /// Path of the configuration file.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid.
    #[error("invalid configuration file {path}: {reason}")]
    Parse {
        /// Path of the configuration file.
        path: Utf8PathBuf,
        /// Description of the parse error.
        reason: String,
    },

    /// The source URL is not an absolute URL.
    #[error("invalid source URL \"{url}\": {reason}")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
        /// Description of the parse error.
        reason: String,
    },

    /// The request timeout is zero.
    #[error("timeout_secs must be greater than zero")]
    ZeroTimeout,
}

/// Configuration as written in the TOML file.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use go_release_json::config::Config;
///
/// let text = "output_dir = \"public/api\"\n";
/// let config = Config::from_toml_str(text, Utf8Path::new("release.toml"))?;
/// assert_eq!(config.output_dir.as_str(), "public/api");
/// assert_eq!(config.timeout_secs, 30);
/// # Ok::<(), go_release_json::config::ConfigError>(())
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory receiving the published documents.
    pub output_dir: Utf8PathBuf,
    /// Location of the downloads page. Relative download links are resolved
    /// against it when they are validated.
    pub source_url: String,
    /// Prefix of the links in the version index. Derived from `output_dir`
    /// when absent.
    pub link_prefix: Option<String>,
    /// Timeout for the page request, in seconds.
    pub timeout_secs: u64,
    /// Handling of checksum text of unrecognised length.
    pub checksum_policy: ChecksumPolicy,
    /// Structure of the downloads page.
    pub layout: PageLayout,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: Utf8PathBuf::from(DEFAULT_OUTPUT_DIR),
            source_url: DEFAULT_SOURCE_URL.to_owned(),
            link_prefix: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            checksum_policy: ChecksumPolicy::default(),
            layout: PageLayout::default(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, or return the defaults when no path
    /// is given.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed.
    pub fn load(path: Option<&Utf8Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// Parse configuration text, naming `path` in any error.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys.
    pub fn from_toml_str(text: &str, path: &Utf8Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|err: toml::de::Error| ConfigError::Parse {
            path: path.to_owned(),
            reason: err.message().to_owned(),
        })
    }

    /// Validate the configuration and derive the values used by a run.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the source URL is not absolute or the
    /// timeout is zero.
    pub fn resolve(self) -> Result<Settings, ConfigError> {
        let source_url = Url::parse(&self.source_url).map_err(|err| ConfigError::InvalidUrl {
            url: self.source_url.clone(),
            reason: err.to_string(),
        })?;
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        let link_prefix = self
            .link_prefix
            .unwrap_or_else(|| default_link_prefix(&self.output_dir));
        Ok(Settings {
            output_dir: self.output_dir,
            source_url,
            link_prefix,
            timeout: Duration::from_secs(self.timeout_secs),
            checksum_policy: self.checksum_policy,
            layout: self.layout,
        })
    }
}

/// Derive the index link prefix from the output directory.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use go_release_json::config::default_link_prefix;
///
/// assert_eq!(default_link_prefix(Utf8Path::new("docs/api")), "/docs/api");
/// assert_eq!(default_link_prefix(Utf8Path::new("./out/")), "/out");
/// ```
#[must_use]
pub fn default_link_prefix(output_dir: &Utf8Path) -> String {
    let text = output_dir.as_str();
    let trimmed = text.strip_prefix("./").unwrap_or(text).trim_matches('/');
    if trimmed == "." {
        "/".to_owned()
    } else {
        format!("/{trimmed}")
    }
}

/// Validated values for one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Directory receiving the published documents.
    pub output_dir: Utf8PathBuf,
    /// Location of the downloads page.
    pub source_url: Url,
    /// Prefix of the links in the version index.
    pub link_prefix: String,
    /// Timeout for the page request.
    pub timeout: Duration,
    /// Handling of checksum text of unrecognised length.
    pub checksum_policy: ChecksumPolicy,
    /// Structure of the downloads page.
    pub layout: PageLayout,
}

impl Settings {
    /// Return the validation rules for this run.
    #[must_use]
    pub fn validation_policy(&self) -> ValidationPolicy {
        ValidationPolicy::new(self.checksum_policy, Some(self.source_url.clone()))
    }
}
