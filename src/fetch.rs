//! Retrieval of the downloads page.
//!
//! The pipeline reads the page through the [`PageSource`] trait so that tests
//! can substitute a mock, and so that a saved copy of the page can be used in
//! place of the network.

use camino::Utf8PathBuf;
use log::debug;
use std::time::Duration;
use thiserror::Error;

/// Largest page body accepted from the network.
const MAX_PAGE_BYTES: u64 = 64 * 1024 * 1024;

/// Errors raised while retrieving the page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be completed.
    #[error("failed to fetch {url}: {reason}")]
    Transport {
        /// The URL that was requested.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },

    /// The server answered with a status other than 200.
    #[error("failed to fetch {url}: unexpected HTTP status {status}")]
    Status {
        /// The URL that was requested.
        url: String,
        /// The status code returned.
        status: u16,
    },

    /// A local copy of the page could not be read.
    #[error("failed to read page from {path}: {source}")]
    Read {
        /// Path of the local page.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Source of the raw downloads page.
///
/// # Examples
///
/// ```no_run
/// use go_release_json::fetch::{HttpPageSource, PageSource};
/// use std::time::Duration;
///
/// let source = HttpPageSource::new("https://golang.org/dl/", Duration::from_secs(30));
/// let page = source.fetch()?;
/// # Ok::<(), go_release_json::fetch::FetchError>(())
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait PageSource {
    /// Return the page bytes.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the page cannot be retrieved.
    fn fetch(&self) -> Result<Vec<u8>, FetchError>;

    /// Describe where the page comes from, for log messages.
    fn describe(&self) -> String;
}

/// Page source performing a single blocking HTTP GET.
pub struct HttpPageSource {
    url: String,
    agent: ureq::Agent,
}

impl HttpPageSource {
    /// Create a source for `url` whose request gives up after `timeout`.
    #[must_use]
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        Self {
            url: url.into(),
            agent: ureq::Agent::new_with_config(config),
        }
    }

    /// Return the requested URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl PageSource for HttpPageSource {
    fn fetch(&self) -> Result<Vec<u8>, FetchError> {
        let mut response = self
            .agent
            .get(&self.url)
            .call()
            .map_err(|err| map_ureq_error(&self.url, &err))?;
        let status = response.status().as_u16();
        if status != 200 {
            return Err(FetchError::Status {
                url: self.url.clone(),
                status,
            });
        }
        let body = response
            .body_mut()
            .with_config()
            .limit(MAX_PAGE_BYTES)
            .read_to_vec()
            .map_err(|err| map_ureq_error(&self.url, &err))?;
        debug!("fetched {} byte(s) from {}", body.len(), self.url);
        Ok(body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Page source reading a saved copy of the page from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePageSource {
    path: Utf8PathBuf,
}

impl FilePageSource {
    /// Create a source reading `path`.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PageSource for FilePageSource {
    fn fetch(&self) -> Result<Vec<u8>, FetchError> {
        std::fs::read(&self.path).map_err(|source| FetchError::Read {
            path: self.path.clone(),
            source,
        })
    }

    fn describe(&self) -> String {
        self.path.to_string()
    }
}

/// Map a ureq error to a [`FetchError`].
fn map_ureq_error(url: &str, err: &ureq::Error) -> FetchError {
    match err {
        ureq::Error::StatusCode(status) => FetchError::Status {
            url: url.to_owned(),
            status: *status,
        },
        other => FetchError::Transport {
            url: url.to_owned(),
            reason: other.to_string(),
        },
    }
}
