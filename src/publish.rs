//! Writing rendered documents under the output directory.
//!
//! A run is staged before anything becomes visible: every document is first
//! written to a temporary file beside its destination. Only once all of them
//! are staged are they renamed over their destinations, in document order.
//! A failure while staging removes the temporary files and any directories
//! the run created, leaving the previous output untouched.

use crate::release::publication::Document;
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;
use thiserror::Error;

/// Prefix of the temporary files created while writing.
const TEMP_PREFIX: &str = ".go-release-json";

/// Errors raised while writing output files.
#[derive(Debug, Error)]
pub enum PublishError {
    /// A directory could not be created.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        /// The directory that could not be created.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A file could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        /// The destination file.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// A file that would be written, as reported by a dry run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    /// Destination path.
    pub path: Utf8PathBuf,
    /// Size of the contents in bytes.
    pub size: usize,
}

/// List the files [`write_documents`] would produce, without touching disk.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use go_release_json::publish::plan;
///
/// assert!(plan(Utf8Path::new("docs/api"), &[]).is_empty());
/// ```
#[must_use]
pub fn plan(root: &Utf8Path, documents: &[Document]) -> Vec<PlannedFile> {
    documents
        .iter()
        .map(|document| PlannedFile {
            path: root.join(&document.path),
            size: document.contents.len(),
        })
        .collect()
}

/// Write every document under `root`, creating directories as needed.
///
/// Nothing is replaced until every document has been staged, so a failure
/// to create a directory or write a file leaves existing output as it was.
/// Returns the written paths in document order.
///
/// # Errors
///
/// Returns [`PublishError`] naming the first path that could not be created
/// or written.
pub fn write_documents(
    root: &Utf8Path,
    documents: &[Document],
) -> Result<Vec<Utf8PathBuf>, PublishError> {
    let mut staging = Staging::default();
    for document in documents {
        staging.stage(root.join(&document.path), &document.contents)?;
    }
    staging.commit()
}

/// Temporary files awaiting their final names.
///
/// Dropping a staging area deletes whatever it still holds, along with the
/// directories created for it.
#[derive(Debug, Default)]
struct Staging {
    files: Vec<(NamedTempFile, Utf8PathBuf)>,
    created_dirs: Vec<Utf8PathBuf>,
}

impl Staging {
    fn stage(&mut self, destination: Utf8PathBuf, contents: &[u8]) -> Result<(), PublishError> {
        let parent = destination
            .parent()
            .filter(|parent| !parent.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."))
            .to_owned();
        self.create_dir(&parent)?;
        let write_failed = |source: std::io::Error| PublishError::Write {
            path: destination.clone(),
            source,
        };
        let mut file = temp_file_builder()
            .tempfile_in(&parent)
            .map_err(write_failed)?;
        file.write_all(contents).map_err(write_failed)?;
        debug!("staged {} byte(s) for {destination}", contents.len());
        self.files.push((file, destination));
        Ok(())
    }

    /// Create `dir` and its missing ancestors, remembering which were new.
    fn create_dir(&mut self, dir: &Utf8Path) -> Result<(), PublishError> {
        let missing: Vec<Utf8PathBuf> = dir
            .ancestors()
            .take_while(|ancestor| !ancestor.as_str().is_empty() && !ancestor.exists())
            .map(Utf8Path::to_path_buf)
            .collect();
        self.created_dirs.extend(missing.into_iter().rev());
        fs::create_dir_all(dir).map_err(|source| PublishError::CreateDir {
            path: dir.to_owned(),
            source,
        })
    }

    /// Rename every staged file over its destination, in staging order.
    fn commit(mut self) -> Result<Vec<Utf8PathBuf>, PublishError> {
        let files = std::mem::take(&mut self.files);
        self.created_dirs.clear();
        let mut written = Vec::with_capacity(files.len());
        for (file, destination) in files {
            file.persist(&destination)
                .map_err(|err| PublishError::Write {
                    path: destination.clone(),
                    source: err.error,
                })?;
            debug!("wrote {destination}");
            written.push(destination);
        }
        Ok(written)
    }
}

impl Drop for Staging {
    fn drop(&mut self) {
        self.files.clear();
        for dir in self.created_dirs.iter().rev() {
            if let Err(err) = fs::remove_dir(dir) {
                debug!("left directory {dir} in place: {err}");
            }
        }
    }
}

#[cfg(unix)]
fn temp_file_builder() -> tempfile::Builder<'static, 'static> {
    use std::os::unix::fs::PermissionsExt;

    let mut builder = tempfile::Builder::new();
    builder
        .prefix(TEMP_PREFIX)
        .permissions(fs::Permissions::from_mode(0o644));
    builder
}

#[cfg(not(unix))]
fn temp_file_builder() -> tempfile::Builder<'static, 'static> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(TEMP_PREFIX);
    builder
}
