//! Top-level error type for a publishing run.
//!
//! Each stage reports its own error type; [`PipelineError`] gathers them so
//! the binary can print a single line and exit with a failure status.

use crate::config::ConfigError;
use crate::fetch::FetchError;
use crate::publish::PublishError;
use crate::release::extraction::ExtractionError;
use crate::release::markup::MarkupError;
use crate::release::ordering::OrderingError;
use crate::release::validation::ValidationError;
use thiserror::Error;

/// Errors that abort a publishing run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Configuration could not be loaded or resolved.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The downloads page could not be retrieved.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The downloads page is not usable markup.
    #[error("unusable downloads page: {0}")]
    Markup(#[from] MarkupError),

    /// Releases could not be extracted from the page.
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// An extracted artifact violates the published schema.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// No release could be selected as the latest.
    #[error(transparent)]
    Ordering(#[from] OrderingError),

    /// A document could not be serialised.
    #[error("failed to render documents: {0}")]
    Render(#[from] serde_json::Error),

    /// A document could not be written.
    #[error(transparent)]
    Publish(#[from] PublishError),
}

/// Convenience alias for results of a publishing run.
pub type Result<T> = std::result::Result<T, PipelineError>;
