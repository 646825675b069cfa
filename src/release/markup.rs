//! Decoding of the raw downloads page into a parsed document.

use scraper::Html;
use thiserror::Error;

/// Errors raised when the page cannot be treated as markup at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    /// The page bytes are not valid UTF-8.
    #[error("page is not valid UTF-8 (invalid byte sequence at offset {offset})")]
    NotUtf8 {
        /// Byte offset of the first invalid sequence.
        offset: usize,
    },

    /// The page is empty or contains only whitespace.
    #[error("page is empty")]
    Empty,
}

/// A parsed downloads page.
///
/// Parsing recovers from malformed tags the way browsers do, so only pages
/// that are not text at all are rejected.
///
/// # Examples
///
/// ```
/// use go_release_json::release::markup::Markup;
///
/// assert!(Markup::parse(b"<html><body></body></html>").is_ok());
/// assert!(Markup::parse(b"   ").is_err());
/// ```
#[derive(Debug)]
pub struct Markup {
    document: Html,
}

impl Markup {
    /// Decode and parse page bytes.
    ///
    /// # Errors
    ///
    /// Returns [`MarkupError`] when the bytes are not UTF-8 or carry no
    /// content.
    pub fn parse(bytes: &[u8]) -> Result<Self, MarkupError> {
        let text = std::str::from_utf8(bytes).map_err(|err| MarkupError::NotUtf8 {
            offset: err.valid_up_to(),
        })?;
        if text.trim().is_empty() {
            return Err(MarkupError::Empty);
        }
        Ok(Self {
            document: Html::parse_document(text),
        })
    }

    /// Return the parsed document tree.
    #[must_use]
    pub fn document(&self) -> &Html {
        &self.document
    }
}
