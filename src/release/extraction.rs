//! Extraction of releases and artifacts from the downloads page.
//!
//! [`extract`] walks the parsed page once and returns an immutable
//! [`Catalog`]. Release sections are found by selector and identified by
//! their `id`; artifact rows inside each section become [`Artifact`]s in row
//! order. Sections whose identifier looks like a release but does not parse
//! are reported as [`VersionDiagnostic`]s rather than failing the run.

use super::artifact::Artifact;
use super::catalog::{Catalog, CatalogEntry};
use super::checksum::Checksum;
use super::columns::ColumnLayout;
use super::markup::Markup;
use super::version::{SectionId, VersionParseError, VersionRecord};
use log::{debug, warn};
use scraper::{ElementRef, Selector};
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Errors that abort extraction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    /// A configured selector is not valid CSS.
    #[error("invalid selector \"{selector}\": {reason}")]
    InvalidSelector {
        /// The rejected selector text.
        selector: String,
        /// Description of the parse failure.
        reason: String,
    },

    /// An artifact row has no download link, so the page format changed.
    #[error("release {version} has an artifact row without a download link: {html}")]
    MissingDownloadLink {
        /// Display version of the release being scanned.
        version: String,
        /// Markup of the cell (or row) where the link was expected.
        html: String,
    },
}

/// Selectors and conventions describing the downloads page structure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageLayout {
    /// Selectors for release sections, visited in this order.
    pub section_selectors: Vec<String>,
    /// Selector for artifact rows within a section.
    pub row_selector: String,
    /// Selector for the download anchor within the link cell.
    pub link_selector: String,
    /// Class marking a table's header row.
    pub header_class: String,
    /// Prefix of section identifiers that denote releases.
    pub version_prefix: String,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            section_selectors: vec!["div.toggleVisible".to_owned(), "div.toggle".to_owned()],
            row_selector: "table.codetable tr".to_owned(),
            link_selector: "a.download".to_owned(),
            header_class: "first".to_owned(),
            version_prefix: "go".to_owned(),
        }
    }
}

/// A release section skipped because its version could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionDiagnostic {
    /// The section identifier as it appears on the page.
    pub section_id: String,
    /// Why the version could not be parsed.
    pub error: VersionParseError,
}

impl fmt::Display for VersionDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "skipped section \"{}\": unparseable version: {}",
            self.section_id, self.error
        )
    }
}

/// Result of scanning a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Releases and their artifacts.
    pub catalog: Catalog,
    /// Sections skipped for unparseable versions.
    pub diagnostics: Vec<VersionDiagnostic>,
}

/// Compiled selectors for one extraction pass.
struct Selectors {
    sections: Vec<Selector>,
    rows: Selector,
    link: Selector,
}

impl Selectors {
    fn compile(layout: &PageLayout) -> Result<Self, ExtractionError> {
        let sections = layout
            .section_selectors
            .iter()
            .map(|selector| compile(selector))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            sections,
            rows: compile(&layout.row_selector)?,
            link: compile(&layout.link_selector)?,
        })
    }
}

fn compile(selector: &str) -> Result<Selector, ExtractionError> {
    Selector::parse(selector).map_err(|err| ExtractionError::InvalidSelector {
        selector: selector.to_owned(),
        reason: err.to_string(),
    })
}

/// Scan a parsed page for releases and artifacts.
///
/// A section identifier that repeats one already seen is skipped, so each
/// release is read from the first section that names it.
///
/// # Errors
///
/// Returns [`ExtractionError`] when a selector is invalid or an artifact row
/// lacks its download link.
///
/// # Examples
///
/// ```
/// use go_release_json::release::extraction::{PageLayout, extract};
/// use go_release_json::release::markup::Markup;
///
/// let page = Markup::parse(br#"<div class="toggle" id="go1.20"></div>"#).expect("markup");
/// let extraction = extract(&page, &PageLayout::default()).expect("extraction");
/// assert_eq!(extraction.catalog.len(), 1);
/// ```
pub fn extract(markup: &Markup, layout: &PageLayout) -> Result<Extraction, ExtractionError> {
    let selectors = Selectors::compile(layout)?;
    let document = markup.document();

    let mut seen = HashSet::new();
    let mut entries = Vec::new();
    let mut diagnostics = Vec::new();

    let sections = selectors
        .sections
        .iter()
        .flat_map(|selector| document.select(selector));
    for section in sections {
        let Some(id) = section.value().id() else {
            continue;
        };
        if !seen.insert(id) {
            warn!("skipping repeated section {id}");
            continue;
        }
        match VersionRecord::from_section_id(id, &layout.version_prefix) {
            SectionId::NotARelease => {}
            SectionId::Malformed(error) => {
                let diagnostic = VersionDiagnostic {
                    section_id: id.to_owned(),
                    error,
                };
                warn!("{diagnostic}");
                diagnostics.push(diagnostic);
            }
            SectionId::Release(record) => {
                let artifacts = extract_section(section, &record, &selectors, layout)?;
                debug!("release {record}: {} artifact(s)", artifacts.len());
                entries.push(CatalogEntry::new(record, artifacts));
            }
        }
    }

    Ok(Extraction {
        catalog: Catalog::new(entries),
        diagnostics,
    })
}

/// Extract every artifact row of one release section.
fn extract_section(
    section: ElementRef<'_>,
    record: &VersionRecord,
    selectors: &Selectors,
    layout: &PageLayout,
) -> Result<Vec<Artifact>, ExtractionError> {
    let mut columns = ColumnLayout::default();
    let mut artifacts = Vec::new();
    for row in section.select(&selectors.rows) {
        if is_header_row(row, &layout.header_class) {
            if let Some(named) = ColumnLayout::from_labels(&header_labels(row)) {
                columns = named;
            }
            continue;
        }
        artifacts.push(extract_row(row, record, columns, &selectors.link)?);
    }
    Ok(artifacts)
}

fn is_header_row(row: ElementRef<'_>, header_class: &str) -> bool {
    row.value().classes().any(|class| class == header_class)
}

/// Labels of a header row, preferring `th` cells over `td` cells.
fn header_labels(row: ElementRef<'_>) -> Vec<String> {
    let headers = cells(row, "th");
    let labelled = if headers.is_empty() {
        cells(row, "td")
    } else {
        headers
    };
    labelled.into_iter().map(cell_text).collect()
}

/// Direct child elements of `row` with the given tag name.
fn cells<'a>(row: ElementRef<'a>, name: &str) -> Vec<ElementRef<'a>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| cell.value().name() == name)
        .collect()
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_owned()
}

/// Build one artifact from a data row.
fn extract_row(
    row: ElementRef<'_>,
    record: &VersionRecord,
    columns: ColumnLayout,
    link_selector: &Selector,
) -> Result<Artifact, ExtractionError> {
    let data = cells(row, "td");
    let text_at = |index: usize| data.get(index).copied().map(cell_text).unwrap_or_default();

    let link_cell = data.get(columns.link).copied();
    let link = link_cell
        .and_then(|cell| cell.select(link_selector).next())
        .and_then(|anchor| anchor.value().attr("href"))
        .ok_or_else(|| ExtractionError::MissingDownloadLink {
            version: record.display().to_owned(),
            html: link_cell.map_or_else(|| row.html(), |cell| cell.html()),
        })?;

    let mut artifact = Artifact {
        version: record.display().to_owned(),
        link: link.to_owned(),
        kind: text_at(columns.kind),
        os: text_at(columns.os),
        arch: text_at(columns.arch),
        size: text_at(columns.size),
        ..Artifact::default()
    };
    match Checksum::classify(&text_at(columns.checksum)) {
        Checksum::Absent => {}
        Checksum::Sha256(digest) => artifact.sha256 = Some(digest),
        Checksum::Sha1(digest) => artifact.sha1 = Some(digest),
        Checksum::Unrecognised(text) => {
            warn!(
                "release {record}: checksum \"{text}\" for {link} has unrecognised length {}",
                text.chars().count()
            );
            artifact.unrecognised_checksum = Some(text);
        }
    }
    Ok(artifact)
}

#[cfg(test)]
#[path = "extraction_tests.rs"]
mod tests;
