//! Wiring of the publishing stages.
//!
//! [`build_publication`] is the pure part of a run: page bytes in, rendered
//! model out. [`run`] adds the collaborators, reading the page from a
//! [`PageSource`] and writing the documents unless the run is a dry run.

use crate::config::Settings;
use crate::error::Result;
use crate::fetch::PageSource;
use crate::publish::{PlannedFile, plan, write_documents};
use crate::release::extraction::{VersionDiagnostic, extract};
use crate::release::markup::Markup;
use crate::release::ordering::order_releases;
use crate::release::publication::Publication;
use crate::release::validation::validate;
use log::info;

/// Publication model together with the sections skipped on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutcome {
    /// The model to publish.
    pub publication: Publication,
    /// Sections skipped because their version could not be parsed.
    pub diagnostics: Vec<VersionDiagnostic>,
}

/// Whether a run writes its documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunMode {
    /// Write every document under the output directory.
    #[default]
    Write,
    /// Render every document but leave the filesystem untouched.
    DryRun,
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// The newest release.
    pub latest: String,
    /// Number of releases published.
    pub release_count: usize,
    /// Files written, or that would be written in a dry run.
    pub files: Vec<PlannedFile>,
    /// Sections skipped because their version could not be parsed.
    pub diagnostics: Vec<VersionDiagnostic>,
    /// How the run was performed.
    pub mode: RunMode,
}

/// Turn page bytes into the publication model.
///
/// Nothing is returned unless every artifact on the page is valid.
///
/// # Errors
///
/// Returns the first markup, extraction, validation or ordering failure.
///
/// # Examples
///
/// ```
/// use go_release_json::config::Config;
/// use go_release_json::pipeline::build_publication;
///
/// let settings = Config::default().resolve()?;
/// let page = br#"<div class="toggle" id="go1.20"></div>"#;
/// let outcome = build_publication(page, &settings)?;
/// assert_eq!(outcome.publication.latest().version, "1.20");
/// # Ok::<(), go_release_json::error::PipelineError>(())
/// ```
pub fn build_publication(page: &[u8], settings: &Settings) -> Result<PipelineOutcome> {
    let markup = Markup::parse(page)?;
    let extraction = extract(&markup, &settings.layout)?;
    info!(
        "found {} release(s) with {} artifact(s)",
        extraction.catalog.len(),
        extraction.catalog.artifact_count()
    );
    let validated = validate(extraction.catalog, &settings.validation_policy())?;
    let ordered = order_releases(validated)?;
    info!("latest release is {}", ordered.latest().version());
    Ok(PipelineOutcome {
        publication: Publication::build(&ordered, &settings.link_prefix),
        diagnostics: extraction.diagnostics,
    })
}

/// Perform a full run: fetch, build, render and publish.
///
/// Every document is rendered before the first one is written.
///
/// # Errors
///
/// Returns the first failure of any stage.
pub fn run(source: &dyn PageSource, settings: &Settings, mode: RunMode) -> Result<RunReport> {
    info!("reading downloads page from {}", source.describe());
    let page = source.fetch()?;
    let outcome = build_publication(&page, settings)?;
    let documents = outcome.publication.render()?;
    let files = plan(&settings.output_dir, &documents);
    if mode == RunMode::Write {
        write_documents(&settings.output_dir, &documents)?;
        info!(
            "published {} file(s) under {}",
            documents.len(),
            settings.output_dir
        );
    }
    Ok(RunReport {
        latest: outcome.publication.latest().version.clone(),
        release_count: outcome.publication.releases().len(),
        files,
        diagnostics: outcome.diagnostics,
        mode,
    })
}
