//! Test support utilities for behavioural and integration tests.
//!
//! Provides builders for downloads-page markup in the shape the publisher
//! reads, plus helpers for running the pipeline against a temporary output
//! directory.

use camino::Utf8PathBuf;
use go_release_json::config::{Config, Settings};
use tempfile::TempDir;

/// A 64-character SHA-256 digest.
pub const SHA256: &str = "bfa36bf75e9a1e9cbbdb9abcf9d1707e479bd3a07880a8ae3564caee5711cb99";

/// A 40-character SHA-1 digest.
pub const SHA1: &str = "0123456789abcdef0123456789abcdef01234567";

/// One artifact row of a download table.
#[derive(Debug, Clone)]
pub struct Row {
    /// Download link.
    pub href: String,
    /// Kind cell text.
    pub kind: String,
    /// OS cell text.
    pub os: String,
    /// Arch cell text.
    pub arch: String,
    /// Size cell text.
    pub size: String,
    /// Checksum cell text.
    pub checksum: String,
}

impl Row {
    /// Row for an artifact of `version` with the given kind and checksum.
    pub fn new(version: &str, kind: &str, checksum: &str) -> Self {
        Self {
            href: format!("https://dl.google.com/go/go{version}.{}", kind.to_lowercase()),
            kind: kind.to_owned(),
            os: "linux".to_owned(),
            arch: "x86-64".to_owned(),
            size: "64MB".to_owned(),
            checksum: checksum.to_owned(),
        }
    }

    fn html(&self) -> String {
        format!(
            concat!(
                "<tr><td class=\"filename\"><a class=\"download\" href=\"{}\">file</a></td>",
                "<td>{}</td><td>{}</td><td>{}</td><td>{}</td><td><tt>{}</tt></td></tr>",
            ),
            self.href, self.kind, self.os, self.arch, self.size, self.checksum
        )
    }
}

/// One release section of the downloads page.
#[derive(Debug, Clone)]
pub struct Section {
    /// Version token following the `go` prefix.
    pub version: String,
    /// Whether the section is the expanded (featured) one.
    pub visible: bool,
    /// Artifact rows in table order.
    pub rows: Vec<Row>,
}

impl Section {
    /// Collapsed section for `version` without rows.
    pub fn new(version: &str) -> Self {
        Self {
            version: version.to_owned(),
            visible: false,
            rows: Vec::new(),
        }
    }

    fn html(&self) -> String {
        let class = if self.visible { "toggleVisible" } else { "toggle" };
        let rows: String = self.rows.iter().map(Row::html).collect();
        format!(
            concat!(
                "<div class=\"{}\" id=\"go{}\"><div class=\"expanded\">",
                "<table class=\"codetable\">",
                "<tr class=\"first\"><th>File name</th><th>Kind</th><th>OS</th>",
                "<th>Arch</th><th>Size</th><th>SHA256 Checksum</th></tr>",
                "{}</table></div></div>",
            ),
            class, self.version, rows
        )
    }
}

/// Render a complete downloads page from sections.
pub fn page(sections: &[Section]) -> String {
    let body: String = sections.iter().map(Section::html).collect();
    format!("<!DOCTYPE html><html><head><title>Downloads</title></head><body>{body}</body></html>")
}

/// Temporary output directory with settings pointing into it.
pub struct Workspace {
    /// Keeps the directory alive.
    pub dir: TempDir,
    /// Settings writing under `dir`.
    pub settings: Settings,
}

impl Workspace {
    /// Create a workspace using otherwise default settings.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a workspace from `config`, redirecting its output directory.
    pub fn with_config(config: Config) -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let output_dir =
            Utf8PathBuf::from_path_buf(dir.path().join("docs/api")).expect("UTF-8 temp path");
        let settings = Config {
            output_dir,
            link_prefix: Some("/docs/api".to_owned()),
            ..config
        }
        .resolve()
        .expect("valid settings");
        Self { dir, settings }
    }

    /// Read a published file as text.
    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.settings.output_dir.join(relative))
            .unwrap_or_else(|err| panic!("failed to read {relative}: {err}"))
    }

    /// Whether anything was published.
    pub fn has_output(&self) -> bool {
        self.settings.output_dir.exists()
    }
}
