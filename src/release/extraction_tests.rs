//! Tests for page extraction.

use super::*;
use rstest::{fixture, rstest};

const HEADER: &str = concat!(
    r#"<tr class="first"><th>File name</th><th>Kind</th><th>OS</th>"#,
    r#"<th>Arch</th><th>Size</th><th>SHA256 Checksum</th></tr>"#,
);

fn row(file: &str, kind: &str, checksum: &str) -> String {
    format!(
        concat!(
            r#"<tr><td class="filename"><a class="download" href="/dl/{file}">{file}</a></td>"#,
            "<td>{kind}</td><td>Linux</td><td>x86-64</td><td>63MB</td><td><tt>{checksum}</tt></td></tr>",
        ),
        file = file,
        kind = kind,
        checksum = checksum,
    )
}

fn section(class: &str, id: &str, rows: &[String]) -> String {
    format!(
        r#"<div class="{class}" id="{id}"><table class="codetable">{HEADER}{}</table></div>"#,
        rows.concat()
    )
}

fn page(sections: &[String]) -> Markup {
    let html = format!("<html><body>{}</body></html>", sections.concat());
    Markup::parse(html.as_bytes()).expect("fixture markup")
}

#[fixture]
fn layout() -> PageLayout {
    PageLayout::default()
}

#[rstest]
fn extracts_rows_in_order(layout: PageLayout) {
    let sha256 = "a".repeat(64);
    let markup = page(&[section(
        "toggle",
        "go1.21.1",
        &[
            row("go1.21.1.src.tar.gz", "Source", &sha256),
            row("go1.21.1.linux-amd64.tar.gz", "Archive", &sha256),
        ],
    )]);

    let extraction = extract(&markup, &layout).expect("extraction succeeds");
    let artifacts = extraction
        .catalog
        .artifacts_for("1.21.1")
        .expect("release present");
    let links: Vec<&str> = artifacts.iter().map(|a| a.link.as_str()).collect();
    assert_eq!(
        links,
        ["/dl/go1.21.1.src.tar.gz", "/dl/go1.21.1.linux-amd64.tar.gz"]
    );
    let first = artifacts.first().expect("first artifact");
    assert_eq!(first.version, "1.21.1");
    assert_eq!(first.kind, "Source");
    assert_eq!(first.os, "Linux");
    assert_eq!(first.arch, "x86-64");
    assert_eq!(first.size, "63MB");
    assert_eq!(first.sha256.as_deref(), Some(sha256.as_str()));
    assert_eq!(first.sha1, None);
}

#[rstest]
fn header_row_produces_no_artifact(layout: PageLayout) {
    let markup = page(&[section("toggle", "go1.20", &[])]);
    let extraction = extract(&markup, &layout).expect("extraction succeeds");
    assert_eq!(extraction.catalog.artifacts_for("1.20"), Some(&[][..]));
}

#[rstest]
#[case::sha256(64, true, false, false)]
#[case::sha1(40, false, true, false)]
#[case::other(32, false, false, true)]
fn checksum_length_selects_field(
    layout: PageLayout,
    #[case] len: usize,
    #[case] expect_sha256: bool,
    #[case] expect_sha1: bool,
    #[case] expect_unrecognised: bool,
) {
    let markup = page(&[section(
        "toggle",
        "go1.20",
        &[row("go1.20.src.tar.gz", "Source", &"c".repeat(len))],
    )]);
    let extraction = extract(&markup, &layout).expect("extraction succeeds");
    let artifact = extraction
        .catalog
        .artifacts_for("1.20")
        .and_then(<[Artifact]>::first)
        .expect("one artifact");
    assert_eq!(artifact.sha256.is_some(), expect_sha256);
    assert_eq!(artifact.sha1.is_some(), expect_sha1);
    assert_eq!(artifact.unrecognised_checksum.is_some(), expect_unrecognised);
}

#[rstest]
fn row_without_download_link_is_fatal(layout: PageLayout) {
    let broken = r#"<tr><td>go1.20.src.tar.gz</td><td>Source</td></tr>"#.to_owned();
    let markup = page(&[section("toggle", "go1.20", &[broken])]);
    let err = extract(&markup, &layout).expect_err("missing link");
    assert!(matches!(
        err,
        ExtractionError::MissingDownloadLink { ref version, ref html }
            if version == "1.20" && html.contains("go1.20.src.tar.gz")
    ));
}

#[rstest]
fn unparseable_versions_become_diagnostics(layout: PageLayout) {
    let markup = page(&[
        section("toggle", "gotip", &[]),
        section("toggle", "go1.19", &[]),
    ]);
    let extraction = extract(&markup, &layout).expect("extraction succeeds");
    assert_eq!(extraction.catalog.len(), 1);
    let diagnostic = extraction.diagnostics.first().expect("one diagnostic");
    assert_eq!(diagnostic.section_id, "gotip");
    assert!(diagnostic.to_string().contains("gotip"));
}

#[rstest]
fn sections_without_release_prefix_are_ignored(layout: PageLayout) {
    let markup = page(&[section("toggle", "featured", &[]), section("toggle", "archive", &[])]);
    let extraction = extract(&markup, &layout).expect("extraction succeeds");
    assert!(extraction.catalog.is_empty());
    assert!(extraction.diagnostics.is_empty());
}

#[rstest]
fn repeated_sections_are_read_once(layout: PageLayout) {
    let sha1 = "b".repeat(40);
    let rows = [row("go1.21.1.src.tar.gz", "Source", &sha1)];
    let markup = page(&[
        section("toggleVisible", "go1.21.1", &rows),
        section("toggle", "go1.21.1", &rows),
    ]);
    let extraction = extract(&markup, &layout).expect("extraction succeeds");
    assert_eq!(extraction.catalog.len(), 1);
    assert_eq!(extraction.catalog.artifact_count(), 1);
}

#[rstest]
fn featured_sections_are_visited_first(layout: PageLayout) {
    let markup = page(&[
        section("toggle", "go1.19", &[]),
        section("toggleVisible", "go1.21.1", &[]),
    ]);
    let extraction = extract(&markup, &layout).expect("extraction succeeds");
    let versions: Vec<&str> = extraction
        .catalog
        .entries()
        .iter()
        .map(CatalogEntry::version)
        .collect();
    assert_eq!(versions, ["1.21.1", "1.19"]);
}

#[rstest]
fn named_header_columns_override_positions(layout: PageLayout) {
    let table = concat!(
        r#"<div class="toggle" id="go1.22"><table class="codetable">"#,
        r#"<tr class="first"><th>Kind</th><th>SHA1 Checksum</th><th>File name</th>"#,
        r#"<th>OS</th><th>Arch</th><th>Size</th></tr>"#,
        r#"<tr><td>Installer</td><td>bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb</td>"#,
        r#"<td><a class="download" href="/dl/go1.22.msi">go1.22.msi</a></td>"#,
        r#"<td>Windows</td><td>x86-64</td><td>60MB</td></tr>"#,
        "</table></div>",
    );
    let markup = page(&[table.to_owned()]);
    let extraction = extract(&markup, &layout).expect("extraction succeeds");
    let artifact = extraction
        .catalog
        .artifacts_for("1.22")
        .and_then(<[Artifact]>::first)
        .expect("one artifact");
    assert_eq!(artifact.kind, "Installer");
    assert_eq!(artifact.link, "/dl/go1.22.msi");
    assert_eq!(artifact.os, "Windows");
    assert_eq!(artifact.sha1.as_deref().map(str::len), Some(40));
}

#[rstest]
fn cell_text_is_trimmed(layout: PageLayout) {
    let table = concat!(
        r#"<div class="toggle" id="go1.20"><table class="codetable">"#,
        r#"<tr><td><a class="download" href="/dl/x">x</a></td><td>  Source </td>"#,
        "<td>\n  Linux\n</td><td>arm64</td><td>1MB</td><td></td></tr>",
        "</table></div>",
    );
    let markup = page(&[table.to_owned()]);
    let extraction = extract(&markup, &layout).expect("extraction succeeds");
    let artifact = extraction
        .catalog
        .artifacts_for("1.20")
        .and_then(<[Artifact]>::first)
        .expect("one artifact");
    assert_eq!(artifact.kind, "Source");
    assert_eq!(artifact.os, "Linux");
    assert!(!artifact.has_checksum());
}

#[test]
fn invalid_selector_is_reported() {
    let layout = PageLayout {
        row_selector: "table[".to_owned(),
        ..PageLayout::default()
    };
    let markup = page(&[]);
    let err = extract(&markup, &layout).expect_err("bad selector");
    assert!(matches!(err, ExtractionError::InvalidSelector { ref selector, .. } if selector == "table["));
}
