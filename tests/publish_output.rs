//! Integration tests for the published file set.
//!
//! The page is read from disk through [`FilePageSource`], as with `--input`,
//! and the output directory is inspected byte for byte.

mod support;

use go_release_json::fetch::FilePageSource;
use go_release_json::pipeline::{RunMode, run};
use go_release_json::PipelineError;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use support::{Row, SHA1, SHA256, Section, Workspace, page};

fn publish(sections: &[Section]) -> (Workspace, Result<(), PipelineError>) {
    let workspace = Workspace::new();
    let page_path = workspace.dir.path().join("dl.html");
    std::fs::write(&page_path, page(sections)).expect("write page");
    let source = FilePageSource::new(
        camino::Utf8PathBuf::from_path_buf(page_path).expect("UTF-8 temp path"),
    );
    let result = run(&source, &workspace.settings, RunMode::Write).map(|_| ());
    (workspace, result)
}

#[fixture]
fn published() -> Workspace {
    let mut featured = Section::new("1.21.1");
    featured.visible = true;
    featured.rows.push(Row::new("1.21.1", "Source", SHA256));
    featured.rows.push(Row::new("1.21.1", "Archive", SHA1));
    let mut older = Section::new("1.20");
    older.rows.push(Row::new("1.20", "Installer", SHA256));
    let (workspace, result) = publish(&[featured, older, Section::new("1.19")]);
    result.expect("published");
    workspace
}

fn json_file(workspace: &Workspace, relative: &str) -> Value {
    serde_json::from_str(&workspace.read(relative)).expect("valid JSON")
}

#[rstest]
fn text_files_list_versions_newest_first(published: Workspace) {
    assert_eq!(published.read("latest_version.txt"), "1.21.1");
    assert_eq!(published.read("all_versions.txt"), "1.21.1\n1.20\n1.19");
}

#[rstest]
fn index_links_every_release_bundle(published: Workspace) {
    assert_eq!(
        json_file(&published, "all_versions.json"),
        json!({
            "versions": [
                {"version": "1.21.1", "link": "/docs/api/versions/1.21.1/artifacts.json"},
                {"version": "1.20", "link": "/docs/api/versions/1.20/artifacts.json"},
                {"version": "1.19", "link": "/docs/api/versions/1.19/artifacts.json"},
            ]
        })
    );
    for version in ["1.21.1", "1.20", "1.19"] {
        let bundle = json_file(&published, &format!("versions/{version}/artifacts.json"));
        assert_eq!(bundle["version"], version);
    }
}

#[rstest]
fn artifacts_carry_only_present_checksums(published: Workspace) {
    let latest = json_file(&published, "latest_release.json");
    assert_eq!(
        latest,
        json!({
            "artifacts": [
                {
                    "version": "1.21.1",
                    "link": "https://dl.google.com/go/go1.21.1.source",
                    "kind": "Source",
                    "os": "linux",
                    "arch": "x86-64",
                    "size": "64MB",
                    "sha256": SHA256,
                },
                {
                    "version": "1.21.1",
                    "link": "https://dl.google.com/go/go1.21.1.archive",
                    "kind": "Archive",
                    "os": "linux",
                    "arch": "x86-64",
                    "size": "64MB",
                    "sha1": SHA1,
                },
            ],
            "version": "1.21.1",
        })
    );
}

#[rstest]
fn json_is_compact(published: Workspace) {
    let text = published.read("all_versions.json");
    assert!(!text.contains('\n'));
    assert!(!text.contains(": "));
}

#[test]
fn invalid_artifact_leaves_previous_output_untouched() {
    let mut good = Section::new("1.20");
    good.rows.push(Row::new("1.20", "Source", SHA256));
    let (workspace, result) = publish(&[good.clone()]);
    result.expect("first run published");

    let mut broken = Section::new("1.21");
    broken.rows.push(Row::new("1.21", "Binary", SHA256));
    let page_path = workspace.dir.path().join("dl.html");
    std::fs::write(&page_path, page(&[broken, good])).expect("write page");
    let source = FilePageSource::new(
        camino::Utf8PathBuf::from_path_buf(page_path).expect("UTF-8 temp path"),
    );
    let err = run(&source, &workspace.settings, RunMode::Write).expect_err("invalid kind");

    assert!(err.to_string().contains("Binary"));
    assert_eq!(workspace.read("latest_version.txt"), "1.20");
    assert_eq!(workspace.read("all_versions.txt"), "1.20");
}

#[test]
fn missing_input_file_is_reported() {
    let workspace = Workspace::new();
    let source = FilePageSource::new(
        camino::Utf8PathBuf::from_path_buf(workspace.dir.path().join("absent.html"))
            .expect("UTF-8 temp path"),
    );
    let err = run(&source, &workspace.settings, RunMode::Write).expect_err("missing page");
    assert!(matches!(err, PipelineError::Fetch(_)));
    assert!(err.to_string().contains("absent.html"));
    assert!(!workspace.has_output());
}

#[test]
fn failed_write_keeps_latest_pointer_on_published_release() {
    let mut previous = Section::new("1.20");
    previous.rows.push(Row::new("1.20", "Source", SHA256));
    let (workspace, result) = publish(&[previous.clone()]);
    result.expect("first run published");
    let published_release = workspace.read("latest_release.json");
    std::fs::write(workspace.settings.output_dir.join("versions/1.21"), "not a directory")
        .expect("write blocker");

    let mut newer = Section::new("1.21");
    newer.rows.push(Row::new("1.21", "Source", SHA256));
    let page_path = workspace.dir.path().join("dl.html");
    std::fs::write(&page_path, page(&[newer, previous])).expect("write page");
    let source = FilePageSource::new(
        camino::Utf8PathBuf::from_path_buf(page_path).expect("UTF-8 temp path"),
    );
    let err = run(&source, &workspace.settings, RunMode::Write).expect_err("blocked bundle");

    assert!(matches!(err, PipelineError::Publish(_)));
    assert_eq!(workspace.read("latest_version.txt"), "1.20");
    assert_eq!(workspace.read("latest_release.json"), published_release);
    assert_eq!(workspace.read("all_versions.txt"), "1.20");
}
