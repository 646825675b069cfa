//! go-release-json CLI entrypoint.
//!
//! Reads the Go downloads page and publishes its release metadata as static
//! JSON and text files. Progress is logged to stderr; a failed run prints a
//! single error line and exits with status 1.

use clap::Parser;
use env_logger::{Builder, Env};
use go_release_json::cli::Cli;
use go_release_json::config::{Config, Settings};
use go_release_json::error::Result;
use go_release_json::fetch::{FilePageSource, HttpPageSource, PageSource};
use go_release_json::pipeline::{RunMode, RunReport, run as run_pipeline};
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

/// Install the stderr logger; `RUST_LOG` overrides the flag-derived level.
fn init_logging(cli: &Cli) {
    Builder::from_env(Env::default().default_filter_or(cli.log_level().as_str()))
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli, stderr: &mut dyn Write) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let settings = cli.apply(config).resolve()?;
    let source = page_source(cli, &settings);
    let mode = if cli.dry_run {
        RunMode::DryRun
    } else {
        RunMode::Write
    };
    let report = run_pipeline(source.as_ref(), &settings, mode)?;
    if mode == RunMode::DryRun {
        print_dry_run_report(&report, stderr);
    } else if !cli.quiet {
        write_stderr_line(
            stderr,
            format!(
                "Published {} release(s) to {} (latest {})",
                report.release_count, settings.output_dir, report.latest
            ),
        );
    }
    Ok(())
}

/// Choose the page source: a local file when `--input` is given.
fn page_source(cli: &Cli, settings: &Settings) -> Box<dyn PageSource> {
    match &cli.input {
        Some(path) => Box::new(FilePageSource::new(path.clone())),
        None => Box::new(HttpPageSource::new(
            settings.source_url.as_str(),
            settings.timeout,
        )),
    }
}

fn print_dry_run_report(report: &RunReport, stderr: &mut dyn Write) {
    write_stderr_line(stderr, "Dry run - no files will be modified");
    write_stderr_line(stderr, "");
    write_stderr_line(stderr, format!("Latest release: {}", report.latest));
    write_stderr_line(stderr, format!("Releases: {}", report.release_count));
    if !report.diagnostics.is_empty() {
        write_stderr_line(
            stderr,
            format!("Skipped sections: {}", report.diagnostics.len()),
        );
    }
    write_stderr_line(stderr, "");
    write_stderr_line(stderr, "Files to write:");
    for file in &report.files {
        write_stderr_line(stderr, format!("  {} ({} bytes)", file.path, file.size));
    }
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, err);
            1
        }
    }
}

fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort output; ignore write failures.
    }
}
