//! Command-line interface definitions.
//!
//! Flags override the values read from the configuration file; see
//! [`Cli::apply`].

use crate::config::Config;
use crate::release::checksum::ChecksumPolicy;
use camino::Utf8PathBuf;
use clap::Parser;
use log::LevelFilter;

/// Publish Go release metadata as a static JSON API.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "go-release-json")]
#[command(version, about)]
#[command(long_about = concat!(
    "Publish Go release metadata as a static JSON API.\n\n",
    "Reads the Go downloads page, validates every listed artifact, and writes ",
    "the latest version, the latest release, one artifact list per release, ",
    "and an index of all releases under the output directory. Nothing is ",
    "written unless every artifact on the page is valid.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Publish into docs/api:\n",
    "    $ go-release-json\n\n",
    "  Publish from a saved copy of the page:\n",
    "    $ go-release-json --input dl.html -d public/api\n\n",
    "  Preview the files without writing them:\n",
    "    $ go-release-json --dry-run",
))]
pub struct Cli {
    /// Output directory [default: docs/api].
    #[arg(short = 'd', long = "dir", value_name = "DIR")]
    pub output_dir: Option<Utf8PathBuf>,

    /// URL of the downloads page [default: https://golang.org/dl/].
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Read the downloads page from a file instead of the network.
    #[arg(long, value_name = "FILE")]
    pub input: Option<Utf8PathBuf>,

    /// Configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,

    /// Handling of checksums of unrecognised length (drop or reject).
    #[arg(long, value_name = "POLICY")]
    pub checksum_policy: Option<ChecksumPolicy>,

    /// Prefix of the links in all_versions.json [default: derived from DIR].
    #[arg(long, value_name = "PREFIX")]
    pub link_prefix: Option<String>,

    /// Render every file and report it without writing anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Increase log verbosity (repeatable: -v, -vv, -vvv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Only log errors.
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,
}

impl Cli {
    /// Overlay the flags on `config`.
    ///
    /// # Examples
    ///
    /// ```
    /// use clap::Parser;
    /// use go_release_json::cli::Cli;
    /// use go_release_json::config::Config;
    ///
    /// let cli = Cli::parse_from(["go-release-json", "-d", "public/api"]);
    /// let config = cli.apply(Config::default());
    /// assert_eq!(config.output_dir.as_str(), "public/api");
    /// ```
    #[must_use]
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(dir) = &self.output_dir {
            config.output_dir.clone_from(dir);
        }
        if let Some(url) = &self.url {
            config.source_url.clone_from(url);
        }
        if let Some(policy) = self.checksum_policy {
            config.checksum_policy = policy;
        }
        if let Some(prefix) = &self.link_prefix {
            config.link_prefix = Some(prefix.clone());
        }
        config
    }

    /// Log level selected by `-v` and `-q`.
    #[must_use]
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
