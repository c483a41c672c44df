//! Command-line surface of the `flatsearch` binary.

use clap::{Parser, ValueEnum};
use flatsearch_core::config::Config;
use flatsearch_feeds::{HttpSource, Source};
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "flatsearch",
    version,
    about = "Browse flat listings with a structured field:value search"
)]
pub struct Cli {
    /// JSON file with the listings, or `-` for stdin.
    #[arg(value_name = "SOURCE", conflicts_with = "url")]
    pub source: Option<String>,

    /// Listings backend base URL, e.g. http://localhost:8080/api.
    #[arg(long)]
    pub url: Option<String>,

    /// Bearer token for the backend.
    #[arg(long, env = "FLATSEARCH_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Search query, e.g. `isNew:true/house.year:2010`.
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Filter once, print the matching records and exit.
    #[arg(long)]
    pub headless: bool,

    /// Output format for --headless.
    #[arg(long, value_enum, default_value_t = Format::Json)]
    pub format: Format,

    /// Reload when the source file changes on disk.
    #[arg(long)]
    pub watch: bool,

    /// Read configuration from this file instead of the default location.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write debug logs to /tmp/flatsearch-debug.log (stderr with --headless).
    #[arg(long)]
    pub debug: bool,

    /// Print the search palette's field tokens and exit.
    #[arg(long)]
    pub fields: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Pretty-printed JSON array.
    #[default]
    Json,
    /// One JSON record per line.
    Jsonl,
    /// Tab-separated summary columns.
    Table,
}

impl Cli {
    /// Load the config named by `--config`, or the user's config file.
    pub fn load_config(&self) -> anyhow::Result<Config> {
        match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
    }

    /// Pick the record source: command line first, then `[source]` in the
    /// config, then piped stdin.
    pub fn resolve_source(&self, config: &Config) -> anyhow::Result<Source> {
        if let Some(url) = &self.url {
            return Ok(Source::Http(HttpSource::new(url, self.token.clone())?));
        }
        match self.source.as_deref() {
            Some("-") => return Ok(Source::Stdin),
            Some(path) => return Ok(Source::File(PathBuf::from(path))),
            None => {}
        }
        if let Some(url) = &config.source.url {
            return Ok(Source::Http(HttpSource::new(url, self.token.clone())?));
        }
        if let Some(path) = &config.source.path {
            return Ok(Source::File(path.clone()));
        }
        if !std::io::stdin().is_terminal() {
            return Ok(Source::Stdin);
        }
        anyhow::bail!("no listings source: pass a FILE, `-` for stdin, or --url")
    }
}
