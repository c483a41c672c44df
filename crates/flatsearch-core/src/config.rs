//! Configuration types for flatsearch.
//!
//! [`Config::load`] reads `~/.config/flatsearch/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[ui]
items_per_page     = 5
show_creation_date = true
palette_visible    = true
theme              = "default"

[search]
fields = [
    "id:",
    "name:",
    "creationDate:",
    "area:",
    "price:",
    "balcony:",
    "timeToMetroOnFoot:",
    "numberOfRooms:",
    "isNew:",
    "furnish:",
    "view:",
    "ownerId:",
    "house.name:",
    "house.year:",
    "house.numberOfFlatsOnFloor:",
    "coordinates.x:",
    "coordinates.y:",
]

[source]
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from
/// `~/.config/flatsearch/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub source: SourceConfig,
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_items_per_page")]
    pub items_per_page: usize,
    #[serde(default = "default_show_creation_date")]
    pub show_creation_date: bool,
    #[serde(default = "default_palette_visible")]
    pub palette_visible: bool,
    /// Colour theme: `default` or `gruvbox`.
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_items_per_page() -> usize { 5 }
fn default_show_creation_date() -> bool { true }
fn default_palette_visible() -> bool { true }
fn default_theme() -> String { "default".to_string() }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            items_per_page: default_items_per_page(),
            show_creation_date: default_show_creation_date(),
            palette_visible: default_palette_visible(),
            theme: default_theme(),
        }
    }
}

/// `[search]` section of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchConfig {
    /// Canned field tokens offered by the search palette, in display order.
    #[serde(default)]
    pub fields: Vec<String>,
}

/// `[source]` section of `config.toml`. Both keys are optional; the command
/// line takes precedence.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceConfig {
    /// JSON file to load when no source is given on the command line.
    pub path: Option<PathBuf>,
    /// Backend base URL, e.g. `http://localhost:8080/api`.
    pub url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/flatsearch/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::load_from(&path)
    }

    /// Load a specific file layered on top of the built-in defaults. A
    /// missing file yields the defaults.
    pub fn load_from(path: &std::path::Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("flatsearch")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
