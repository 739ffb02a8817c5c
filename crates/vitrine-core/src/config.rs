//! Site configuration management.

use std::{collections::HashMap, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Main configuration structure for Vitrine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteConfig,

    /// Search index settings.
    #[serde(default)]
    pub search: SearchConfig,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,

    /// Base URL for the site (e.g., "https://example.com").
    pub base_url: String,

    /// Default language code.
    #[serde(default = "default_language")]
    pub default_language: String,
}

/// Search index configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Whether search is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Directory containing the page sources (flat, `*.html`).
    #[serde(default = "default_source_dir")]
    pub source_dir: String,

    /// Output path of the generated index file.
    #[serde(default = "default_index_file")]
    pub index_file: String,

    /// Filename of the home page. Always sorts first in the index.
    #[serde(default = "default_home_page")]
    pub home_page: String,

    /// Filenames excluded from indexing.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Timeout for the browser-side index fetch, in milliseconds.
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u32,

    /// Extra title prefixes per filename, so a page is findable by terms
    /// that do not appear in its heading (e.g. "Kontakte – " for
    /// kontakte.html).
    #[serde(default)]
    pub title_prefixes: HashMap<String, String>,
}

// Default value functions
fn default_language() -> String {
    "de".to_string()
}

fn default_true() -> bool {
    true
}

fn default_source_dir() -> String {
    "src".to_string()
}

fn default_index_file() -> String {
    "js/search-index.json".to_string()
}

fn default_home_page() -> String {
    "index.html".to_string()
}

fn default_exclude() -> Vec<String> {
    vec!["404.html".to_string()]
}

fn default_fetch_timeout_ms() -> u32 {
    8000
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            source_dir: default_source_dir(),
            index_file: default_index_file(),
            home_page: default_home_page(),
            exclude: default_exclude(),
            fetch_timeout_ms: default_fetch_timeout_ms(),
            title_prefixes: HashMap::new(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration using the config crate for more flexibility.
    ///
    /// Values from `VITRINE__`-prefixed environment variables override the
    /// file (e.g. `VITRINE__SEARCH__SOURCE_DIR`).
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("VITRINE").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.site.title.is_empty() {
            return Err(CoreError::config("site.title cannot be empty"));
        }

        if self.site.base_url.is_empty() {
            return Err(CoreError::config("site.base_url cannot be empty"));
        }

        if self.site.base_url.ends_with('/') {
            tracing::warn!("site.base_url should not have a trailing slash");
        }

        if self.search.source_dir.is_empty() {
            return Err(CoreError::config("search.source_dir cannot be empty"));
        }

        if self.search.index_file.is_empty() {
            return Err(CoreError::config("search.index_file cannot be empty"));
        }

        if self.search.fetch_timeout_ms == 0 {
            tracing::warn!("search.fetch_timeout_ms is 0, the index fetch will never time out");
        }

        Ok(())
    }

    /// Get the full URL for a path.
    pub fn url_for(&self, path: &str) -> String {
        let base = self.site.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}
