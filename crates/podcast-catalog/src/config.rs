use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::platform;
use crate::view::SortKey;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub browse: BrowseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the catalog document is read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON catalog file. When it does not exist the bundled sample is used.
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
}

/// Initial view state for a new session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowseConfig {
    /// One of `none`, `title`, `updated`.
    #[serde(default = "default_sort")]
    pub default_sort: String,
    /// Genre id to filter by on startup; empty means all genres.
    #[serde(default)]
    pub default_genre: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` takes precedence.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            default_sort: default_sort(),
            default_genre: String::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl BrowseConfig {
    pub fn sort_key(&self) -> SortKey {
        SortKey::from_label(&self.default_sort)
    }
}

fn default_catalog_path() -> PathBuf {
    platform::config_dir().join("catalog.json")
}

fn default_sort() -> String {
    SortKey::None.label().to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Config {
    /// Load from the default location, writing defaults on first run.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> anyhow::Result<Self> {
        if !config_path.exists() {
            let config = Self::default();
            config.save_to(config_path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(config_path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, config_path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}
