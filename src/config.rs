//! Service configuration loaded from TOML.
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 5000
//!
//! [search]
//! timeout_seconds = 10
//! cache_ttl_seconds = 3600
//!
//! [[engines]]
//! id = 4
//! name = "DuckDuckGo"
//! url_template = "https://html.duckduckgo.com/html/?q={{formattedSearch}}"
//! result_marker = "result__url"
//! ```
//!
//! Every section is optional. An empty `engines` list means the built-in
//! Google, Bing and Yahoo table.

use std::path::{Path, PathBuf};

use seorank_search::{EngineRegistry, SearchConfig, SearchEngineMapping};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind; `0` picks a free port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 5000,
        }
    }
}

/// Complete service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub search: SearchConfig,
    /// Engine table; replaces the built-in table when non-empty.
    pub engines: Vec<SearchEngineMapping>,
}

impl AppConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `~/.config/seorank/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("seorank").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("seorank")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/seorank-config/config.toml")
        }
    }

    /// Load from `path` if given, otherwise from the default path when that
    /// file exists, otherwise use defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a chosen file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Self::default_config_path();
                if default_path.is_file() {
                    Self::from_file(&default_path)
                } else {
                    tracing::debug!(path = %default_path.display(), "no config file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Check the search settings and the engine table.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting.
    pub fn validate(&self) -> Result<()> {
        self.search.validate()?;
        self.registry().map(|_| ())
    }

    /// Build the engine registry this configuration describes.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured engine table is invalid.
    pub fn registry(&self) -> Result<EngineRegistry> {
        if self.engines.is_empty() {
            return Ok(EngineRegistry::builtin());
        }
        Ok(EngineRegistry::new(self.engines.iter().cloned())?)
    }
}
