//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/scrawl/config.toml)
//! 3. Environment variables (SCRAWL_* prefix)
//!
//! Environment variables take precedence over config file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix
const ENV_PREFIX: &str = "SCRAWL";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding post files
    #[serde(default = "default_posts_dir")]
    pub posts_dir: PathBuf,

    /// Default search result limit for display
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            posts_dir: default_posts_dir(),
            search_limit: default_search_limit(),
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (SCRAWL_POSTS_DIR, SCRAWL_SEARCH_LIMIT)
    /// 2. Config file (~/.config/scrawl/config.toml or SCRAWL_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        config.ensure_posts_dir()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // SCRAWL_POSTS_DIR
        if let Ok(val) = std::env::var(format!("{}_POSTS_DIR", ENV_PREFIX)) {
            self.posts_dir = PathBuf::from(val);
        }

        // SCRAWL_SEARCH_LIMIT
        if let Ok(val) = std::env::var(format!("{}_SEARCH_LIMIT", ENV_PREFIX)) {
            if let Ok(limit) = val.parse::<usize>() {
                self.search_limit = limit;
            }
        }
    }

    /// Ensure the posts directory exists
    fn ensure_posts_dir(&self) -> Result<()> {
        if !self.posts_dir.exists() {
            std::fs::create_dir_all(&self.posts_dir).with_context(|| {
                format!("Failed to create posts directory: {:?}", self.posts_dir)
            })?;
        }
        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_file_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with SCRAWL_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("scrawl")
            .join("config.toml")
    }
}

/// Get the default posts directory
fn default_posts_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("scrawl")
        .join("posts")
}

fn default_search_limit() -> usize {
    6
}
