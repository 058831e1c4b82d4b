use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Default cards per page, shared by every level
pub const DEFAULT_PAGE_SIZE: u32 = 6;

/// Client configuration, loaded from a YAML file.
///
/// The bearer token comes from the session bootstrap (outside this crate);
/// the config just carries it to the client.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base URL of the portal API, without trailing slash
    pub base_url: String,
    /// Bearer credential from the auth bootstrap
    pub token: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Config {
    /// Load configuration from an explicit path
    pub fn load(path: &std::path::Path) -> Result<Config> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the conventional location, falling back to ./orgdrill.yaml
    pub fn load_default() -> Result<Config> {
        Config::load(&default_config_path()?)
    }

    fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            anyhow::bail!("page_size must be positive");
        }
        if self.base_url.is_empty() {
            anyhow::bail!("base_url must not be empty");
        }
        Ok(())
    }
}

/// Determine the config file path with fallback logic
fn default_config_path() -> Result<PathBuf> {
    // Try ~/.config/orgdrill/config.yaml
    if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("orgdrill").join("config.yaml");
        if config_path.exists() {
            return Ok(config_path);
        }
    }

    // Fallback to ./orgdrill.yaml
    let local_config = PathBuf::from("orgdrill.yaml");
    if local_config.exists() {
        return Ok(local_config);
    }

    let expected_path = if let Some(config_dir) = dirs::config_dir() {
        config_dir
            .join("orgdrill")
            .join("config.yaml")
            .display()
            .to_string()
    } else {
        "~/.config/orgdrill/config.yaml".to_string()
    };

    anyhow::bail!(
        "Config file not found. Expected locations:\n\
         1. {} (preferred)\n\
         2. ./orgdrill.yaml (fallback)",
        expected_path
    )
}
