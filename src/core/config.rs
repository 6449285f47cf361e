//! Application configuration management
//!
//! Handles loading and saving application settings including:
//! - API base URL (self-hosted installs)
//! - Default organization and project slugs

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, TagsError};

/// Default API root for the hosted service
pub const DEFAULT_BASE_URL: &str = "https://sentry.io/api/0/";

/// Environment variable overriding the API root
pub const BASE_URL_ENV: &str = "SENTRY_URL";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// API root, e.g. `https://sentry.io/api/0/`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Default organization slug
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,

    /// Default project slug
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            organization: None,
            project: None,
        }
    }
}

impl Config {
    /// Load configuration from file, or create default if not exists
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("com", "project-tags", "project-tags")
            .ok_or_else(|| TagsError::Config("Could not determine config directory".into()))?;

        Ok(project_dirs.config_dir().join("config.toml"))
    }

    /// Set the API base URL after checking it parses
    pub fn set_base_url(&mut self, value: &str) -> Result<()> {
        let mut url = Url::parse(value)?;
        if url.cannot_be_a_base() {
            return Err(TagsError::InvalidUrl(value.to_string()));
        }
        // Relative joins need the trailing slash
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        self.base_url = url.to_string();
        Ok(())
    }

    /// Effective API base URL (environment variable wins over the file)
    pub fn effective_base_url(&self) -> Result<Url> {
        let raw = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| self.base_url.clone());
        Ok(Url::parse(&raw)?)
    }
}
