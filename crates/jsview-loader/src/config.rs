//! `jsview.toml` configuration.

use std::fs;
use std::path::{Path, PathBuf};

use jsview_schema::{Stage, ViewOptions};
use serde::Deserialize;

use crate::error::ConfigError;
use crate::fetch::LoaderOptions;
use crate::recent::{DEFAULT_RECENT_LIMIT, RECENT_FILE_NAME, default_data_dir};

/// The standard configuration filename.
pub const CONFIG_FILENAME: &str = "jsview.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct JsviewConfig {
    pub viewer: ViewerConfig,
    pub security: SecurityConfig,
    pub recent: RecentConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ViewerConfig {
    /// Route segments in front of the schema location, `["view"]` if unset
    pub base_prefix: Option<Vec<String>>,
    pub stage: Stage,
}

/// Security configuration for remote URL access.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SecurityConfig {
    /// Hosts remote schemas may be fetched from; empty allows any.
    ///
    /// Supports exact matches (e.g., "example.com") and wildcard subdomains
    /// (e.g., "*.example.com" matches "sub.example.com" and "example.com").
    pub allowed_hosts: Vec<String>,
    pub allow_http: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RecentConfig {
    pub limit: usize,
    /// Store file, `<data dir>/recently-viewed.json` if unset
    pub path: Option<PathBuf>,
}

impl Default for RecentConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_RECENT_LIMIT,
            path: None,
        }
    }
}

impl JsviewConfig {
    /// Find `jsview.toml` in `start_dir` or any of its ancestors.
    pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
        let mut current = start_dir.to_path_buf();
        loop {
            let config_path = current.join(CONFIG_FILENAME);
            if config_path.exists() {
                return Some(config_path);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load the nearest configuration file, or the defaults if there is none.
    pub fn discover(start_dir: &Path) -> Result<Self, ConfigError> {
        match Self::find_config_file(start_dir) {
            Some(path) => {
                tracing::debug!("using config {}", path.display());
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn loader_options(&self) -> LoaderOptions {
        LoaderOptions {
            allow_http: self.security.allow_http,
            allowed_hosts: self.security.allowed_hosts.clone(),
            ..LoaderOptions::default()
        }
    }

    pub fn view_options(&self) -> ViewOptions {
        let mut options = ViewOptions {
            stage: self.viewer.stage,
            ..ViewOptions::default()
        };
        if let Some(prefix) = &self.viewer.base_prefix {
            options.base_prefix = prefix.clone();
        }
        options
    }

    pub fn recent_path(&self) -> PathBuf {
        self.recent
            .path
            .clone()
            .unwrap_or_else(|| default_data_dir().join(RECENT_FILE_NAME))
    }
}
