//! Shared argument definitions.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use jsview_loader::{FileRecentlyViewed, JsviewConfig, LoaderOptions, LocationFetcher, Session};
use jsview_schema::{Document, Stage, ViewOptions};
use tracing::debug;

/// Read `path`, or the nearest jsview.toml above the working directory.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<JsviewConfig> {
    match path {
        Some(path) => {
            JsviewConfig::load(path).with_context(|| format!("Failed to read {}", path.display()))
        }
        None => {
            let cwd = std::env::current_dir()?;
            Ok(JsviewConfig::discover(&cwd)?)
        }
    }
}

pub fn recent_store(config: &JsviewConfig) -> FileRecentlyViewed {
    FileRecentlyViewed::new(config.recent_path(), config.recent.limit)
}

/// Loader-related command-line arguments.
///
/// Can be embedded in other command Args using `#[command(flatten)]`.
#[derive(clap::Args, Clone, Default)]
pub struct LoaderArgs {
    /// Config file to use instead of the nearest jsview.toml
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Allow plain HTTP URLs
    #[arg(long)]
    pub allow_http: bool,

    /// Only fetch remote schemas from this host (repeatable, "*.example.com" allowed)
    #[arg(long = "allowed-host")]
    pub allowed_hosts: Vec<String>,

    /// Seconds to wait for the schema to load
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Do not add the schema to the recently viewed list
    #[arg(long)]
    pub no_recent: bool,
}

/// Viewer-related command-line arguments.
#[derive(clap::Args, Clone, Default)]
pub struct ViewerArgs {
    /// Which side of an API the example is for
    #[arg(long)]
    pub stage: Option<Stage>,

    /// Location segments the viewer is mounted under (e.g. "view" or "api/view")
    #[arg(long)]
    pub base_prefix: Option<String>,
}

impl ViewerArgs {
    pub fn view_options(&self, config: &JsviewConfig) -> ViewOptions {
        let mut options = config.view_options();
        if let Some(stage) = self.stage {
            options.stage = stage;
        }
        if let Some(prefix) = &self.base_prefix {
            options.base_prefix = prefix
                .split('/')
                .filter(|segment| !segment.is_empty())
                .map(String::from)
                .collect();
        }
        options
    }
}

impl LoaderArgs {
    pub fn config(&self) -> anyhow::Result<JsviewConfig> {
        load_config(self.config.as_deref())
    }

    /// Build LoaderOptions from the config file and command-line arguments.
    pub fn to_loader_options(&self, config: &JsviewConfig) -> LoaderOptions {
        let mut options = config.loader_options();
        options.allow_http |= self.allow_http;
        if !self.allowed_hosts.is_empty() {
            options.allowed_hosts = self.allowed_hosts.clone();
        }
        debug!(
            "allow_http={} allowed_hosts={:?}",
            options.allow_http, options.allowed_hosts
        );
        options
    }

    pub fn session(&self, config: &JsviewConfig) -> anyhow::Result<Session> {
        let fetcher = LocationFetcher::new(self.to_loader_options(config))?;
        let session = Session::new(Arc::new(fetcher), 1)?;
        if self.no_recent {
            return Ok(session);
        }
        Ok(session.with_recent(Box::new(recent_store(config))))
    }

    /// Load one schema, failing if it cannot be fetched or parsed.
    pub fn load(&self, config: &JsviewConfig, location: &str) -> anyhow::Result<Arc<Document>> {
        let mut session = self.session(config)?;
        if session.navigate(location).is_none() {
            bail!("Nothing to load for {location}");
        }
        let committed = session.wait_for_commit(Duration::from_secs(self.timeout))?;
        Ok(committed.result.clone()?)
    }
}
