//! Fetching raw schema text.

use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;
use url::Url;

use crate::error::FetchError;
use crate::location::Location;

/// Options for fetching schema documents.
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// Allow non-HTTPS URLs
    pub allow_http: bool,
    /// Hosts remote documents may come from, empty allows any host.
    ///
    /// `*.example.com` matches `example.com` and all of its subdomains.
    pub allowed_hosts: Vec<String>,
    /// Maximum document size (default: 8 MiB)
    pub max_file_size: u64,
    /// Connect timeout (default: 10s)
    pub connect_timeout: Duration,
    /// Request timeout (default: 30s)
    pub timeout: Duration,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            allow_http: false,
            allowed_hosts: Vec::new(),
            max_file_size: 8 * 1024 * 1024, // 8 MiB
            connect_timeout: Duration::from_secs(10),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Source of raw document text.
pub trait Fetch: Send + Sync {
    fn fetch(&self, location: &str) -> Result<String, FetchError>;
}

/// Fetches `http(s)://` locations.
pub struct HttpFetcher {
    client: Client,
    options: LoaderOptions,
}

impl HttpFetcher {
    pub fn new(options: LoaderOptions) -> Result<Self, FetchError> {
        let client = Client::builder()
            .connect_timeout(options.connect_timeout)
            .timeout(options.timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(format!("jsview@{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, options })
    }

    fn check(&self, url: &Url) -> Result<(), FetchError> {
        if url.scheme() == "http" && !self.options.allow_http {
            return Err(FetchError::HttpsRequired(url.to_string()));
        }
        let host = url.host_str().unwrap_or_default();
        if !self.options.allowed_hosts.is_empty()
            && !self
                .options
                .allowed_hosts
                .iter()
                .any(|pattern| host_matches(pattern, host))
        {
            return Err(FetchError::HostNotAllowed(host.to_string()));
        }
        Ok(())
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, location: &str) -> Result<String, FetchError> {
        let url = Url::parse(location)?;
        self.check(&url)?;

        debug!("GET {url}");
        let response = self.client.get(url.as_str()).send()?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(url.to_string()));
        }
        let response = response.error_for_status()?;

        // Reject early when the server announces the size
        if let Some(content_length) = response.content_length()
            && content_length > self.options.max_file_size
        {
            return Err(FetchError::FileTooLarge {
                size: content_length,
                limit: self.options.max_file_size,
            });
        }

        let content = response.text()?;

        // Chunked responses carry no length
        check_size(content.len() as u64, self.options.max_file_size)?;
        Ok(content)
    }
}

/// Reads local paths and `file://` URLs.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    max_file_size: u64,
}

impl FileFetcher {
    pub fn new(options: &LoaderOptions) -> Self {
        Self {
            max_file_size: options.max_file_size,
        }
    }

    fn read(&self, path: &Path) -> Result<String, FetchError> {
        let size = match fs::metadata(path) {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(FetchError::NotFound(path.display().to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        check_size(size, self.max_file_size)?;
        Ok(fs::read_to_string(path)?)
    }
}

impl Fetch for FileFetcher {
    fn fetch(&self, location: &str) -> Result<String, FetchError> {
        match Location::parse(location) {
            Location::Local(path) => self.read(&path),
            Location::Remote(url) => Err(FetchError::NotFound(url.to_string())),
        }
    }
}

/// Dispatches on the kind of location.
pub struct LocationFetcher {
    http: HttpFetcher,
    file: FileFetcher,
}

impl LocationFetcher {
    pub fn new(options: LoaderOptions) -> Result<Self, FetchError> {
        let file = FileFetcher::new(&options);
        let http = HttpFetcher::new(options)?;
        Ok(Self { http, file })
    }
}

impl Fetch for LocationFetcher {
    fn fetch(&self, location: &str) -> Result<String, FetchError> {
        if Location::parse(location).is_remote() {
            self.http.fetch(location)
        } else {
            self.file.fetch(location)
        }
    }
}

fn check_size(size: u64, limit: u64) -> Result<(), FetchError> {
    if size > limit {
        return Err(FetchError::FileTooLarge { size, limit });
    }
    Ok(())
}

/// Match a host against an allow-list entry.
///
/// Supports exact matches and `*.domain` wildcards, which also match the bare
/// domain.
pub fn host_matches(pattern: &str, host: &str) -> bool {
    match pattern.strip_prefix("*.") {
        Some(domain) => {
            host == domain
                || host
                    .strip_suffix(domain)
                    .is_some_and(|prefix| prefix.ends_with('.'))
        }
        None => host == pattern,
    }
}
