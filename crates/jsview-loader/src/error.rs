use std::io;

/// Errors while fetching raw schema text.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// URL is not HTTPS and plain HTTP was not allowed
    #[error("HTTPS required: {0}")]
    HttpsRequired(String),

    /// Host is not in the allow-list
    #[error("Host not allowed: {0}")]
    HostNotAllowed(String),

    /// No document at the location
    #[error("Not found: {0}")]
    NotFound(String),

    /// File size exceeds limit
    #[error("File size exceeds limit: {size} > {limit}")]
    FileTooLarge { size: u64, limit: u64 },
}

/// A failed load: either the fetch failed or the text was neither JSON nor
/// YAML describing a schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Schema load failed for {location}: {message}")]
pub struct LoadError {
    pub location: String,
    /// Underlying failure, shown to the user verbatim
    pub message: String,
}

impl LoadError {
    pub fn new(location: impl Into<String>, message: impl Into<String>) -> Self {
        LoadError {
            location: location.into(),
            message: message.into(),
        }
    }
}

/// Errors reading the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Config error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Errors writing the recently viewed store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to persist temp file: {0}")]
    TempfilePersist(#[from] tempfile::PersistError),
}
