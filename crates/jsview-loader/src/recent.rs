//! Recently viewed schemas.
//!
//! Stored as a JSON array at `<data dir>/recently-viewed.json`, newest first.
//! Override the directory with the `$JSVIEW_DATA_DIR` environment variable.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::StoreError;

pub const DEFAULT_RECENT_LIMIT: usize = 10;
pub const RECENT_FILE_NAME: &str = "recently-viewed.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentLink {
    pub title: String,
    pub url: String,
}

/// Sink for successfully loaded documents.
pub trait RecentlyViewed: Send {
    /// Record a view. Never fails; storage problems are logged.
    fn record(&mut self, title: &str, url: &str);

    fn links(&self) -> Vec<RecentLink>;
}

/// Keeps the list in memory only.
#[derive(Debug, Default)]
pub struct MemoryRecentlyViewed {
    links: Vec<RecentLink>,
    limit: usize,
}

impl MemoryRecentlyViewed {
    pub fn new(limit: usize) -> Self {
        Self {
            links: Vec::new(),
            limit,
        }
    }
}

impl RecentlyViewed for MemoryRecentlyViewed {
    fn record(&mut self, title: &str, url: &str) {
        push_front(&mut self.links, title, url, self.limit);
    }

    fn links(&self) -> Vec<RecentLink> {
        self.links.clone()
    }
}

#[derive(Debug, Clone)]
pub struct FileRecentlyViewed {
    path: PathBuf,
    limit: usize,
}

impl FileRecentlyViewed {
    pub fn new(path: impl Into<PathBuf>, limit: usize) -> Self {
        Self {
            path: path.into(),
            limit,
        }
    }

    /// Store in `dir/recently-viewed.json`.
    pub fn in_dir(dir: &Path, limit: usize) -> Self {
        Self::new(dir.join(RECENT_FILE_NAME), limit)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing or unreadable files read as an empty list.
    fn read(&self) -> Vec<RecentLink> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!("cannot read {}: {e}", self.path.display());
                return Vec::new();
            }
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!("ignoring malformed {}: {e}", self.path.display());
            Vec::new()
        })
    }

    fn write(&self, links: &[RecentLink]) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        // Write atomically using tempfile
        let mut temp = tempfile::NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut temp, links)?;
        temp.persist(&self.path)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl RecentlyViewed for FileRecentlyViewed {
    fn record(&mut self, title: &str, url: &str) {
        let mut links = self.read();
        push_front(&mut links, title, url, self.limit);
        match self.write(&links) {
            Ok(()) => debug!("recorded {url} in {}", self.path.display()),
            Err(e) => warn!("failed to update {}: {e}", self.path.display()),
        }
    }

    fn links(&self) -> Vec<RecentLink> {
        self.read()
    }
}

fn push_front(links: &mut Vec<RecentLink>, title: &str, url: &str, limit: usize) {
    links.retain(|link| link.url != url);
    links.insert(
        0,
        RecentLink {
            title: title.to_string(),
            url: url.to_string(),
        },
    );
    links.truncate(limit.max(1));
}

/// Get the default data directory.
pub fn default_data_dir() -> PathBuf {
    std::env::var("JSVIEW_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            directories::ProjectDirs::from("dev", "jsview", "jsview")
                .map(|p| p.data_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from(".jsview"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn urls(links: &[RecentLink]) -> Vec<&str> {
        links.iter().map(|link| link.url.as_str()).collect()
    }

    #[test]
    fn test_newest_first_and_dedup() {
        let dir = TempDir::new().unwrap();
        let mut store = FileRecentlyViewed::in_dir(dir.path(), 10);
        store.record("A", "https://a");
        store.record("B", "https://b");
        store.record("A again", "https://a");

        let links = store.links();
        assert_eq!(urls(&links), vec!["https://a", "https://b"]);
        assert_eq!(links[0].title, "A again");
    }

    #[test]
    fn test_limit() {
        let dir = TempDir::new().unwrap();
        let mut store = FileRecentlyViewed::in_dir(dir.path(), 2);
        store.record("1", "one");
        store.record("2", "two");
        store.record("3", "three");
        assert_eq!(urls(&store.links()), vec!["three", "two"]);
    }

    #[test]
    fn test_creates_directory() {
        let dir = TempDir::new().unwrap();
        let mut store = FileRecentlyViewed::in_dir(&dir.path().join("nested/data"), 10);
        store.record("A", "https://a");
        assert!(store.path().exists());
    }

    #[test]
    fn test_malformed_file_is_replaced() {
        let dir = TempDir::new().unwrap();
        let mut store = FileRecentlyViewed::in_dir(dir.path(), 10);
        fs::write(store.path(), "not json").unwrap();
        assert!(store.links().is_empty());

        store.record("A", "https://a");
        assert_eq!(urls(&store.links()), vec!["https://a"]);
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let dir = TempDir::new().unwrap();
        // A directory where the file should be makes persist fail
        let path = dir.path().join(RECENT_FILE_NAME);
        fs::create_dir(&path).unwrap();
        let mut store = FileRecentlyViewed::new(&path, 10);
        store.record("A", "https://a");
        assert!(store.links().is_empty());
    }

    #[test]
    fn test_clear() {
        let dir = TempDir::new().unwrap();
        let mut store = FileRecentlyViewed::in_dir(dir.path(), 10);
        store.clear().unwrap();
        store.record("A", "https://a");
        store.clear().unwrap();
        assert!(store.links().is_empty());
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryRecentlyViewed::new(10);
        store.record("A", "a");
        store.record("B", "b");
        assert_eq!(urls(&store.links()), vec!["b", "a"]);
    }
}
