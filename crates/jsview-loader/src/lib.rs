//! Loading schema documents for jsview.
//!
//! Documents are fetched from local paths or HTTPS URLs on worker threads and
//! parsed as JSON, falling back to YAML. A [`LoadGuard`] makes sure only the
//! latest request's result becomes visible.

pub mod config;
pub mod error;
pub mod fetch;
pub mod guard;
pub mod location;
pub mod parse;
pub mod pool;
pub mod recent;
pub mod session;

pub use config::{CONFIG_FILENAME, JsviewConfig};
pub use error::{ConfigError, FetchError, LoadError, StoreError};
pub use fetch::{Fetch, FileFetcher, HttpFetcher, LoaderOptions, LocationFetcher};
pub use guard::{Committed, Completion, LoadGuard, Ticket};
pub use location::Location;
pub use parse::{parse_document, parse_text};
pub use pool::{LoadPool, load};
pub use recent::{
    DEFAULT_RECENT_LIMIT, FileRecentlyViewed, MemoryRecentlyViewed, RECENT_FILE_NAME, RecentLink,
    RecentlyViewed, default_data_dir,
};
pub use session::{Session, WaitError};
