use std::fmt;
use std::path::PathBuf;

use url::Url;

/// Where a schema document lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Location {
    Remote(Url),
    Local(PathBuf),
}

impl Location {
    /// `http://` and `https://` are remote, `file://` URLs and everything
    /// else are local paths.
    pub fn parse(location: &str) -> Location {
        if (location.starts_with("http://") || location.starts_with("https://"))
            && let Ok(url) = Url::parse(location)
        {
            return Location::Remote(url);
        }
        if location.starts_with("file://")
            && let Ok(url) = Url::parse(location)
            && let Ok(path) = url.to_file_path()
        {
            return Location::Local(path);
        }
        Location::Local(PathBuf::from(location))
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Location::Remote(_))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Remote(url) => write!(f, "{url}"),
            Location::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote() {
        let location = Location::parse("https://json.schemastore.org/package");
        assert!(location.is_remote());
    }

    #[test]
    fn test_unparsable_http_url_is_local() {
        assert_eq!(
            Location::parse("http://[broken"),
            Location::Local(PathBuf::from("http://[broken"))
        );
    }

    #[test]
    fn test_local_path() {
        assert_eq!(
            Location::parse("schemas/pet.yaml"),
            Location::Local(PathBuf::from("schemas/pet.yaml"))
        );
    }

    #[test]
    #[cfg(unix)]
    fn test_file_url() {
        assert_eq!(
            Location::parse("file:///tmp/schema.json"),
            Location::Local(PathBuf::from("/tmp/schema.json"))
        );
    }
}
