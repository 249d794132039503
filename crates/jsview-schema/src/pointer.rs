//! `#`-rooted JSON Pointer references.

use std::fmt;

/// Reference assigned to navigation segments that are not pointer-shaped.
pub const INVALID_REFERENCE: &str = "#/invalid-reference";

/// Root reference.
pub const ROOT_REFERENCE: &str = "#";

/// A `$ref` string.
///
/// Any string is accepted; only `#` and `#/...` can be resolved inside the
/// document that contains them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Reference(String);

impl Reference {
    pub fn new(reference: impl Into<String>) -> Self {
        Reference(reference.into())
    }

    pub fn root() -> Self {
        Reference(ROOT_REFERENCE.to_string())
    }

    pub fn invalid() -> Self {
        Reference(INVALID_REFERENCE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == ROOT_REFERENCE
    }

    /// Whether the reference points into the current document.
    pub fn is_internal(&self) -> bool {
        self.0.starts_with('#')
    }

    /// Unescaped pointer tokens, or `None` for references that are not
    /// `#` or `#/...`.
    pub fn tokens(&self) -> Option<Vec<String>> {
        let pointer = self.0.strip_prefix('#')?;
        if pointer.is_empty() {
            return Some(Vec::new());
        }
        let pointer = pointer.strip_prefix('/')?;
        Some(pointer.split('/').map(unescape_token).collect())
    }

    /// Reference to a child of this one, escaping `token`.
    pub fn child(&self, token: &str) -> Reference {
        Reference(format!("{}/{}", self.0, escape_token(token)))
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Reference {
    fn from(s: &str) -> Self {
        Reference::new(s)
    }
}

impl From<String> for Reference {
    fn from(s: String) -> Self {
        Reference(s)
    }
}

impl AsRef<str> for Reference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Decode `~1` and `~0` in one left-to-right scan.
///
/// A `~` that does not start a valid escape is kept as is.
pub fn unescape_token(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    let mut chars = token.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '~' {
            match chars.peek() {
                Some('1') => {
                    chars.next();
                    out.push('/');
                }
                Some('0') => {
                    chars.next();
                    out.push('~');
                }
                _ => out.push('~'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

pub fn escape_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

/// Parse an RFC 6901 array index: decimal digits, no leading zero.
pub fn array_index(token: &str) -> Option<usize> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if token.len() > 1 && token.starts_with('0') {
        return None;
    }
    token.parse().ok()
}
