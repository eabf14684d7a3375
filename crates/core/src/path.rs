//! Remote path handling
//!
//! Remote paths are plain forward-slash strings. They are normalized on
//! construction so joins and displays are predictable.

use std::fmt;

/// A normalized path on the remote store
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RemotePath(String);

impl RemotePath {
    /// Create a RemotePath, normalizing the input
    ///
    /// - duplicate slashes are collapsed
    /// - `.` components are dropped
    /// - a trailing slash is removed (except for `/` itself)
    /// - an empty path becomes `.`
    ///
    /// Whitespace is part of a name and is kept.
    pub fn new(path: impl AsRef<str>) -> Self {
        let raw = path.as_ref();
        let absolute = raw.starts_with('/');

        let parts: Vec<&str> = raw
            .split('/')
            .filter(|part| !part.is_empty() && *part != ".")
            .collect();

        let joined = parts.join("/");
        let normalized = match (absolute, joined.is_empty()) {
            (true, _) => format!("/{joined}"),
            (false, true) => ".".to_string(),
            (false, false) => joined,
        };

        Self(normalized)
    }

    /// The root directory
    pub fn root() -> Self {
        Self("/".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    pub fn is_absolute(&self) -> bool {
        self.0.starts_with('/')
    }

    /// Join a single child name, taken verbatim from a listing
    pub fn join(&self, name: &str) -> Self {
        match self.0.as_str() {
            "." => Self(name.to_string()),
            "/" => Self(format!("/{name}")),
            base => Self(format!("{base}/{name}")),
        }
    }

    /// Final component, if any
    pub fn file_name(&self) -> Option<&str> {
        match self.0.as_str() {
            "/" | "." => None,
            path => path.rsplit('/').next(),
        }
    }

    /// Parent directory, if any
    pub fn parent(&self) -> Option<Self> {
        match self.0.as_str() {
            "/" | "." => None,
            path => match path.rfind('/') {
                Some(0) => Some(Self::root()),
                Some(pos) => Some(Self(path[..pos].to_string())),
                None => Some(Self(".".to_string())),
            },
        }
    }
}

impl fmt::Display for RemotePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RemotePath {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RemotePath {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl AsRef<str> for RemotePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
