//! Normalized path handling for cross-platform compatibility

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// A lexically cleaned path using forward slashes internally.
///
/// Construction applies the usual cleaning rules: separators are unified,
/// repeated separators and `.` components are dropped, and `..` removes the
/// preceding component. A `..` that would climb above the root of an
/// absolute path is dropped; on a relative path it is kept.
///
/// Two spellings of the same location therefore compare equal, which is what
/// the import resolver relies on for its visited set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        Self {
            inner: clean(&path_str.replace('\\', "/")),
        }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Whether the path is rooted (`/...` or a drive root such as `C:/...`).
    pub fn is_absolute(&self) -> bool {
        !root_prefix(&self.inner).is_empty()
    }

    /// Join this path with a segment.
    ///
    /// An absolute segment replaces the base, as with [`Path::join`].
    pub fn join(&self, segment: impl AsRef<Path>) -> Self {
        let segment = Self::new(segment);
        if segment.is_absolute() || self.inner == "." {
            return segment;
        }
        if segment.inner == "." {
            return self.clone();
        }
        Self {
            inner: clean(&format!("{}/{}", self.inner, segment.inner)),
        }
    }

    /// Get the parent directory.
    ///
    /// A single relative component has `.` as its parent; the root and `.`
    /// have none.
    pub fn parent(&self) -> Option<Self> {
        let prefix = root_prefix(&self.inner);
        let rest = &self.inner[prefix.len()..];
        if rest.is_empty() || self.inner == "." {
            return None;
        }
        let parent = match rest.rfind('/') {
            Some(idx) => format!("{}{}", prefix, &rest[..idx]),
            None if prefix.is_empty() => ".".to_string(),
            None => prefix.to_string(),
        };
        Some(Self { inner: parent })
    }

    /// Resolve a relative path against the process working directory.
    ///
    /// Absolute paths are returned unchanged. The filesystem is not
    /// consulted, so the path need not exist.
    pub fn absolute(&self) -> Result<Self> {
        if self.is_absolute() {
            return Ok(self.clone());
        }
        std::path::absolute(self.to_native())
            .map(Self::new)
            .map_err(|e| Error::Path {
                path: self.to_native(),
                message: e.to_string(),
            })
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }
}

/// Length-prefix of `path` that denotes its root: `/`, `C:/` or nothing.
fn root_prefix(path: &str) -> &str {
    if path.starts_with('/') {
        return &path[..1];
    }
    let bytes = path.as_bytes();
    if bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'/' {
        return &path[..3];
    }
    ""
}

fn clean(path: &str) -> String {
    let prefix = root_prefix(path);
    let rooted = !prefix.is_empty();

    let mut parts: Vec<&str> = Vec::new();
    for component in path[prefix.len()..].split('/') {
        match component {
            "" | "." => {}
            ".." => {
                let can_pop = matches!(parts.last(), Some(&last) if last != "..");
                if can_pop {
                    parts.pop();
                } else if !rooted {
                    parts.push("..");
                }
            }
            other => parts.push(other),
        }
    }

    let cleaned = format!("{}{}", prefix, parts.join("/"));
    if cleaned.is_empty() {
        ".".to_string()
    } else {
        cleaned
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}
