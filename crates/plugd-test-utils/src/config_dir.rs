//! [`ConfigDir`] builder for configuration loading scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory of configuration documents.
///
/// # Example
///
/// ```rust,no_run
/// use plugd_test_utils::ConfigDir;
///
/// let dir = ConfigDir::new();
/// dir.write("conf.d/10-cri.toml", "[plugins.cri]\nenabled = true\n");
/// let root = dir.write("config.toml", "imports = [\"conf.d/*.toml\"]\n");
/// assert!(root.is_file());
/// ```
pub struct ConfigDir {
    temp_dir: TempDir,
}

impl Default for ConfigDir {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigDir {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("ConfigDir::new: failed to create temp dir"),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `name` (relative to the root), whether or not it exists.
    pub fn path(&self, name: &str) -> PathBuf {
        self.root().join(name)
    }

    /// Write `content` to `name`, creating parent directories, and return its path.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("Could not create {}: {e}", parent.display()));
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("Could not write {}: {e}", path.display()));
        path
    }

    /// Write several documents at once.
    pub fn write_all(&self, documents: &[(&str, &str)]) {
        for (name, content) in documents {
            self.write(name, content);
        }
    }

    /// The string form `load_config` reports for `name` in `Config::imports`.
    pub fn import_entry(&self, name: &str) -> String {
        self.path(name).to_string_lossy().replace('\\', "/")
    }
}
