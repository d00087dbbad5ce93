//! Temporary configuration files for tests.
//!
//! ```
//! use serde_json::json;
//! use schema_args_test_helpers::fixtures::ConfigDir;
//!
//! let dir = ConfigDir::new()?;
//! let path = dir.write_json("base.json", &json!({"port": 80}))?;
//! assert!(path.as_str().ends_with("base.json"));
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;
use tempfile::TempDir;

/// A temporary directory that is removed when dropped.
#[derive(Debug)]
pub struct ConfigDir {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl ConfigDir {
    /// Create an empty directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created or its path is
    /// not valid UTF-8.
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create temporary directory")?;
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|path| anyhow!("non UTF-8 temporary path: {}", path.display()))?;
        Ok(Self { _dir: dir, root })
    }

    /// Directory root.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.root
    }

    /// Write `contents` to `name` inside the directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be written.
    pub fn write(&self, name: &str, contents: &str) -> Result<Utf8PathBuf> {
        let path = self.root.join(name);
        std::fs::write(&path, contents).with_context(|| format!("write {path}"))?;
        Ok(path)
    }

    /// Write `value` as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error when serialisation or the write fails.
    pub fn write_json(&self, name: &str, value: &Value) -> Result<Utf8PathBuf> {
        let body = serde_json::to_string_pretty(value)?;
        self.write(name, &body)
    }
}
