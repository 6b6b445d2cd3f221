//! Library directory access.

use crate::error::Result;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// One file of the library joined with its reading progress.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LibraryEntry {
    /// Path relative to the library root, `/`-separated.
    pub file: String,
    /// Stored progress, `null` when none was saved.
    pub progress: Option<Value>,
}

/// Directory tree holding the served book files.
#[derive(Debug, Clone)]
pub struct Library {
    root: PathBuf,
}

impl Library {
    /// Open the library at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every regular file under the root, in traversal order.
    ///
    /// Symlinks to files are listed; symlinked directories are not entered.
    pub fn files(&self) -> Vec<String> {
        walkdir::WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| match e {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::warn!(
                        path = ?err.path(),
                        error = %err,
                        "Skipping unreadable library entry"
                    );
                    None
                }
            })
            .filter(|e| e.path().is_file())
            .filter_map(|e| relative_path(&self.root, e.path()))
            .collect()
    }

    /// Write `data` as `name` directly under the root, replacing any existing file.
    pub async fn store(&self, name: &str, data: &[u8]) -> Result<PathBuf> {
        let path = self.root.join(name);
        tokio::fs::write(&path, data).await?;
        Ok(path)
    }
}

/// Path of `path` relative to `root`, joined with `/`.
fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}
