//! Reading progress store backed by a flat JSON file.

use crate::error::Result;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

/// Reading progress for one file of the library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    /// Path relative to the library root.
    pub file: String,
    /// Client-defined position data.
    pub progress: Value,
}

/// Ordered collection of progress records mirrored to disk.
///
/// The whole collection is rewritten on every [`ProgressStore::set`]. Writes
/// go to a sibling temp file that is renamed over the store afterwards.
#[derive(Debug)]
pub struct ProgressStore {
    path: PathBuf,
    records: Mutex<Vec<ProgressRecord>>,
}

impl ProgressStore {
    /// Load the store from `path`, starting empty if the file does not exist.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let records = if path.exists() {
            let content = std::fs::read(&path)?;
            serde_json::from_slice::<Vec<ProgressRecord>>(&content)?
        } else {
            Vec::new()
        };

        tracing::info!(path = %path.display(), records = records.len(), "Loaded progress store");

        Ok(Self {
            path,
            records: Mutex::new(records),
        })
    }

    /// Stored progress for `file`, if any.
    pub fn get(&self, file: &str) -> Option<Value> {
        self.records
            .lock()
            .iter()
            .find(|r| r.file == file)
            .map(|r| r.progress.clone())
    }

    /// Replace or append the progress for `file` and persist the store.
    ///
    /// On a failed write the in-memory records are left untouched.
    pub fn set(&self, file: &str, progress: Value) -> Result<()> {
        let mut records = self.records.lock();

        let mut updated = records.clone();
        match updated.iter_mut().find(|r| r.file == file) {
            Some(record) => record.progress = progress,
            None => updated.push(ProgressRecord {
                file: file.to_string(),
                progress,
            }),
        }

        self.persist(&updated)?;
        *records = updated;

        tracing::debug!(file = %file, records = records.len(), "Progress saved");
        Ok(())
    }

    /// Snapshot of every record in insertion order.
    pub fn records(&self) -> Vec<ProgressRecord> {
        self.records.lock().clone()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    fn persist(&self, records: &[ProgressRecord]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let tmp = self.temp_path();
        std::fs::write(&tmp, json)?;
        if let Err(e) = std::fs::rename(&tmp, &self.path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(e.into());
        }

        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "progress.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
