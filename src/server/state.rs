//! Application state shared across handlers.

use crate::config::Config;
use crate::error::Result;
use crate::library::{Library, LibraryEntry};
use crate::progress::ProgressStore;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<Config>,
    /// Served book directory.
    pub library: Library,
    /// Reading progress per file.
    pub progress: Arc<ProgressStore>,
}

impl AppState {
    /// Open the library and load the progress store named in `config`.
    pub fn open(config: Config) -> Result<Self> {
        let library = Library::open(&config.library.path)?;
        let progress = ProgressStore::load(&config.library.progress_file)?;
        Ok(Self::new(config, library, progress))
    }

    /// Create state from already opened parts.
    pub fn new(config: Config, library: Library, progress: ProgressStore) -> Self {
        Self {
            config: Arc::new(config),
            library,
            progress: Arc::new(progress),
        }
    }

    /// Every library file paired with its stored progress.
    pub fn list_entries(&self) -> Vec<LibraryEntry> {
        let start = std::time::Instant::now();

        let entries: Vec<LibraryEntry> = self
            .library
            .files()
            .into_iter()
            .map(|file| {
                let progress = self.progress.get(&file);
                LibraryEntry { file, progress }
            })
            .collect();

        tracing::debug!(files = entries.len(), elapsed = ?start.elapsed(), "Listed library");
        entries
    }
}
