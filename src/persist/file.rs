//! File-Backed Store
//!
//! JSON map on disk for the demo binary: loaded once on open, mutated in
//! memory, written back on `flush`. The only fallible surface in the
//! crate; the simulation itself never sees these errors.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::Store;

/// Errors opening or flushing a save file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem failure
    #[error("save file i/o: {0}")]
    Io(#[from] io::Error),

    /// The file exists but is not a JSON string map
    #[error("save file parse: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A `Store` persisted as a pretty-printed JSON object of strings.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Open a save file, starting empty when it does not exist yet.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, values })
    }

    /// Write the current values back to disk.
    pub fn flush(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Path the store writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

// =============================================================================
// TESTS
// =============================================================================
