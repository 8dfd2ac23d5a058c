//! Save file persistence
//!
//! Features:
//! - String-keyed [`SaveValue`] entries held in memory
//! - JSON serialization with optional obscuring (see [`codec`])
//! - Atomic replace on save (tmp → save)
//! - Corrupt files reported as typed errors, never as an empty store

pub mod codec;

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::value::SaveValue;

/// The in-memory mapping. Ordered so saved output is deterministic.
pub type Entries = BTreeMap<String, SaveValue>;

/// Sibling path used while a save is being written
pub fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// One save slot: a key-value mapping plus the encode/decode pipeline
///
/// The mapping is the source of truth between saves; the file on disk is the
/// snapshot taken by the last successful [`save`](Self::save).
#[derive(Debug, Clone)]
pub struct SaveFile {
    entries: Entries,
    obscure: bool,
}

impl SaveFile {
    /// Create an empty save
    pub fn new(obscure: bool) -> Self {
        Self {
            entries: Entries::new(),
            obscure,
        }
    }

    /// Whether file contents are obscured and base64 encoded
    pub fn obscure_enabled(&self) -> bool {
        self.obscure
    }

    /// Stored value for `key`, or `None` if it was never set
    pub fn get(&self, key: &str) -> Option<&SaveValue> {
        self.entries.get(key)
    }

    /// Insert or overwrite an entry
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<SaveValue>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SaveValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn entries(&self) -> &Entries {
        &self.entries
    }

    /// Replace the mapping with the contents of the file at `path`
    ///
    /// A missing file is reported as an I/O error (check
    /// [`StoreError::is_not_found`]); unreadable contents as
    /// [`StoreError::Decode`]. On any error the current mapping is kept.
    pub fn load(&mut self, path: &Path) -> Result<(), StoreError> {
        let data = fs::read(path).map_err(|e| StoreError::io(path, e))?;
        let entries = codec::decode(&data, self.obscure)?;
        log::debug!("Loaded {} entries from {}", entries.len(), path.display());
        self.entries = entries;
        Ok(())
    }

    /// Write the mapping to `path`, replacing any existing file
    ///
    /// The new snapshot goes to a temporary sibling first and is renamed over
    /// `path` only once fully written, so the previous snapshot survives a
    /// failed or interrupted save.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let text = codec::encode(&self.entries, self.obscure)?;
        let tmp = temp_path(path);

        let written = fs::File::create(&tmp).and_then(|mut file| {
            file.write_all(text.as_bytes())?;
            file.sync_all()
        });
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(StoreError::io(&tmp, e));
        }

        if let Err(e) = fs::rename(&tmp, path) {
            let _ = fs::remove_file(&tmp);
            return Err(StoreError::io(path, e));
        }

        log::debug!("Saved {} entries to {}", self.entries.len(), path.display());
        Ok(())
    }
}
