//! Save controller
//!
//! Owns one [`SaveFile`] for the lifetime of the process. The host constructs
//! it once at startup with [`SaveController::start`] and hands out `&mut`
//! access to whatever needs to read or write save values. Every
//! [`set_value`](SaveController::set_value) is written through to disk before
//! it returns.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::error::StoreError;
use crate::keys;
use crate::persistence::SaveFile;
use crate::settings::{CorruptPolicy, SaveSettings};
use crate::value::SaveValue;

/// Outcome of the format version check done at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionCheck {
    /// No save file existed
    FirstRun,
    /// Stored version equals the running one
    Match,
    /// Stored version differs. Nothing is migrated.
    Mismatch { found: i64, expected: i64 },
    /// File loaded but had no readable version entry
    Missing,
    /// File could not be decoded and was moved aside
    Reset,
}

#[derive(Debug)]
pub struct SaveController {
    settings: SaveSettings,
    path: PathBuf,
    save: SaveFile,
    version_check: VersionCheck,
}

impl SaveController {
    /// Startup hook. Run once per process before any get/set.
    ///
    /// Loads the save file if one exists, checks its format version, then
    /// stamps the running version and saves. A version mismatch is logged
    /// and otherwise ignored.
    pub fn start(settings: SaveSettings) -> Result<Self, StoreError> {
        let path = settings.save_path();
        let mut save = SaveFile::new(settings.obscure);

        let version_check = if path.is_file() {
            match save.load(&path) {
                Ok(()) => check_version(&save, settings.format_version),
                Err(e) if e.is_decode() && settings.on_corrupt == CorruptPolicy::Reset => {
                    let aside = settings.corrupt_path();
                    log::warn!(
                        "Save file {} is unreadable ({e}); on_corrupt={}, moving it to {} and starting fresh",
                        path.display(),
                        settings.on_corrupt.as_str(),
                        aside.display()
                    );
                    fs::rename(&path, &aside).map_err(|io| StoreError::io(&path, io))?;
                    VersionCheck::Reset
                }
                Err(e) => return Err(e),
            }
        } else {
            log::info!("No save file at {}, starting fresh", path.display());
            VersionCheck::FirstRun
        };

        let mut controller = Self {
            settings,
            path,
            save,
            version_check,
        };
        let version = controller.settings.format_version.to_string();
        controller.set_value(keys::SAVE_FILE_VERSION, version)?;

        log::info!(
            "Save controller ready: {} entries in {}",
            controller.save.len(),
            controller.path.display()
        );
        Ok(controller)
    }

    /// String form of the value stored under `key`
    pub fn get_value(&self, key: &str) -> Option<String> {
        self.save.get(key).map(ToString::to_string)
    }

    /// Typed value stored under `key`
    pub fn get(&self, key: &str) -> Option<&SaveValue> {
        self.save.get(key)
    }

    /// Set `key` and save immediately
    pub fn set_value(
        &mut self,
        key: impl Into<String>,
        value: impl Into<SaveValue>,
    ) -> Result<(), StoreError> {
        let key = key.into();
        let value = value.into();
        log::debug!("Setting {key:?} ({})", value.kind());
        self.save.set(key, value);
        self.save_to_file()
    }

    fn save_to_file(&mut self) -> Result<(), StoreError> {
        self.save.set(keys::SAVE_TIMESTAMP, Utc::now());
        self.save.save(&self.path)
    }

    pub fn version_check(&self) -> &VersionCheck {
        &self.version_check
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings(&self) -> &SaveSettings {
        &self.settings
    }

    pub fn store(&self) -> &SaveFile {
        &self.save
    }
}

fn check_version(save: &SaveFile, expected: i64) -> VersionCheck {
    match save.get(keys::SAVE_FILE_VERSION).and_then(SaveValue::as_i64) {
        Some(found) if found == expected => VersionCheck::Match,
        Some(found) => {
            log::warn!("Save file version mismatch: file has {found}, expected {expected}");
            VersionCheck::Mismatch { found, expected }
        }
        None => {
            log::warn!("Save file has no readable version entry, expected {expected}");
            VersionCheck::Missing
        }
    }
}
