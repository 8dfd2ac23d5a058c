//! Save store settings
//!
//! Where the save file lives and how it is written. Settings can be kept in a
//! JSON file of their own; any field left out takes its default.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{SAVE_FILE_NAME, SAVE_FILE_VERSION};
use crate::error::SettingsError;

/// What to do when an existing save file cannot be decoded at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CorruptPolicy {
    /// Refuse to start; the caller decides
    #[default]
    Fail,
    /// Move the file aside to `<name>.corrupt` and start fresh
    Reset,
}

impl CorruptPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CorruptPolicy::Fail => "fail",
            CorruptPolicy::Reset => "reset",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveSettings {
    /// Writable directory supplied by the host application
    pub directory: PathBuf,
    /// Save file name inside `directory`
    pub file_name: String,
    /// XOR + base64 the file contents (obfuscation only)
    pub obscure: bool,
    /// Format version stamped into every save
    pub format_version: i64,
    pub on_corrupt: CorruptPolicy,
}

impl Default for SaveSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            file_name: SAVE_FILE_NAME.to_string(),
            obscure: true,
            format_version: SAVE_FILE_VERSION,
            on_corrupt: CorruptPolicy::Fail,
        }
    }
}

impl SaveSettings {
    /// Default settings rooted at `directory`
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            ..Self::default()
        }
    }

    /// Full path of the save file
    pub fn save_path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }

    /// Path a corrupt save is moved to under [`CorruptPolicy::Reset`]
    pub fn corrupt_path(&self) -> PathBuf {
        self.directory.join(format!("{}.corrupt", self.file_name))
    }

    /// Read settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Self = serde_json::from_str(&json)?;
        log::info!("Loaded save settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Save settings written to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = SaveSettings::new("/tmp/game");
        assert_eq!(settings.save_path(), PathBuf::from("/tmp/game/SaveGame.sav"));
        assert_eq!(settings.corrupt_path(), PathBuf::from("/tmp/game/SaveGame.sav.corrupt"));
        assert!(settings.obscure);
        assert_eq!(settings.format_version, 1);
        assert_eq!(settings.on_corrupt, CorruptPolicy::Fail);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: SaveSettings =
            serde_json::from_str(r#"{"obscure": false, "on_corrupt": "reset"}"#).unwrap();
        assert!(!settings.obscure);
        assert_eq!(settings.on_corrupt, CorruptPolicy::Reset);
        assert_eq!(settings.file_name, SAVE_FILE_NAME);
        assert_eq!(settings.format_version, SAVE_FILE_VERSION);
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut settings = SaveSettings::new(dir.path());
        settings.file_name = "slot2.sav".to_string();
        settings.save(&path).unwrap();

        assert_eq!(SaveSettings::load(&path).unwrap(), settings);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = SaveSettings::load(&dir.path().join("missing.json"));
        assert!(matches!(missing, Err(SettingsError::Io { .. })));

        let path = dir.path().join("bad.json");
        fs::write(&path, "{ obscure: yes }").unwrap();
        assert!(matches!(SaveSettings::load(&path), Err(SettingsError::Parse(_))));
    }

    #[test]
    fn test_policy_names_match_json() {
        for policy in [CorruptPolicy::Fail, CorruptPolicy::Reset] {
            let json = serde_json::to_string(&policy).unwrap();
            assert_eq!(json, format!("\"{}\"", policy.as_str()));
        }
    }
}
