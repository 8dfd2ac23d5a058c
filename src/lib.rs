//! savekeep - single-file persistent key-value store for game state
//!
//! Core modules:
//! - `persistence`: In-memory save slot and the on-disk encode/decode pipeline
//! - `controller`: Startup hook and write-through get/set API
//! - `value`: Typed save values and their JSON form
//! - `settings`: Save location and encoding options
//!
//! Saves may be obscured on disk. That is a fixed-byte XOR under base64, which
//! deters hand edits but provides no confidentiality.

pub mod controller;
pub mod error;
pub mod persistence;
pub mod settings;
pub mod value;

pub use controller::{SaveController, VersionCheck};
pub use error::{DecodeError, EncodeError, SettingsError, StoreError};
pub use persistence::{Entries, SaveFile};
pub use settings::{CorruptPolicy, SaveSettings};
pub use value::SaveValue;

/// Save format constants
pub mod consts {
    /// Default save file name
    pub const SAVE_FILE_NAME: &str = "SaveGame.sav";
    /// Format version stamped into every save. Compared on load, never migrated.
    pub const SAVE_FILE_VERSION: i64 = 1;
    /// Byte every saved byte is XORed with when obscuring is on
    pub const OBSCURE_BYTE: u8 = 64;
}

/// Reserved keys. Ordinary entries to the store; only callers give them meaning.
pub mod keys {
    pub const SAVE_FILE_VERSION: &str = "SaveFileVersion";
    pub const SAVE_TIMESTAMP: &str = "SaveTimestamp";
    pub const LAST_ROOM_VISITED: &str = "LastRoomVisited";
    pub const LAST_DOOR_VISITED: &str = "LastDoorVisited";
    pub const COMPLETED_GAME: &str = "CompletedGame";
}
