//! Error types for the save store
//!
//! "Key not found" is never an error; `get` returns `None` instead. Everything
//! else surfaces to the caller of the operation that failed.

use std::io;
use std::path::PathBuf;
use std::string::FromUtf8Error;

use thiserror::Error;

/// Failure to turn save file text back into a mapping
#[derive(Debug, Error)]
pub enum DecodeError {
    /// File text is not valid base64
    #[error("save data is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    /// De-obscured bytes are not valid UTF-8
    #[error("save data is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
    /// Text is not a well-formed serialized mapping
    #[error("save data is not a well-formed mapping: {0}")]
    Malformed(#[source] serde_json::Error),
}

/// Failure to turn a mapping into save file text
#[derive(Debug, Error)]
pub enum EncodeError {
    /// NaN and infinities have no JSON form
    #[error("value for key {key:?} is a non-finite float")]
    NonFiniteFloat { key: String },
    #[error("failed to serialize save data: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Errors surfaced by [`SaveFile`](crate::persistence::SaveFile) and
/// [`SaveController`](crate::controller::SaveController)
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode save file: {0}")]
    Decode(#[from] DecodeError),
    #[error("failed to encode save file: {0}")]
    Encode(#[from] EncodeError),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the save file simply does not exist (a first run)
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }

    /// True when the file exists but its contents could not be decoded
    pub fn is_decode(&self) -> bool {
        matches!(self, StoreError::Decode(_))
    }
}

/// Errors reading or writing a settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error on settings file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
