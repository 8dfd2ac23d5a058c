//! Save file encoding
//!
//! Write path: `serialize → obscure → base64`. Read path is the exact inverse.
//! With obscuring disabled the serialized JSON is written as-is.
//!
//! Obscuring is a fixed-byte XOR. It keeps casual readers from editing a save
//! in a text editor and nothing more: there is no key, and anyone who knows
//! the byte can undo it. Do not treat obscured saves as confidential.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::Entries;
use crate::consts::OBSCURE_BYTE;
use crate::error::{DecodeError, EncodeError};
use crate::value::SaveValue;

/// XOR every byte with [`OBSCURE_BYTE`]. Applying it twice is a no-op.
pub fn obscure(bytes: &mut [u8]) {
    for b in bytes.iter_mut() {
        *b ^= OBSCURE_BYTE;
    }
}

/// Serialize a mapping to save file text
pub fn encode(entries: &Entries, obscured: bool) -> Result<String, EncodeError> {
    if let Some((key, _)) = entries
        .iter()
        .find(|(_, v)| matches!(v, SaveValue::Float(x) if !x.is_finite()))
    {
        return Err(EncodeError::NonFiniteFloat { key: key.clone() });
    }

    let json = serde_json::to_string(entries).map_err(EncodeError::Serialize)?;
    if !obscured {
        return Ok(json);
    }

    let mut bytes = json.into_bytes();
    obscure(&mut bytes);
    Ok(STANDARD.encode(bytes))
}

/// Parse save file contents back into a mapping
///
/// Never returns an empty mapping for unreadable input; empty contents are
/// `Malformed` because even an empty store serializes to `{}`. Bytes that are
/// not text fail as `Base64` when obscured and as `Utf8` when plain.
pub fn decode(data: impl AsRef<[u8]>, obscured: bool) -> Result<Entries, DecodeError> {
    let data = data.as_ref();
    let bytes = if obscured {
        let mut bytes = STANDARD.decode(data.trim_ascii())?;
        obscure(&mut bytes);
        bytes
    } else {
        data.to_vec()
    };
    let json = String::from_utf8(bytes)?;

    serde_json::from_str(&json).map_err(DecodeError::Malformed)
}
