//! Typed save values
//!
//! Every entry in a save file holds one [`SaveValue`]. The JSON form of each
//! variant is fixed by hand rather than derived, so that plain strings stay
//! plain (`"score":"10"`) and numbers never change kind on a round trip:
//!
//! - `String` → JSON string
//! - `Integer` → JSON integer
//! - `Float` → JSON number with a fraction or exponent
//! - `Boolean` → `true` / `false`
//! - `Timestamp` → `{"$timestamp": "2026-10-18T09:30:00.000000000Z"}`

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Object key marking a timestamp value
pub const TIMESTAMP_TAG: &str = "$timestamp";

/// Render a timestamp in the fixed on-disk format (RFC 3339, UTC, nanoseconds)
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// A single stored value
#[derive(Debug, Clone, PartialEq)]
pub enum SaveValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Timestamp(DateTime<Utc>),
}

impl SaveValue {
    /// Short name of the variant, used in log messages
    pub fn kind(&self) -> &'static str {
        match self {
            SaveValue::String(_) => "string",
            SaveValue::Integer(_) => "integer",
            SaveValue::Float(_) => "float",
            SaveValue::Boolean(_) => "boolean",
            SaveValue::Timestamp(_) => "timestamp",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SaveValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Integer view. Strings holding a decimal integer also qualify, since
    /// callers commonly store numbers as text (the format version is one).
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SaveValue::Integer(n) => Some(*n),
            SaveValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SaveValue::Float(f) => Some(*f),
            SaveValue::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SaveValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            SaveValue::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }
}

impl fmt::Display for SaveValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveValue::String(s) => f.write_str(s),
            SaveValue::Integer(n) => write!(f, "{n}"),
            SaveValue::Float(x) => write!(f, "{x:?}"),
            SaveValue::Boolean(b) => write!(f, "{b}"),
            SaveValue::Timestamp(ts) => f.write_str(&format_timestamp(ts)),
        }
    }
}

impl From<String> for SaveValue {
    fn from(s: String) -> Self {
        SaveValue::String(s)
    }
}

impl From<&str> for SaveValue {
    fn from(s: &str) -> Self {
        SaveValue::String(s.to_owned())
    }
}

impl From<i64> for SaveValue {
    fn from(n: i64) -> Self {
        SaveValue::Integer(n)
    }
}

impl From<i32> for SaveValue {
    fn from(n: i32) -> Self {
        SaveValue::Integer(i64::from(n))
    }
}

impl From<u32> for SaveValue {
    fn from(n: u32) -> Self {
        SaveValue::Integer(i64::from(n))
    }
}

impl From<f64> for SaveValue {
    fn from(x: f64) -> Self {
        SaveValue::Float(x)
    }
}

impl From<bool> for SaveValue {
    fn from(b: bool) -> Self {
        SaveValue::Boolean(b)
    }
}

impl From<DateTime<Utc>> for SaveValue {
    fn from(ts: DateTime<Utc>) -> Self {
        SaveValue::Timestamp(ts)
    }
}

impl Serialize for SaveValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SaveValue::String(s) => serializer.serialize_str(s),
            SaveValue::Integer(n) => serializer.serialize_i64(*n),
            SaveValue::Float(x) => serializer.serialize_f64(*x),
            SaveValue::Boolean(b) => serializer.serialize_bool(*b),
            SaveValue::Timestamp(ts) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(TIMESTAMP_TAG, &format_timestamp(ts))?;
                map.end()
            }
        }
    }
}

struct SaveValueVisitor;

impl<'de> Visitor<'de> for SaveValueVisitor {
    type Value = SaveValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "a string, number, boolean or {{\"{TIMESTAMP_TAG}\": \"<rfc3339>\"}} object"
        )
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<SaveValue, E> {
        Ok(SaveValue::String(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<SaveValue, E> {
        Ok(SaveValue::String(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<SaveValue, E> {
        Ok(SaveValue::Integer(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<SaveValue, E> {
        i64::try_from(v)
            .map(SaveValue::Integer)
            .map_err(|_| E::custom(format!("integer {v} is out of range for i64")))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<SaveValue, E> {
        Ok(SaveValue::Float(v))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<SaveValue, E> {
        Ok(SaveValue::Boolean(v))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<SaveValue, A::Error> {
        let Some(key) = map.next_key::<String>()? else {
            return Err(de::Error::custom("empty object is not a save value"));
        };
        if key != TIMESTAMP_TAG {
            return Err(de::Error::unknown_field(&key, &[TIMESTAMP_TAG]));
        }
        let raw: String = map.next_value()?;
        if map.next_key::<String>()?.is_some() {
            return Err(de::Error::custom("timestamp object must have exactly one field"));
        }
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| SaveValue::Timestamp(ts.with_timezone(&Utc)))
            .map_err(|e| de::Error::custom(format!("invalid timestamp {raw:?}: {e}")))
    }
}

impl<'de> Deserialize<'de> for SaveValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SaveValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_string_serializes_plain() {
        let json = serde_json::to_string(&SaveValue::from("10")).unwrap();
        assert_eq!(json, "\"10\"");
    }

    #[test]
    fn test_float_keeps_kind() {
        let json = serde_json::to_string(&SaveValue::Float(3.0)).unwrap();
        assert_eq!(json, "3.0");
        let back: SaveValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SaveValue::Float(3.0));

        let int: SaveValue = serde_json::from_str("3").unwrap();
        assert_eq!(int, SaveValue::Integer(3));
    }

    #[test]
    fn test_timestamp_fixed_format() {
        let ts = Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();
        let json = serde_json::to_string(&SaveValue::Timestamp(ts)).unwrap();
        assert_eq!(json, r#"{"$timestamp":"2026-10-18T09:30:00.000000000Z"}"#);

        let back: SaveValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SaveValue::Timestamp(ts));
    }

    #[test]
    fn test_rejects_unknown_objects() {
        assert!(serde_json::from_str::<SaveValue>(r#"{"other":"x"}"#).is_err());
        assert!(serde_json::from_str::<SaveValue>("{}").is_err());
        assert!(serde_json::from_str::<SaveValue>(r#"{"$timestamp":"yesterday"}"#).is_err());
        assert!(serde_json::from_str::<SaveValue>("null").is_err());
        assert!(serde_json::from_str::<SaveValue>("[1]").is_err());
    }

    #[test]
    fn test_rejects_u64_overflow() {
        assert!(serde_json::from_str::<SaveValue>("18446744073709551615").is_err());
    }

    #[test]
    fn test_as_i64_reads_numeric_strings() {
        assert_eq!(SaveValue::from("2").as_i64(), Some(2));
        assert_eq!(SaveValue::from(7i64).as_i64(), Some(7));
        assert_eq!(SaveValue::from("two").as_i64(), None);
        assert_eq!(SaveValue::from(true).as_i64(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(SaveValue::from("abc").to_string(), "abc");
        assert_eq!(SaveValue::from(42i64).to_string(), "42");
        assert_eq!(SaveValue::Float(3.0).to_string(), "3.0");
        assert_eq!(SaveValue::Float(0.25).to_string(), "0.25");
        assert_eq!(SaveValue::from(false).to_string(), "false");
        let ts = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(SaveValue::from(ts).to_string(), "2026-01-02T03:04:05.000000000Z");
    }
}
