//! JSON form of the annotation schema.
//!
//! Field names are the wire field names (`class_id`, `box`,
//! `instance_id`, ...), which protobuf JSON parsers in other languages
//! accept as well. Absent fields take their defaults and repeated
//! map keys are rejected, matching the binary decoder.
//!
//! This is useful for:
//! - Hand-editing or diffing small annotation files
//! - Debugging a producer by inspecting what it wrote

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::WireMessage;
use crate::error::SchemaError;

/// Reads a message from its JSON form.
///
/// # Errors
/// Returns [`SchemaError::Json`] for invalid JSON (including repeated
/// map keys and negative values in unsigned fields), and
/// [`SchemaError::MalformedInput`] for enum values outside the closed set.
pub fn from_json_str<M>(json: &str) -> Result<M, SchemaError>
where
    M: WireMessage + DeserializeOwned,
{
    from_json_slice(json.as_bytes())
}

/// Reads a message from JSON bytes.
///
/// # Errors
/// As [`from_json_str`].
pub fn from_json_slice<M>(bytes: &[u8]) -> Result<M, SchemaError>
where
    M: WireMessage + DeserializeOwned,
{
    let message: M = serde_json::from_slice(bytes)?;
    message.check_decoded()?;
    Ok(message)
}

/// Writes a message as pretty-printed JSON.
pub fn to_json_string<M: Serialize>(message: &M) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(message)
}
