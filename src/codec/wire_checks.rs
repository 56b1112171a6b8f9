//! Structural checks prost does not perform on its own.
//!
//! prost decodes a map field by inserting entries one by one, so a key
//! repeated on the wire silently keeps its last value. To reject such
//! input, the same bytes are decoded a second time into shadow messages
//! that declare the map field as a repeated entry list (tags match the
//! real messages; every other field is skipped as unknown).

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use prost::Message;

use crate::error::SchemaError;

/// A map entry with a string key. The value (tag 2) is skipped.
#[derive(Clone, PartialEq, Message)]
pub(crate) struct StringEntry {
    #[prost(string, tag = "1")]
    key: String,
}

/// A map entry with an int32 key. The value (tag 2) is skipped.
#[derive(Clone, PartialEq, Message)]
pub(crate) struct IntEntry {
    #[prost(int32, tag = "1")]
    key: i32,
}

/// Attributes of key point, key line and polygon annotations.
#[derive(Clone, PartialEq, Message)]
pub(crate) struct AttributesAt3 {
    #[prost(message, repeated, tag = "3")]
    entries: Vec<StringEntry>,
}

/// Attributes of 3D box annotations.
#[derive(Clone, PartialEq, Message)]
pub(crate) struct AttributesAt4 {
    #[prost(message, repeated, tag = "4")]
    entries: Vec<StringEntry>,
}

/// Attributes of 2D box annotations.
#[derive(Clone, PartialEq, Message)]
pub(crate) struct AttributesAt6 {
    #[prost(message, repeated, tag = "6")]
    entries: Vec<StringEntry>,
}

#[derive(Clone, PartialEq, Message)]
pub(crate) struct ListOfAttributesAt3 {
    #[prost(message, repeated, tag = "1")]
    items: Vec<AttributesAt3>,
}

#[derive(Clone, PartialEq, Message)]
pub(crate) struct ListOfAttributesAt4 {
    #[prost(message, repeated, tag = "1")]
    items: Vec<AttributesAt4>,
}

#[derive(Clone, PartialEq, Message)]
pub(crate) struct ListOfAttributesAt6 {
    #[prost(message, repeated, tag = "1")]
    items: Vec<AttributesAt6>,
}

/// Entries of `AnnotationIndex.annotations`.
#[derive(Clone, PartialEq, Message)]
pub(crate) struct IndexEntries {
    #[prost(message, repeated, tag = "1")]
    entries: Vec<IntEntry>,
}

/// A shadow message exposing the raw entry lists of one or more maps.
pub(crate) trait EntryScan: Message + Default {
    type Key: Eq + Hash + fmt::Display;

    fn maps(&self) -> Vec<Vec<&Self::Key>>;
}

macro_rules! single_map_scan {
    ($shadow:ident, $key:ty) => {
        impl EntryScan for $shadow {
            type Key = $key;

            fn maps(&self) -> Vec<Vec<&$key>> {
                vec![self.entries.iter().map(|e| &e.key).collect()]
            }
        }
    };
}

macro_rules! list_map_scan {
    ($shadow:ident) => {
        impl EntryScan for $shadow {
            type Key = String;

            fn maps(&self) -> Vec<Vec<&String>> {
                self.items
                    .iter()
                    .map(|item| item.entries.iter().map(|e| &e.key).collect())
                    .collect()
            }
        }
    };
}

single_map_scan!(AttributesAt3, String);
single_map_scan!(AttributesAt4, String);
single_map_scan!(AttributesAt6, String);
single_map_scan!(IndexEntries, i32);
list_map_scan!(ListOfAttributesAt3);
list_map_scan!(ListOfAttributesAt4);
list_map_scan!(ListOfAttributesAt6);

/// Fails if any map described by `S` repeats a key in `bytes`.
pub(crate) fn unique_map_keys<S: EntryScan>(
    type_name: &'static str,
    bytes: &[u8],
) -> Result<(), SchemaError> {
    let scan = S::decode(bytes).map_err(|source| SchemaError::malformed(type_name, source))?;
    for keys in scan.maps() {
        let mut seen = HashSet::with_capacity(keys.len());
        for key in keys {
            if !seen.insert(key) {
                return Err(SchemaError::DuplicateKey {
                    key: key.to_string(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One `(key, value)` map entry as it appears inside field `tag`.
    fn entry(tag: u8, key: &str, value: &str) -> Vec<u8> {
        let mut body = vec![0x0A, key.len() as u8];
        body.extend_from_slice(key.as_bytes());
        body.extend_from_slice(&[0x12, value.len() as u8]);
        body.extend_from_slice(value.as_bytes());

        let mut out = vec![(tag << 3) | 2, body.len() as u8];
        out.extend(body);
        out
    }

    #[test]
    fn test_distinct_keys_pass() {
        let mut bytes = entry(6, "a", "1");
        bytes.extend(entry(6, "b", "2"));
        assert!(unique_map_keys::<AttributesAt6>("test", &bytes).is_ok());
    }

    #[test]
    fn test_repeated_key_fails() {
        let mut bytes = entry(3, "state", "parked");
        bytes.extend(entry(3, "state", "moving"));
        let err = unique_map_keys::<AttributesAt3>("test", &bytes).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateKey { ref key } if key == "state"));
    }

    #[test]
    fn test_other_tags_are_ignored() {
        // Same key twice, but in field 3 while the scan looks at field 4.
        let mut bytes = entry(3, "k", "1");
        bytes.extend(entry(3, "k", "2"));
        assert!(unique_map_keys::<AttributesAt4>("test", &bytes).is_ok());
    }

    #[test]
    fn test_keys_scoped_per_list_item() {
        // Two list items (field 1), each with attribute "k" once.
        let inner = entry(3, "k", "v");
        let mut bytes = Vec::new();
        for _ in 0..2 {
            bytes.push(0x0A);
            bytes.push(inner.len() as u8);
            bytes.extend_from_slice(&inner);
        }
        assert!(unique_map_keys::<ListOfAttributesAt3>("test", &bytes).is_ok());
    }
}
