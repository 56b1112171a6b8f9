//! Free-form string attributes attached to annotations.
//!
//! Attributes are held in a `BTreeMap` so encoding emits entries in key
//! order and two equal maps always produce identical bytes.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};

use crate::error::SchemaError;

/// Attribute map: unique string keys to string values.
pub type Attributes = BTreeMap<String, String>;

/// Builds an attribute map from key/value pairs.
///
/// # Errors
/// Returns [`SchemaError::DuplicateKey`] if a key appears more than once.
pub fn attributes_from_pairs<I, K, V>(pairs: I) -> Result<Attributes, SchemaError>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let mut attributes = Attributes::new();
    for (key, value) in pairs {
        insert_unique(&mut attributes, key.into(), value.into())?;
    }
    Ok(attributes)
}

/// Inserts `key`, failing if it is already present.
pub(crate) fn insert_unique(
    attributes: &mut Attributes,
    key: String,
    value: String,
) -> Result<(), SchemaError> {
    if attributes.contains_key(&key) {
        return Err(SchemaError::DuplicateKey { key });
    }
    attributes.insert(key, value);
    Ok(())
}

/// Serde `deserialize_with` hook that rejects repeated JSON object keys
/// instead of letting the last one win. Used for every map field.
pub(crate) fn deserialize_unique<'de, D, K, V>(deserializer: D) -> Result<BTreeMap<K, V>, D::Error>
where
    D: Deserializer<'de>,
    K: Deserialize<'de> + Ord + fmt::Display,
    V: Deserialize<'de>,
{
    struct UniqueKeys<K, V>(PhantomData<(K, V)>);

    impl<'de, K, V> Visitor<'de> for UniqueKeys<K, V>
    where
        K: Deserialize<'de> + Ord + fmt::Display,
        V: Deserialize<'de>,
    {
        type Value = BTreeMap<K, V>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map with unique keys")
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(BTreeMap::new())
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut map = BTreeMap::new();
            while let Some((key, value)) = access.next_entry::<K, V>()? {
                if map.contains_key(&key) {
                    let err = SchemaError::DuplicateKey {
                        key: key.to_string(),
                    };
                    return Err(<A::Error as de::Error>::custom(err));
                }
                map.insert(key, value);
            }
            Ok(map)
        }
    }

    deserializer.deserialize_any(UniqueKeys(PhantomData))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs() {
        let attributes =
            attributes_from_pairs([("behavior", "parked"), ("occluded", "false")]).unwrap();
        assert_eq!(attributes.len(), 2);
        assert_eq!(attributes.get("behavior"), Some(&"parked".to_string()));
    }

    #[test]
    fn test_from_pairs_rejects_duplicates() {
        let err = attributes_from_pairs([("behavior", "parked"), ("behavior", "moving")])
            .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateKey { ref key } if key == "behavior"));
    }

    #[test]
    fn test_deserialize_unique() {
        #[derive(serde::Deserialize)]
        struct Holder {
            #[serde(deserialize_with = "deserialize_unique")]
            attributes: Attributes,
        }

        let ok: Holder = serde_json::from_str(r#"{"attributes": {"a": "1", "b": "2"}}"#).unwrap();
        assert_eq!(ok.attributes.len(), 2);

        let null: Holder = serde_json::from_str(r#"{"attributes": null}"#).unwrap();
        assert!(null.attributes.is_empty());

        let dup = serde_json::from_str::<Holder>(r#"{"attributes": {"a": "1", "a": "2"}}"#);
        let err = dup.err().expect("duplicate keys must be rejected");
        assert!(err.to_string().contains("Duplicate map key `a`"));
    }
}
