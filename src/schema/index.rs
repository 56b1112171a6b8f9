//! Per-datum index of available annotation kinds.
//!
//! A datum (one image or point cloud) lists, for each annotation kind it
//! carries, the file holding that kind's collection. The map key is the
//! `AnnotationType` wire code, which makes this the message where an
//! enum value outside the closed set can show up on the wire.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::annotation_type::AnnotationType;
use super::attributes::deserialize_unique;
use crate::error::SchemaError;

#[derive(Clone, PartialEq, Serialize, Deserialize, prost::Message)]
#[serde(default)]
pub struct AnnotationIndex {
    /// Annotation type code to collection file name.
    #[prost(btree_map = "int32, string", tag = "1")]
    #[serde(deserialize_with = "deserialize_unique")]
    pub annotations: BTreeMap<i32, String>,
}

impl AnnotationIndex {
    /// Records the collection file for `kind`, replacing any previous one.
    pub fn insert(&mut self, kind: AnnotationType, file: impl Into<String>) {
        self.annotations.insert(kind.code(), file.into());
    }

    /// The collection file recorded for `kind`.
    pub fn get(&self, kind: AnnotationType) -> Option<&str> {
        self.annotations.get(&kind.code()).map(String::as_str)
    }

    /// Typed view of the entries.
    ///
    /// # Errors
    /// Returns [`SchemaError::UnknownCode`] on the first key outside the
    /// closed set.
    pub fn entries(&self) -> Result<Vec<(AnnotationType, &str)>, SchemaError> {
        self.annotations
            .iter()
            .map(|(code, file)| Ok((AnnotationType::from_code(*code)?, file.as_str())))
            .collect()
    }

    /// Path of each collection relative to the datum root, using the
    /// registered directory name of its kind.
    pub fn relative_paths(&self) -> Result<Vec<(AnnotationType, String)>, SchemaError> {
        Ok(self
            .entries()?
            .into_iter()
            .map(|(kind, file)| (kind, format!("{}/{}", kind.directory_name(), file)))
            .collect())
    }
}
