//! A collection whose kind is only known at run time.
//!
//! Tooling that walks a dataset tree learns the kind of a file from its
//! directory name, then needs to decode, validate or re-encode it without
//! naming the concrete type.

use std::path::Path;

use super::file::{read_message, write_message};
use super::json::{from_json_str, to_json_string};
use super::{decode, encode};
use crate::error::SchemaError;
use crate::schema::{
    AnnotationType, BoundingBox2DAnnotations, BoundingBox3DAnnotations, KeyLine2DAnnotations,
    KeyPoint2DAnnotations, Polygon2DAnnotations,
};
use crate::validation::{validate, ValidateOptions, ValidationReport};

/// One collection of any kind that has a collection message.
#[derive(Clone, Debug, PartialEq)]
pub enum AnyCollection {
    BoundingBox2D(BoundingBox2DAnnotations),
    BoundingBox3D(BoundingBox3DAnnotations),
    KeyPoint2D(KeyPoint2DAnnotations),
    KeyLine2D(KeyLine2DAnnotations),
    Polygon2D(Polygon2DAnnotations),
}

/// Applies the same expression to whichever collection is held.
macro_rules! each {
    ($value:expr, $c:ident => $body:expr) => {
        match $value {
            AnyCollection::BoundingBox2D($c) => $body,
            AnyCollection::BoundingBox3D($c) => $body,
            AnyCollection::KeyPoint2D($c) => $body,
            AnyCollection::KeyLine2D($c) => $body,
            AnyCollection::Polygon2D($c) => $body,
        }
    };
}

impl AnyCollection {
    /// The annotation kind held.
    pub fn kind(&self) -> AnnotationType {
        match self {
            AnyCollection::BoundingBox2D(_) => AnnotationType::BoundingBox2D,
            AnyCollection::BoundingBox3D(_) => AnnotationType::BoundingBox3D,
            AnyCollection::KeyPoint2D(_) => AnnotationType::KeyPoint2D,
            AnyCollection::KeyLine2D(_) => AnnotationType::KeyLine2D,
            AnyCollection::Polygon2D(_) => AnnotationType::Polygon2D,
        }
    }

    /// Number of annotations held.
    pub fn len(&self) -> usize {
        each!(self, c => c.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decodes wire bytes as a collection of `kind`.
    ///
    /// # Errors
    /// Returns [`SchemaError::UnsupportedKind`] for kinds without a
    /// collection message, otherwise as [`decode`].
    pub fn decode(kind: AnnotationType, bytes: &[u8]) -> Result<Self, SchemaError> {
        Ok(match kind {
            AnnotationType::BoundingBox2D => AnyCollection::BoundingBox2D(decode(bytes)?),
            AnnotationType::BoundingBox3D => AnyCollection::BoundingBox3D(decode(bytes)?),
            AnnotationType::KeyPoint2D => AnyCollection::KeyPoint2D(decode(bytes)?),
            AnnotationType::KeyLine2D => AnyCollection::KeyLine2D(decode(bytes)?),
            AnnotationType::Polygon2D => AnyCollection::Polygon2D(decode(bytes)?),
            other => return Err(unsupported(other)),
        })
    }

    /// Parses the JSON form of a collection of `kind`.
    ///
    /// # Errors
    /// As [`AnyCollection::decode`], with JSON errors in place of wire errors.
    pub fn from_json_str(kind: AnnotationType, json: &str) -> Result<Self, SchemaError> {
        Ok(match kind {
            AnnotationType::BoundingBox2D => AnyCollection::BoundingBox2D(from_json_str(json)?),
            AnnotationType::BoundingBox3D => AnyCollection::BoundingBox3D(from_json_str(json)?),
            AnnotationType::KeyPoint2D => AnyCollection::KeyPoint2D(from_json_str(json)?),
            AnnotationType::KeyLine2D => AnyCollection::KeyLine2D(from_json_str(json)?),
            AnnotationType::Polygon2D => AnyCollection::Polygon2D(from_json_str(json)?),
            other => return Err(unsupported(other)),
        })
    }

    /// Reads a collection of `kind` from a file (JSON or binary by
    /// extension).
    pub fn read(kind: AnnotationType, path: &Path) -> Result<Self, SchemaError> {
        Ok(match kind {
            AnnotationType::BoundingBox2D => AnyCollection::BoundingBox2D(read_message(path)?),
            AnnotationType::BoundingBox3D => AnyCollection::BoundingBox3D(read_message(path)?),
            AnnotationType::KeyPoint2D => AnyCollection::KeyPoint2D(read_message(path)?),
            AnnotationType::KeyLine2D => AnyCollection::KeyLine2D(read_message(path)?),
            AnnotationType::Polygon2D => AnyCollection::Polygon2D(read_message(path)?),
            other => return Err(unsupported(other)),
        })
    }

    /// Writes the collection to a file (JSON or binary by extension).
    pub fn write(&self, path: &Path) -> Result<(), SchemaError> {
        each!(self, c => write_message(path, c))
    }

    /// Encodes the collection to wire bytes.
    pub fn encode(&self) -> Vec<u8> {
        each!(self, c => encode(c))
    }

    /// Writes the collection as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        each!(self, c => to_json_string(c))
    }

    /// Validates the collection.
    pub fn validate(&self, opts: &ValidateOptions) -> ValidationReport {
        each!(self, c => validate(c, opts))
    }
}

fn unsupported(kind: AnnotationType) -> SchemaError {
    SchemaError::UnsupportedKind(kind.directory_name().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{KeyPoint2D, KeyPoint2DAnnotation, Polygon2DAnnotation};

    #[test]
    fn test_decode_by_kind() {
        let points: KeyPoint2DAnnotations =
            vec![KeyPoint2DAnnotation::new(1, KeyPoint2D::new(4, 4)).with_key("a")].into();
        let bytes = encode(&points);

        let any = AnyCollection::decode(AnnotationType::KeyPoint2D, &bytes).unwrap();
        assert_eq!(any.kind(), AnnotationType::KeyPoint2D);
        assert_eq!(any.len(), 1);
        assert_eq!(any, AnyCollection::KeyPoint2D(points));
        assert_eq!(any.encode(), bytes);
    }

    #[test]
    fn test_unsupported_kind() {
        let err = AnyCollection::decode(AnnotationType::Depth, &[]).unwrap_err();
        assert!(matches!(err, SchemaError::UnsupportedKind(ref name) if name == "depth"));
    }

    #[test]
    fn test_validate_dispatch() {
        let polygons: Polygon2DAnnotations =
            vec![Polygon2DAnnotation::new(0, [(0, 0), (1, 1)])].into();
        let report = AnyCollection::Polygon2D(polygons).validate(&ValidateOptions::default());
        assert_eq!(report.error_count(), 1);
    }

    #[test]
    fn test_json_by_kind() {
        let any =
            AnyCollection::from_json_str(AnnotationType::Polygon2D, r#"{"annotations": []}"#)
                .unwrap();
        assert!(any.is_empty());
        assert!(any.to_json_string().unwrap().contains("annotations"));
    }
}
