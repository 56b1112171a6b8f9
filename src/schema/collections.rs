//! Collection messages: all annotations of one kind for one serialized
//! unit, typically one file.
//!
//! Sequence order is insertion order and survives the wire unchanged.
//! Nothing sorts by `class_id` or `instance_id`.

use serde::{Deserialize, Serialize};

use super::annotations::{
    BoundingBox2DAnnotation, BoundingBox3DAnnotation, KeyLine2DAnnotation, KeyPoint2DAnnotation,
    Polygon2DAnnotation,
};
use super::annotation_type::AnnotationType;

#[derive(Clone, PartialEq, Serialize, Deserialize, prost::Message)]
#[serde(default)]
pub struct BoundingBox2DAnnotations {
    #[prost(message, repeated, tag = "1")]
    pub annotations: Vec<BoundingBox2DAnnotation>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, prost::Message)]
#[serde(default)]
pub struct BoundingBox3DAnnotations {
    #[prost(message, repeated, tag = "1")]
    pub annotations: Vec<BoundingBox3DAnnotation>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, prost::Message)]
#[serde(default)]
pub struct KeyPoint2DAnnotations {
    #[prost(message, repeated, tag = "1")]
    pub annotations: Vec<KeyPoint2DAnnotation>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, prost::Message)]
#[serde(default)]
pub struct KeyLine2DAnnotations {
    #[prost(message, repeated, tag = "1")]
    pub annotations: Vec<KeyLine2DAnnotation>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, prost::Message)]
#[serde(default)]
pub struct Polygon2DAnnotations {
    #[prost(message, repeated, tag = "1")]
    pub annotations: Vec<Polygon2DAnnotation>,
}

/// Shared accessors for the collection messages.
macro_rules! collection_impls {
    ($collection:ident, $item:ty, $kind:expr) => {
        impl $collection {
            /// The annotation kind this collection holds.
            pub const KIND: AnnotationType = $kind;

            pub fn new(annotations: Vec<$item>) -> Self {
                Self { annotations }
            }

            /// Appends an annotation, keeping insertion order.
            pub fn push(&mut self, annotation: $item) {
                self.annotations.push(annotation);
            }

            pub fn len(&self) -> usize {
                self.annotations.len()
            }

            pub fn is_empty(&self) -> bool {
                self.annotations.is_empty()
            }

            pub fn iter(&self) -> std::slice::Iter<'_, $item> {
                self.annotations.iter()
            }
        }

        impl From<Vec<$item>> for $collection {
            fn from(annotations: Vec<$item>) -> Self {
                Self { annotations }
            }
        }

        impl FromIterator<$item> for $collection {
            fn from_iter<I: IntoIterator<Item = $item>>(iter: I) -> Self {
                Self {
                    annotations: iter.into_iter().collect(),
                }
            }
        }

        impl<'a> IntoIterator for &'a $collection {
            type Item = &'a $item;
            type IntoIter = std::slice::Iter<'a, $item>;

            fn into_iter(self) -> Self::IntoIter {
                self.annotations.iter()
            }
        }
    };
}

collection_impls!(
    BoundingBox2DAnnotations,
    BoundingBox2DAnnotation,
    AnnotationType::BoundingBox2D
);
collection_impls!(
    BoundingBox3DAnnotations,
    BoundingBox3DAnnotation,
    AnnotationType::BoundingBox3D
);
collection_impls!(
    KeyPoint2DAnnotations,
    KeyPoint2DAnnotation,
    AnnotationType::KeyPoint2D
);
collection_impls!(
    KeyLine2DAnnotations,
    KeyLine2DAnnotation,
    AnnotationType::KeyLine2D
);
collection_impls!(
    Polygon2DAnnotations,
    Polygon2DAnnotation,
    AnnotationType::Polygon2D
);
