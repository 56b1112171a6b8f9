//! Annotation schema message types.
//!
//! Every type here is a plain value with a fixed protobuf wire layout
//! (via `prost` derives) and a JSON form (via `serde`). The layout is the
//! cross-language contract: field numbers and enum codes never change.
//!
//! # Design Principles
//!
//! 1. **Literal wire identities**: enum codes and field tags are written
//!    out explicitly, never derived from declaration order.
//!
//! 2. **Composition by value**: annotations own their leaf values and
//!    collections own their annotations.
//!
//! 3. **Permissive construction**: semantically invalid values (an
//!    occlusion code of 9, a two-vertex polygon) are representable, so
//!    validation can report them rather than the codec refusing them.
//!
//! # Example
//!
//! ```
//! use annoschema::schema::{
//!     BoundingBox3D, BoundingBox3DAnnotation, BoundingBox3DAnnotations, Occlusion, Pose,
//! };
//!
//! let collection = BoundingBox3DAnnotations::new(vec![BoundingBox3DAnnotation::new(
//!     2,
//!     17,
//!     BoundingBox3D::new(Pose::from_translation(4.0, -1.5, 0.8), 1.9, 4.6, 1.6)
//!         .with_occlusion(Occlusion::PartlyOccluded),
//! )
//! .with_num_points(312)]);
//!
//! assert_eq!(collection.len(), 1);
//! ```

mod annotation_type;
mod annotations;
mod attributes;
mod collections;
mod geometry;
mod index;
mod primitives;

pub use annotation_type::AnnotationType;
pub use annotations::{
    BoundingBox2DAnnotation, BoundingBox3DAnnotation, KeyLine2DAnnotation, KeyPoint2DAnnotation,
    Polygon2DAnnotation,
};
pub use attributes::{attributes_from_pairs, Attributes};
pub use collections::{
    BoundingBox2DAnnotations, BoundingBox3DAnnotations, KeyLine2DAnnotations,
    KeyPoint2DAnnotations, Polygon2DAnnotations,
};
pub use geometry::{Pose, Quaternion, Vector3};
pub use index::AnnotationIndex;
pub use primitives::{
    checked_i32, checked_u32, BoundingBox2D, BoundingBox3D, KeyPoint2D, Occlusion,
    PolygonPoint2D,
};
