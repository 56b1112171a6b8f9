//! The closed set of annotation kinds.
//!
//! Discriminants are the wire values and are written out literally. They
//! are not in declaration order: surface normals sit at 13 (2D) and 7 (3D).
//! A retired kind keeps its number forever; new kinds take unused ones.

use std::fmt;
use std::str::FromStr;

use crate::error::SchemaError;
use crate::registry;

/// A semantic annotation kind, identified on the wire by its integer code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum AnnotationType {
    BoundingBox2D = 0,
    BoundingBox3D = 1,
    SemanticSegmentation2D = 2,
    SemanticSegmentation3D = 3,
    InstanceSegmentation2D = 4,
    InstanceSegmentation3D = 5,
    Depth = 6,
    SurfaceNormals2D = 13,
    SurfaceNormals3D = 7,
    MotionVectors2D = 8,
    MotionVectors3D = 9,
    KeyPoint2D = 10,
    KeyLine2D = 11,
    Polygon2D = 12,
    AgentBehavior = 14,
}

impl AnnotationType {
    /// The integer code used on the wire.
    #[inline]
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Looks up a kind by its wire code.
    pub fn from_code(code: i32) -> Result<Self, SchemaError> {
        Self::try_from(code).map_err(|_| registry::unknown_code(code))
    }

    /// The canonical directory name for collections of this kind.
    pub fn directory_name(self) -> &'static str {
        registry::directory_name(self)
    }

    /// True for kinds that have a collection message in this schema.
    pub fn has_collection(self) -> bool {
        matches!(
            self,
            AnnotationType::BoundingBox2D
                | AnnotationType::BoundingBox3D
                | AnnotationType::KeyPoint2D
                | AnnotationType::KeyLine2D
                | AnnotationType::Polygon2D
        )
    }
}

impl fmt::Display for AnnotationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.directory_name())
    }
}

impl FromStr for AnnotationType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        registry::code_for(s)
    }
}
