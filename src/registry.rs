//! The annotation type registry.
//!
//! [`directory_name`] is the one place the code to directory-name mapping
//! is written down. File-layout code on both the producing and the consuming
//! side resolves names through it.

use crate::error::SchemaError;
use crate::schema::AnnotationType;

/// Every annotation kind, in schema declaration order.
static ALL: [AnnotationType; 15] = [
    AnnotationType::BoundingBox2D,
    AnnotationType::BoundingBox3D,
    AnnotationType::SemanticSegmentation2D,
    AnnotationType::SemanticSegmentation3D,
    AnnotationType::InstanceSegmentation2D,
    AnnotationType::InstanceSegmentation3D,
    AnnotationType::Depth,
    AnnotationType::SurfaceNormals2D,
    AnnotationType::SurfaceNormals3D,
    AnnotationType::MotionVectors2D,
    AnnotationType::MotionVectors3D,
    AnnotationType::KeyPoint2D,
    AnnotationType::KeyLine2D,
    AnnotationType::Polygon2D,
    AnnotationType::AgentBehavior,
];

pub(crate) fn directory_name(kind: AnnotationType) -> &'static str {
    match kind {
        AnnotationType::BoundingBox2D => "bounding_box_2d",
        AnnotationType::BoundingBox3D => "bounding_box_3d",
        AnnotationType::SemanticSegmentation2D => "semantic_segmentation_2d",
        AnnotationType::SemanticSegmentation3D => "semantic_segmentation_3d",
        AnnotationType::InstanceSegmentation2D => "instance_segmentation_2d",
        AnnotationType::InstanceSegmentation3D => "instance_segmentation_3d",
        AnnotationType::Depth => "depth",
        AnnotationType::SurfaceNormals2D => "surface_normals_2d",
        AnnotationType::SurfaceNormals3D => "surface_normals_3d",
        AnnotationType::MotionVectors2D => "motion_vectors_2d",
        AnnotationType::MotionVectors3D => "motion_vectors_3d",
        AnnotationType::KeyPoint2D => "key_point_2d",
        AnnotationType::KeyLine2D => "key_line_2d",
        AnnotationType::Polygon2D => "polygon_2d",
        AnnotationType::AgentBehavior => "agent_behavior",
    }
}

/// All registered kinds with their directory names.
pub fn entries() -> impl Iterator<Item = (AnnotationType, &'static str)> {
    ALL.iter().map(|kind| (*kind, directory_name(*kind)))
}

/// All registered kinds, in declaration order.
pub fn all() -> impl Iterator<Item = AnnotationType> {
    ALL.iter().copied()
}

/// Returns the directory name for a wire code.
///
/// # Errors
/// Returns [`SchemaError::UnknownCode`] if `code` is not one of the
/// registered values, which usually means producer and consumer were
/// built against different schema versions.
pub fn name_for(code: i32) -> Result<&'static str, SchemaError> {
    AnnotationType::try_from(code)
        .map(directory_name)
        .map_err(|_| unknown_code(code))
}

/// Returns the kind registered under a directory name.
///
/// Matching is exact: names are lower snake case.
///
/// # Errors
/// Returns [`SchemaError::UnknownName`] if no kind uses `name`.
pub fn code_for(name: &str) -> Result<AnnotationType, SchemaError> {
    entries()
        .find(|(_, registered)| *registered == name)
        .map(|(kind, _)| kind)
        .ok_or_else(|| SchemaError::UnknownName {
            name: name.to_string(),
            known: entries().map(|(_, n)| n).collect::<Vec<_>>().join(", "),
        })
}

pub(crate) fn unknown_code(code: i32) -> SchemaError {
    let mut codes: Vec<i32> = all().map(AnnotationType::code).collect();
    codes.sort_unstable();
    SchemaError::UnknownCode {
        code,
        known: codes
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", "),
    }
}
