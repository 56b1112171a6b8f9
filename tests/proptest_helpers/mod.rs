#![allow(dead_code)]

use annoschema::schema::{
    Attributes, BoundingBox2D, BoundingBox2DAnnotation, BoundingBox2DAnnotations, BoundingBox3D,
    BoundingBox3DAnnotation, BoundingBox3DAnnotations, KeyLine2DAnnotation, KeyLine2DAnnotations,
    KeyPoint2D, KeyPoint2DAnnotation, KeyPoint2DAnnotations, Polygon2DAnnotation,
    Polygon2DAnnotations, PolygonPoint2D, Pose, Quaternion, Vector3,
};
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Finite dyadic doubles. NaN breaks equality checks, and short binary
/// fractions survive JSON text exactly.
fn finite() -> impl Strategy<Value = f64> {
    (-64_000_000i64..64_000_000).prop_map(|v| v as f64 / 64.0)
}

fn unit_ish() -> impl Strategy<Value = f64> {
    (-32i32..=96).prop_map(|v| f64::from(v) / 64.0)
}

pub fn arb_attributes() -> BoxedStrategy<Attributes> {
    proptest::collection::btree_map("[a-z_]{1,10}", "[ -~]{0,12}", 0..4).boxed()
}

pub fn arb_pose() -> BoxedStrategy<Pose> {
    (
        proptest::option::of((finite(), finite(), finite())),
        proptest::option::of((finite(), finite(), finite(), finite())),
        "[a-z_]{0,8}",
    )
        .prop_map(|(translation, rotation, frame)| Pose {
            translation: translation.map(|(x, y, z)| Vector3::new(x, y, z)),
            rotation: rotation.map(|(qx, qy, qz, qw)| Quaternion::new(qx, qy, qz, qw)),
            reference_coordinate_system: frame,
        })
        .boxed()
}

pub fn arb_bbox_2d() -> BoxedStrategy<BoundingBox2D> {
    (any::<i32>(), any::<i32>(), any::<u32>(), any::<u32>())
        .prop_map(|(x, y, w, h)| BoundingBox2D::new(x, y, w, h))
        .boxed()
}

/// 3D boxes including out-of-domain occlusion and truncation values,
/// which must survive the wire unchanged.
pub fn arb_bbox_3d() -> BoxedStrategy<BoundingBox3D> {
    (
        proptest::option::of(arb_pose()),
        (finite(), finite(), finite()),
        0u32..8,
        unit_ish(),
    )
        .prop_map(
            |(pose, (width, length, height), occlusion, truncation)| BoundingBox3D {
                pose,
                width,
                length,
                height,
                occlusion,
                truncation,
            },
        )
        .boxed()
}

pub fn arb_key_point() -> BoxedStrategy<KeyPoint2D> {
    (any::<i32>(), any::<i32>())
        .prop_map(|(x, y)| KeyPoint2D::new(x, y))
        .boxed()
}

pub fn arb_polygon_point() -> BoxedStrategy<PolygonPoint2D> {
    (any::<i32>(), any::<i32>())
        .prop_map(|(x, y)| PolygonPoint2D::new(x, y))
        .boxed()
}

pub fn arb_bbox_2d_annotation() -> BoxedStrategy<BoundingBox2DAnnotation> {
    (
        any::<u32>(),
        proptest::option::of(arb_bbox_2d()),
        any::<u32>(),
        any::<bool>(),
        any::<u32>(),
        arb_attributes(),
    )
        .prop_map(
            |(class_id, bbox, area, iscrowd, instance_id, attributes)| BoundingBox2DAnnotation {
                class_id,
                r#box: bbox,
                area,
                iscrowd,
                instance_id,
                attributes,
            },
        )
        .boxed()
}

pub fn arb_bbox_3d_annotation() -> BoxedStrategy<BoundingBox3DAnnotation> {
    (
        any::<u32>(),
        proptest::option::of(arb_bbox_3d()),
        any::<u32>(),
        arb_attributes(),
        any::<u32>(),
    )
        .prop_map(
            |(class_id, bbox, instance_id, attributes, num_points)| BoundingBox3DAnnotation {
                class_id,
                r#box: bbox,
                instance_id,
                attributes,
                num_points,
            },
        )
        .boxed()
}

pub fn arb_key_point_annotation() -> BoxedStrategy<KeyPoint2DAnnotation> {
    (
        any::<u32>(),
        proptest::option::of(arb_key_point()),
        arb_attributes(),
        "[a-z0-9_-]{0,12}",
        any::<u32>(),
    )
        .prop_map(
            |(class_id, point, attributes, key, instance_id)| KeyPoint2DAnnotation {
                class_id,
                point,
                attributes,
                key,
                instance_id,
            },
        )
        .boxed()
}

pub fn arb_key_line_annotation() -> BoxedStrategy<KeyLine2DAnnotation> {
    (
        any::<u32>(),
        proptest::collection::vec(arb_key_point(), 0..8),
        arb_attributes(),
        "[a-z0-9_-]{0,12}",
        any::<u32>(),
    )
        .prop_map(
            |(class_id, vertices, attributes, key, instance_id)| KeyLine2DAnnotation {
                class_id,
                vertices,
                attributes,
                key,
                instance_id,
            },
        )
        .boxed()
}

pub fn arb_polygon_annotation() -> BoxedStrategy<Polygon2DAnnotation> {
    (
        any::<u32>(),
        proptest::collection::vec(arb_polygon_point(), 0..8),
        arb_attributes(),
        any::<u32>(),
    )
        .prop_map(
            |(class_id, vertices, attributes, instance_id)| Polygon2DAnnotation {
                class_id,
                vertices,
                attributes,
                instance_id,
            },
        )
        .boxed()
}

pub fn arb_bbox_2d_collection(max: usize) -> BoxedStrategy<BoundingBox2DAnnotations> {
    proptest::collection::vec(arb_bbox_2d_annotation(), 0..=max)
        .prop_map(BoundingBox2DAnnotations::new)
        .boxed()
}

pub fn arb_bbox_3d_collection(max: usize) -> BoxedStrategy<BoundingBox3DAnnotations> {
    proptest::collection::vec(arb_bbox_3d_annotation(), 0..=max)
        .prop_map(BoundingBox3DAnnotations::new)
        .boxed()
}

pub fn arb_key_point_collection(max: usize) -> BoxedStrategy<KeyPoint2DAnnotations> {
    proptest::collection::vec(arb_key_point_annotation(), 0..=max)
        .prop_map(KeyPoint2DAnnotations::new)
        .boxed()
}

pub fn arb_key_line_collection(max: usize) -> BoxedStrategy<KeyLine2DAnnotations> {
    proptest::collection::vec(arb_key_line_annotation(), 0..=max)
        .prop_map(KeyLine2DAnnotations::new)
        .boxed()
}

pub fn arb_polygon_collection(max: usize) -> BoxedStrategy<Polygon2DAnnotations> {
    proptest::collection::vec(arb_polygon_annotation(), 0..=max)
        .prop_map(Polygon2DAnnotations::new)
        .boxed()
}
