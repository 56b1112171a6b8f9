use annoschema::codec::json::{from_json_str, to_json_string};
use annoschema::codec::{decode, encode};
use annoschema::schema::{
    BoundingBox2DAnnotations, BoundingBox3D, BoundingBox3DAnnotations, KeyLine2DAnnotations,
    KeyPoint2DAnnotations, Polygon2DAnnotations,
};
use proptest::prelude::*;

mod proptest_helpers;

proptest! {
    #![proptest_config(proptest_helpers::proptest_config())]

    #[test]
    fn bbox_2d_collection_wire_roundtrip(collection in proptest_helpers::arb_bbox_2d_collection(12)) {
        let restored: BoundingBox2DAnnotations = decode(&encode(&collection)).expect("decode");
        prop_assert_eq!(collection, restored);
    }

    #[test]
    fn bbox_3d_collection_wire_roundtrip(collection in proptest_helpers::arb_bbox_3d_collection(12)) {
        let restored: BoundingBox3DAnnotations = decode(&encode(&collection)).expect("decode");
        prop_assert_eq!(collection, restored);
    }

    #[test]
    fn key_point_collection_wire_roundtrip(collection in proptest_helpers::arb_key_point_collection(12)) {
        let restored: KeyPoint2DAnnotations = decode(&encode(&collection)).expect("decode");
        prop_assert_eq!(collection, restored);
    }

    #[test]
    fn key_line_collection_wire_roundtrip(collection in proptest_helpers::arb_key_line_collection(12)) {
        let restored: KeyLine2DAnnotations = decode(&encode(&collection)).expect("decode");
        prop_assert_eq!(collection, restored);
    }

    #[test]
    fn polygon_collection_wire_roundtrip(collection in proptest_helpers::arb_polygon_collection(12)) {
        let restored: Polygon2DAnnotations = decode(&encode(&collection)).expect("decode");
        prop_assert_eq!(collection, restored);
    }

    #[test]
    fn bbox_3d_leaf_wire_roundtrip(bbox in proptest_helpers::arb_bbox_3d()) {
        let restored: BoundingBox3D = decode(&encode(&bbox)).expect("decode");
        prop_assert_eq!(bbox, restored);
    }

    #[test]
    fn encoding_is_stable_across_roundtrip(collection in proptest_helpers::arb_bbox_2d_collection(12)) {
        let first = encode(&collection);
        let restored: BoundingBox2DAnnotations = decode(&first).expect("decode");
        prop_assert_eq!(first, encode(&restored));
    }

    #[test]
    fn bbox_2d_collection_json_roundtrip(collection in proptest_helpers::arb_bbox_2d_collection(8)) {
        let json = to_json_string(&collection).expect("serialize json");
        let restored: BoundingBox2DAnnotations = from_json_str(&json).expect("parse json");
        prop_assert_eq!(collection, restored);
    }

    #[test]
    fn bbox_3d_collection_json_roundtrip(collection in proptest_helpers::arb_bbox_3d_collection(8)) {
        let json = to_json_string(&collection).expect("serialize json");
        let restored: BoundingBox3DAnnotations = from_json_str(&json).expect("parse json");
        prop_assert_eq!(collection, restored);
    }

    #[test]
    fn key_point_collection_json_roundtrip(collection in proptest_helpers::arb_key_point_collection(8)) {
        let json = to_json_string(&collection).expect("serialize json");
        let restored: KeyPoint2DAnnotations = from_json_str(&json).expect("parse json");
        prop_assert_eq!(collection, restored);
    }

    #[test]
    fn key_line_collection_json_roundtrip(collection in proptest_helpers::arb_key_line_collection(8)) {
        let json = to_json_string(&collection).expect("serialize json");
        let restored: KeyLine2DAnnotations = from_json_str(&json).expect("parse json");
        prop_assert_eq!(collection, restored);
    }

    #[test]
    fn polygon_collection_json_roundtrip(collection in proptest_helpers::arb_polygon_collection(8)) {
        let json = to_json_string(&collection).expect("serialize json");
        let restored: Polygon2DAnnotations = from_json_str(&json).expect("parse json");
        prop_assert_eq!(collection, restored);
    }

    #[test]
    fn decode_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
        let _ = decode::<BoundingBox3DAnnotations>(&bytes);
        let _ = decode::<BoundingBox2DAnnotations>(&bytes);
        let _ = decode::<Polygon2DAnnotations>(&bytes);
    }
}
