//! Fuzz target for JSON collection parsing.
//!
//! This fuzzer feeds arbitrary byte sequences to the JSON parser,
//! checking for panics, crashes, or hangs.

#![no_main]

use annoschema::codec::json::from_json_slice;
use annoschema::schema::{BoundingBox3DAnnotations, Polygon2DAnnotations};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = from_json_slice::<BoundingBox3DAnnotations>(data);
    let _ = from_json_slice::<Polygon2DAnnotations>(data);
});
