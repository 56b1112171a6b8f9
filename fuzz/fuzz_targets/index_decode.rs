//! Fuzz target for annotation index decoding.

#![no_main]

use annoschema::codec::decode;
use annoschema::schema::AnnotationIndex;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(index) = decode::<AnnotationIndex>(data) {
        // Decode only accepts assigned codes, so every entry resolves.
        let _ = index.relative_paths().expect("decoded index has known codes");
    }
});
