//! Fuzz target for binary collection decoding.
//!
//! The first byte picks the annotation kind; the rest is fed to the
//! decoder. Anything that decodes must re-encode and decode to the same
//! value.

#![no_main]

use annoschema::codec::AnyCollection;
use annoschema::registry;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&selector, bytes)) = data.split_first() else {
        return;
    };
    let kinds: Vec<_> = registry::all().filter(|k| k.has_collection()).collect();
    let kind = kinds[usize::from(selector) % kinds.len()];

    if let Ok(collection) = AnyCollection::decode(kind, bytes) {
        let again = AnyCollection::decode(kind, &collection.encode())
            .expect("re-encoded collection must decode");
        assert_eq!(again.encode(), collection.encode());
    }
});
