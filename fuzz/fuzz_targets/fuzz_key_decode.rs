//! Fuzz target for the key wire format and the byte-level comparator.
//!
//! Key bytes come from the host's storage and may be corrupted. Decoding must
//! either fail with `MalformedKey` or yield a key that encodes back to the
//! same bytes; comparing two decodable keys must never panic unless the index
//! side is flagged in partial mode.

#![no_main]

use libfuzzer_sys::fuzz_target;
use permuterm_core::{compare_encoded, Key};

fuzz_target!(|data: &[u8]| {
    if let Ok(key) = Key::decode(data) {
        assert_eq!(key.encode(), data);
        assert_eq!(key.encoded_len(), data.len());
    }

    // First byte picks the split point between index and search key.
    let Some((&split, rest)) = data.split_first() else {
        return;
    };
    let (index, search) = rest.split_at(usize::from(split).min(rest.len()));

    let Ok(index_key) = Key::decode(index) else {
        return;
    };
    let partial = !index_key.is_flagged();
    let _ = compare_encoded(index, search, partial);
});
