#![no_main]

use libfuzzer_sys::fuzz_target;
use whatwg_mime::MediaType;

fuzz_target!(|data: &[u8]| {
    // The canonical serialization of a valid parse is a fixpoint:
    // reparsing it and serializing again must yield the same string.
    let mime = MediaType::parse(data);
    if mime.is_valid() {
        let canonical = mime.to_string();
        let reparsed = MediaType::parse(canonical.as_bytes());
        assert!(reparsed.is_valid());
        assert_eq!(reparsed.to_string(), canonical);
    }
});
