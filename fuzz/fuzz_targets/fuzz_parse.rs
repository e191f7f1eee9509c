#![no_main]

use libfuzzer_sys::fuzz_target;
use whatwg_mime::{MediaType, Validity};

fuzz_target!(|data: &[u8]| {
    // Parsing is total: any byte sequence must produce a result without
    // panicking, and invalid results must carry no fields.
    let mime = MediaType::parse(data);
    match mime.validity() {
        Validity::Valid => {
            assert!(!mime.type_().is_empty());
            assert!(!mime.subtype().is_empty());
            assert!(mime.invalid_offset().is_none());
        }
        Validity::InvalidType | Validity::InvalidSubtype => {
            assert!(mime.type_().is_empty());
            assert!(mime.subtype().is_empty());
            assert!(mime.params().is_empty());
        }
    }
});
