#![no_main]
use codemention_core::parse_codeowners_like;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = parse_codeowners_like(s);
    }
});
