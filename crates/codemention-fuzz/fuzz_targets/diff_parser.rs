#![no_main]
use codemention_core::parse_unified_diff;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        for path in parse_unified_diff(s) {
            assert_ne!(path, "/dev/null");
        }
    }
});
