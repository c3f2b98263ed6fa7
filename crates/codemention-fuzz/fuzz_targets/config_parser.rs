#![no_main]
use codemention_core::configuration::{decode_content, parse_configuration};
use codemention_core::ConfigFileType;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Fuzz YAML loading, and the contents API payload decoding in front of it
        let _ = parse_configuration(s, ConfigFileType::Yaml);
        if let Ok(decoded) = decode_content(s) {
            let _ = parse_configuration(&decoded, ConfigFileType::Yaml);
        }
    }
});
