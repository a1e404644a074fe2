#![no_main]

use certsight_lib::InspectOptions;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let options = InspectOptions::default();
    if let Ok(cleaned) = certsight_lib::normalize_certificate_input(text, &options) {
        assert!(!cleaned.chars().any(char::is_whitespace));
        assert_eq!(cleaned.len() % 4, 0);
    }
    let _ = certsight_lib::inspect_certificate(text);
    let _ = certsight_lib::validate_certificate(text, Some("example.com"));
    let _ = certsight_lib::validate_certificate_chain(&[text, text]);
});
