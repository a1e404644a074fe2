#![no_main]

use certsight_lib::{DigestAlgorithm, InspectOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Parsing must never panic, regardless of input.
    let options = InspectOptions {
        min_base64_len: 0,
        min_der_len: 0,
        ..InspectOptions::default()
    };
    if let Ok(cert) = certsight_lib::parse_der(data, &options) {
        let _ = cert.subject.to_oneline();
        let _ = cert.issuer.to_oneline();
        let _ = cert.key_usage();
        let _ = cert.subject_alt_names();
        let _ = cert.is_self_issued();
        let _ = cert.fingerprint(DigestAlgorithm::Sha512);

        let _ = certsight_lib::format_certificate_as_text(&cert);
        let _ = certsight_lib::to_json(&cert);
        let _ = certsight_lib::summarize_certificate(&cert);
        let _ = certsight_lib::analyze_security(&cert);
        let _ = certsight_lib::compare_certificates(&cert, &cert);

        let _ = certsight_lib::matches_hostname(&cert, "example.com");
        let _ = certsight_lib::matches_hostname(&cert, "1.2.3.4");

        // The PEM form of the certificate's own bytes must parse back to the same serial.
        let pem = certsight_lib::der_to_pem(&cert.raw_der);
        if let Ok(again) = certsight_lib::parse_certificate_with_options(&pem, &options) {
            assert_eq!(cert.serial_number, again.serial_number, "serial mismatch after PEM");
        }
    }
});
