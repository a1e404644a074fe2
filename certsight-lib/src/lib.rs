//! certsight-lib: Library for inspecting and validating X.509 certificates.
//!
//! Accepts certificate material as Base64 DER, PEM, or PEM wrapped in an
//! extra layer of Base64, and turns it into a [`CertificateRecord`]. On top of
//! the record it offers a security-posture analysis, hostname and validity
//! checks, chain continuity validation, and an OpenSSL-style text dump.

mod check;
mod compare;
mod convert;
mod display;
mod fields;
mod fingerprint;
mod input;
mod oid;
mod options;
mod parser;
mod security;
mod util;
pub mod verify;

pub use check::{
    matches_hostname, matches_ip, validate_certificate, validate_certificate_with_options,
    ValidationDetails, ValidationResult,
};
pub use compare::{
    certificate_stats, compare_certificates, CertificateComparison, CertificateStats,
    FieldDifference,
};
pub use convert::{convert_certificate, der_to_pem, pem_to_der, OutputFormat};
pub use display::{
    format_certificate_as_text, summarize_certificate, to_json, CertificateSummary,
    SummaryDetail, SummaryKind, SummaryStatus,
};
pub use fields::{
    CertificateRecord, DateTime, DigestAlgorithm, DistinguishedName, Extension, ExtensionValue,
    Fingerprints, NameAttribute, PublicKeyAlgorithm, PublicKeyInfo, Validity,
};
pub use fingerprint::compute_fingerprint;
pub use input::{decode_certificate_input, normalize_certificate_input};
pub use options::InspectOptions;
pub use parser::{parse_certificate, parse_certificate_with_options, parse_der};
pub use security::{
    analyze_security, analyze_security_with_options, inspect_certificate,
    inspect_certificate_with_options, InspectionReport, SecurityAnalysis, SecurityLevel,
};
pub use verify::{validate_certificate_chain, validate_certificate_chain_with_options};

/// Errors returned by certsight-lib.
#[derive(Debug, thiserror::Error)]
pub enum CertsightError {
    #[error("invalid format: {0}")]
    InputFormat(String),

    #[error("decode failed: {0}")]
    Decode(String),

    #[error("ASN.1 parse failed: {0}")]
    Parse(String),

    #[error("Unsupported feature: {0}")]
    Unsupported(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
