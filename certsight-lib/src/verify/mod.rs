//! Certificate chain validation.
//!
//! A chain is given leaf first. Every certificate is parsed, then checked for
//! its own time window, issuer/subject continuity with its neighbour, and a
//! signature made by the next certificate's key.

mod checks;
mod helpers;

use crate::check::{ValidationDetails, ValidationResult};
use crate::fields::CertificateRecord;
use crate::options::InspectOptions;
use crate::parser;
use rayon::prelude::*;

use checks::{
    check_chain_continuity, check_chain_signatures, check_chain_time_validity,
    check_root_self_issued,
};
use helpers::short_name;

/// Validate a leaf-to-root chain with default options.
pub fn validate_certificate_chain(inputs: &[&str]) -> ValidationResult {
    validate_certificate_chain_with_options(inputs, &InspectOptions::default())
}

/// Validate a leaf-to-root chain with explicit options.
///
/// A parse failure anywhere aborts validation with that certificate's error.
/// Continuity mismatches are warnings. Bad signatures and certificates outside
/// their validity window are errors.
pub fn validate_certificate_chain_with_options(
    inputs: &[&str],
    options: &InspectOptions,
) -> ValidationResult {
    if inputs.is_empty() {
        return ValidationResult::new(
            vec!["empty chain".to_string()],
            Vec::new(),
            ValidationDetails {
                hostname: None,
                chain: Some(false),
                time: Some(false),
                signature: Some(false),
            },
        );
    }

    let parsed: Vec<_> = inputs
        .par_iter()
        .map(|input| parser::parse_certificate_with_options(input, options))
        .collect();

    let mut records: Vec<CertificateRecord> = Vec::with_capacity(parsed.len());
    for (i, result) in parsed.into_iter().enumerate() {
        match result {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(position = i + 1, error = %e, "chain aborted on parse failure");
                return ValidationResult::failure(format!("certificate {}: {}", i + 1, e));
            }
        }
    }

    let labels: Vec<String> = records.iter().map(|r| short_name(&r.subject)).collect();

    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    check_chain_time_validity(&records, &labels, options, &mut errors, &mut warnings);
    let continuous = check_chain_continuity(&records, &labels, &mut warnings);
    let signatures_ok = check_chain_signatures(&records, &labels, &mut errors);
    check_root_self_issued(&records, &mut warnings);

    let details = ValidationDetails {
        hostname: None,
        chain: Some(continuous),
        time: Some(!records.iter().any(|r| r.validity.is_expired)),
        signature: Some(signatures_ok),
    };

    tracing::debug!(
        length = records.len(),
        errors = errors.len(),
        warnings = warnings.len(),
        "validated certificate chain"
    );
    ValidationResult::new(errors, warnings, details)
}
