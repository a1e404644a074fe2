//! Individual chain checks, each appending its findings to the shared lists.

use crate::fields::CertificateRecord;
use crate::options::InspectOptions;
use crate::parser;

/// Per-certificate time window checks. Expired and not-yet-valid certificates
/// are errors; certificates close to expiry are warnings.
pub(crate) fn check_chain_time_validity(
    records: &[CertificateRecord],
    labels: &[String],
    options: &InspectOptions,
    errors: &mut Vec<String>,
    warnings: &mut Vec<String>,
) {
    for (i, (cert, label)) in records.iter().zip(labels).enumerate() {
        let validity = &cert.validity;
        if validity.is_expired {
            errors.push(format!("certificate {} ({}) has expired", i + 1, label));
        } else if !validity.is_valid {
            errors.push(format!("certificate {} ({}) is not yet valid", i + 1, label));
        } else if validity.days_until_expiry < options.expiry_warning_days {
            warnings.push(format!(
                "certificate {} ({}) expires in {} days",
                i + 1,
                label,
                validity.days_until_expiry
            ));
        }
    }
}

/// Issuer/subject continuity between adjacent certificates.
///
/// Returns `true` when every link is continuous.
pub(crate) fn check_chain_continuity(
    records: &[CertificateRecord],
    labels: &[String],
    warnings: &mut Vec<String>,
) -> bool {
    let mut continuous = true;
    for (i, (child, parent)) in records.iter().zip(records.iter().skip(1)).enumerate() {
        if child.issuer_attributes != parent.subject_attributes {
            continuous = false;
            warnings.push(format!(
                "issuer of certificate {} ({}) does not match subject of certificate {} ({})",
                i + 1,
                label_at(labels, i),
                i + 2,
                label_at(labels, i + 1)
            ));
        }
    }
    continuous
}

/// Verify each certificate's signature with the next certificate's key.
///
/// Returns `true` when every signature verifies.
pub(crate) fn check_chain_signatures(
    records: &[CertificateRecord],
    labels: &[String],
    errors: &mut Vec<String>,
) -> bool {
    let mut verified = true;
    for (i, (child, parent)) in records.iter().zip(records.iter().skip(1)).enumerate() {
        if let Err(e) = verify_link(child, parent) {
            verified = false;
            errors.push(format!(
                "signature verification failed ({} -> {}): {}",
                label_at(labels, i),
                label_at(labels, i + 1),
                e
            ));
        }
    }
    verified
}

fn verify_link(child: &CertificateRecord, parent: &CertificateRecord) -> Result<(), String> {
    let (child_x509, _) = parser::parse_x509(&child.raw_der).map_err(|e| e.to_string())?;
    let (parent_x509, _) = parser::parse_x509(&parent.raw_der).map_err(|e| e.to_string())?;
    child_x509
        .verify_signature(Some(parent_x509.public_key()))
        .map_err(|e| e.to_string())
}

/// The last certificate should be a self-issued root.
pub(crate) fn check_root_self_issued(records: &[CertificateRecord], warnings: &mut Vec<String>) {
    if let Some(root) = records.last() {
        if !root.is_self_issued() {
            warnings.push("root is not self-signed".to_string());
        }
    }
}

fn label_at(labels: &[String], index: usize) -> &str {
    labels.get(index).map(String::as_str).unwrap_or("Unknown")
}
