//! Certificate validity checks: expiry, hostname, and IP matching.

use crate::fields::CertificateRecord;
use crate::options::InspectOptions;
use crate::parser;
use serde::Serialize;
use std::net::IpAddr;

/// Per-check outcome. `None` means the check did not apply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<bool>,
}

impl ValidationDetails {
    /// Every check reported as failed.
    pub(crate) fn all_failed() -> Self {
        Self {
            hostname: Some(false),
            chain: Some(false),
            time: Some(false),
            signature: Some(false),
        }
    }
}

/// Outcome of certificate or chain validation.
///
/// `is_valid` always equals `errors.is_empty()`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    is_valid: bool,
    errors: Vec<String>,
    warnings: Vec<String>,
    details: ValidationDetails,
}

impl ValidationResult {
    pub fn new(errors: Vec<String>, warnings: Vec<String>, details: ValidationDetails) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
            details,
        }
    }

    /// A result carrying a single blocking error and every check failed.
    pub(crate) fn failure(message: String) -> Self {
        Self::new(vec![message], Vec::new(), ValidationDetails::all_failed())
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn details(&self) -> &ValidationDetails {
        &self.details
    }
}

/// Check if the certificate matches the given hostname.
///
/// IP literals are compared against the SAN IP entries. DNS names match a
/// domain exactly (ASCII case-insensitive, trailing dot ignored) or through a
/// leading `*.` wildcard covering exactly one label.
pub fn matches_hostname(cert: &CertificateRecord, hostname: &str) -> bool {
    if hostname.parse::<IpAddr>().is_ok() {
        return matches_ip(cert, hostname);
    }
    let host = normalize_name(hostname);
    if host.is_empty() {
        return false;
    }
    cert.domains
        .iter()
        .any(|domain| name_matches(&normalize_name(domain), &host))
}

/// Check if the certificate lists the given IP address in its SAN.
pub fn matches_ip(cert: &CertificateRecord, ip: &str) -> bool {
    let Ok(wanted) = ip.parse::<IpAddr>() else {
        return false;
    };
    cert.ip_addresses
        .iter()
        .filter_map(|entry| entry.parse::<IpAddr>().ok())
        .any(|listed| listed == wanted)
}

fn normalize_name(name: &str) -> String {
    name.trim().trim_end_matches('.').to_ascii_lowercase()
}

fn name_matches(pattern: &str, host: &str) -> bool {
    match pattern.strip_prefix("*.") {
        Some(suffix) => match host.split_once('.') {
            Some((label, rest)) => !label.is_empty() && !suffix.is_empty() && rest == suffix,
            None => false,
        },
        None => pattern == host,
    }
}

/// Validate a single certificate's time window and, optionally, a hostname.
pub fn validate_certificate(input: &str, hostname: Option<&str>) -> ValidationResult {
    validate_certificate_with_options(input, hostname, &InspectOptions::default())
}

pub fn validate_certificate_with_options(
    input: &str,
    hostname: Option<&str>,
    options: &InspectOptions,
) -> ValidationResult {
    let cert = match parser::parse_certificate_with_options(input, options) {
        Ok(cert) => cert,
        Err(e) => return ValidationResult::failure(e.to_string()),
    };

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut details = ValidationDetails {
        time: Some(true),
        ..ValidationDetails::default()
    };

    let validity = &cert.validity;
    if !validity.is_valid {
        errors.push("certificate is expired or not yet valid".to_string());
        details.time = Some(false);
    } else if validity.days_until_expiry < options.expiry_warning_days {
        warnings.push(format!(
            "certificate expires in {} days",
            validity.days_until_expiry
        ));
    }

    if let Some(host) = hostname {
        let matched = matches_hostname(&cert, host);
        if !matched {
            errors.push(format!("certificate does not match hostname: {}", host));
        }
        details.hostname = Some(matched);
    }

    if cert.is_self_issued() {
        let verified = verify_self_signature(&cert);
        if !verified {
            errors.push("self-signature verification failed".to_string());
        }
        details.signature = Some(verified);
    }

    tracing::debug!(errors = errors.len(), warnings = warnings.len(), "validated certificate");
    ValidationResult::new(errors, warnings, details)
}

fn verify_self_signature(cert: &CertificateRecord) -> bool {
    match parser::parse_x509(&cert.raw_der) {
        Ok((x509, _)) => x509.verify_signature(None).is_ok(),
        Err(_) => false,
    }
}
