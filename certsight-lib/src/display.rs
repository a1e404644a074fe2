//! Human-readable and JSON formatting of certificate information.

use crate::fields::{CertificateRecord, DistinguishedName, Extension, PublicKeyAlgorithm};
use crate::oid;
use crate::util;
use crate::CertsightError;
use serde::Serialize;

const EXPIRY_SOON_DAYS: i64 = 30;
const MIN_FACTORED_KEY_BITS: u32 = 2048;

/// Render an OpenSSL-style text dump of the certificate.
///
/// Sections appear in the order Data, Issuer, Validity, Subject, Public Key,
/// Extensions, Fingerprints. Each populated field is printed once.
pub fn format_certificate_as_text(cert: &CertificateRecord) -> String {
    let mut out = String::new();

    out.push_str("Certificate:\n");
    out.push_str("    Data:\n");
    out.push_str(&format!("        Version: {}\n", cert.version));
    out.push_str(&format!("        Serial Number: {}\n", cert.serial_number));
    out.push_str(&format!(
        "        Signature Algorithm: {}\n",
        cert.signature_algorithm
    ));

    out.push_str("        Issuer:\n");
    push_dn(&mut out, &cert.issuer);

    out.push_str("        Validity:\n");
    out.push_str(&format!(
        "            Not Before: {}\n",
        cert.validity.not_before
    ));
    out.push_str(&format!(
        "            Not After : {}\n",
        cert.validity.not_after
    ));

    out.push_str("        Subject:\n");
    push_dn(&mut out, &cert.subject);

    let key = &cert.public_key;
    out.push_str("        Subject Public Key Info:\n");
    out.push_str(&format!(
        "            Public Key Algorithm: {}\n",
        key.algorithm
    ));
    out.push_str(&format!(
        "            Public Key Size: {} bits\n",
        key.size_bits
    ));
    if let Some(curve) = &key.curve {
        out.push_str(&format!("            Curve: {}\n", curve));
    }
    if let Some(exponent) = &key.exponent {
        out.push_str(&format!("            Exponent: {}\n", exponent));
    }
    if let Some(modulus) = &key.modulus_hex {
        out.push_str("            Modulus:\n");
        for line in util::wrap_lines(modulus, 64).lines() {
            out.push_str(&format!("                {}\n", line));
        }
    }

    if !cert.extensions.is_empty() {
        out.push_str("        X509v3 extensions:\n");
        for ext in &cert.extensions {
            push_extension(&mut out, ext);
        }
    }

    out.push_str("    Fingerprints:\n");
    out.push_str(&format!("        SHA1: {}\n", cert.fingerprints.sha1));
    out.push_str(&format!("        SHA256: {}\n", cert.fingerprints.sha256));

    out
}

fn push_dn(out: &mut String, dn: &DistinguishedName) {
    for (key, value) in dn.components() {
        out.push_str(&format!("            {}={}\n", key, value));
    }
}

fn push_extension(out: &mut String, ext: &Extension) {
    let label = oid::extension_label(&ext.name).unwrap_or(ext.name.as_str());
    let critical = if ext.critical { " critical" } else { "" };
    out.push_str(&format!("            {}:{}\n", label, critical));
    out.push_str(&format!("                {}\n", ext.value.joined()));
}

/// Overall status shown in a summary card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryStatus {
    Valid,
    Warning,
    Error,
}

/// Highlight applied to a single summary row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryKind {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryDetail {
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<SummaryKind>,
}

/// A compact overview of a certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificateSummary {
    pub title: String,
    pub subtitle: String,
    pub status: SummaryStatus,
    pub details: Vec<SummaryDetail>,
}

pub fn summarize_certificate(cert: &CertificateRecord) -> CertificateSummary {
    let validity = &cert.validity;
    let key = &cert.public_key;
    let expiring = validity.days_until_expiry <= EXPIRY_SOON_DAYS;
    let weak_key = matches!(key.algorithm, PublicKeyAlgorithm::Rsa | PublicKeyAlgorithm::Dsa)
        && key.size_bits < MIN_FACTORED_KEY_BITS;

    let status = if validity.is_expired {
        SummaryStatus::Error
    } else if expiring || weak_key {
        SummaryStatus::Warning
    } else {
        SummaryStatus::Valid
    };

    let row = |label: &str, value: String, kind: Option<SummaryKind>| SummaryDetail {
        label: label.to_string(),
        value,
        kind,
    };
    let or_na = |value: &Option<String>| value.clone().unwrap_or_else(|| "N/A".to_string());

    let details = vec![
        row("Common Name", or_na(&cert.subject.common_name), None),
        row("Issuer", or_na(&cert.issuer.common_name), None),
        row(
            "Validity",
            format!(
                "{} - {}",
                date_only(&validity.not_before.iso8601),
                date_only(&validity.not_after.iso8601)
            ),
            None,
        ),
        row(
            "Days Remaining",
            format!("{} days", validity.days_until_expiry),
            Some(if expiring {
                SummaryKind::Warning
            } else {
                SummaryKind::Success
            }),
        ),
        row(
            "Public Key",
            format!("{} {} bits", key.algorithm, key.size_bits),
            weak_key.then_some(SummaryKind::Error),
        ),
        row("Signature Algorithm", cert.signature_algorithm.clone(), None),
        row("SHA256 Fingerprint", cert.fingerprints.sha256.clone(), None),
    ];

    CertificateSummary {
        title: cert
            .subject
            .common_name
            .clone()
            .unwrap_or_else(|| "Unknown certificate".to_string()),
        subtitle: format!(
            "Issued by {}",
            cert.issuer.common_name.as_deref().unwrap_or("unknown CA")
        ),
        status,
        details,
    }
}

fn date_only(iso8601: &str) -> &str {
    iso8601.split('T').next().unwrap_or(iso8601)
}

/// Serialize a certificate record to a pretty-printed JSON string.
pub fn to_json(cert: &CertificateRecord) -> Result<String, CertsightError> {
    serde_json::to_string_pretty(cert).map_err(CertsightError::Json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{DateTime, ExtensionValue, PublicKeyInfo};
    use crate::security::tests::record;

    #[test]
    fn text_lists_each_section_once() {
        let mut cert = record();
        cert.issuer.country = Some("US".into());
        cert.issuer.organization = Some("Acme".into());
        let text = format_certificate_as_text(&cert);

        assert!(text.starts_with("Certificate:\n    Data:\n        Version: 3\n"));
        assert_eq!(text.matches("Signature Algorithm:").count(), 1);
        assert_eq!(text.matches("Serial Number:").count(), 1);
        assert!(text.contains(
            "            C=US\n            O=Acme\n            CN=example.com\n"
        ));
        assert!(text.contains("            Curve: P-256\n"));
        assert!(text.contains("X509v3 Basic Constraints:"));

        let sections: Vec<usize> = [
            "    Data:",
            "Issuer:",
            "Validity:",
            "Subject:",
            "Subject Public Key Info:",
            "X509v3 extensions:",
            "Fingerprints:",
        ]
        .iter()
        .map(|header| text.find(header).unwrap_or(usize::MAX))
        .collect();
        assert!(sections.iter().all(|&pos| pos != usize::MAX), "{text}");
        assert!(
            sections.windows(2).all(|w| matches!(w, [a, b] if a < b)),
            "{sections:?}"
        );
    }

    #[test]
    fn text_marks_critical_extensions() {
        let mut cert = record();
        cert.extensions = vec![Extension {
            name: "keyUsage".into(),
            oid: "2.5.29.15".into(),
            critical: true,
            value: ExtensionValue::List(vec!["Digital Signature".into(), "CRL Sign".into()]),
        }];
        let text = format_certificate_as_text(&cert);
        assert!(text.contains(
            "            X509v3 Key Usage: critical\n                Digital Signature, CRL Sign\n"
        ));
    }

    #[test]
    fn text_includes_rsa_parameters() {
        let mut cert = record();
        cert.public_key = PublicKeyInfo {
            algorithm: PublicKeyAlgorithm::Rsa,
            size_bits: 2048,
            exponent: Some("65537".into()),
            modulus_hex: Some("AB".repeat(40)),
            curve: None,
        };
        let text = format_certificate_as_text(&cert);
        assert!(text.contains("Public Key Algorithm: RSA\n"));
        assert!(text.contains("Public Key Size: 2048 bits\n"));
        assert!(text.contains("Exponent: 65537\n"));
        assert_eq!(text.matches("                AB").count(), 2);
    }

    #[test]
    fn summary_status_follows_validity_and_key() {
        let cert = record();
        let summary = summarize_certificate(&cert);
        assert_eq!(summary.status, SummaryStatus::Valid);
        assert_eq!(summary.title, "example.com");
        assert_eq!(summary.subtitle, "Issued by example.com");
        assert_eq!(summary.details.len(), 7);

        let mut soon = record();
        soon.validity.days_until_expiry = 10;
        assert_eq!(summarize_certificate(&soon).status, SummaryStatus::Warning);

        let mut weak = record();
        weak.public_key.algorithm = PublicKeyAlgorithm::Rsa;
        weak.public_key.size_bits = 1024;
        assert_eq!(summarize_certificate(&weak).status, SummaryStatus::Warning);

        let mut expired = record();
        expired.validity.is_expired = true;
        assert_eq!(summarize_certificate(&expired).status, SummaryStatus::Error);
    }

    #[test]
    fn ec_keys_are_not_flagged_as_short() {
        let summary = summarize_certificate(&record());
        assert_ne!(summary.status, SummaryStatus::Warning);
    }

    #[test]
    fn summary_dates_are_calendar_days() {
        let mut cert = record();
        cert.validity.not_before = DateTime::from_timestamp(1_770_163_026);
        let summary = summarize_certificate(&cert);
        let validity = summary
            .details
            .iter()
            .find(|d| d.label == "Validity")
            .map(|d| d.value.clone());
        assert_eq!(validity.as_deref(), Some("2026-02-03 - 1970-01-01"));
    }

    #[test]
    fn json_uses_camel_case_and_skips_der() {
        let json = to_json(&record()).unwrap_or_default();
        assert!(json.contains("\"serialNumber\""));
        assert!(json.contains("\"daysUntilExpiry\""));
        assert!(!json.contains("rawDer"));
    }
}
