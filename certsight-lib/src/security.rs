//! Security posture analysis over a parsed certificate.

use crate::fields::{CertificateRecord, PublicKeyAlgorithm};
use crate::options::InspectOptions;
use crate::parser;
use serde::Serialize;
use std::fmt;

/// Overall security classification, ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityLevel {
    High,
    Medium,
    Low,
    Critical,
}

impl SecurityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Critical => "critical",
        }
    }

    /// Move to `floor` if it is more severe than the current level.
    fn degrade_to(&mut self, floor: SecurityLevel) {
        if floor > *self {
            *self = floor;
        }
    }
}

impl fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Findings of the security decision table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityAnalysis {
    pub security_level: SecurityLevel,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
}

impl SecurityAnalysis {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parse and analysis combined into a single result.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionReport {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<CertificateRecord>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
    pub security_level: SecurityLevel,
}

/// Analyze a record with default thresholds.
pub fn analyze_security(cert: &CertificateRecord) -> SecurityAnalysis {
    analyze_security_with_options(cert, &InspectOptions::default())
}

pub fn analyze_security_with_options(
    cert: &CertificateRecord,
    options: &InspectOptions,
) -> SecurityAnalysis {
    let mut level = SecurityLevel::High;
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut recommendations = Vec::new();

    let validity = &cert.validity;
    if validity.is_expired {
        errors.push("certificate has expired".to_string());
        level.degrade_to(SecurityLevel::Critical);
    } else if validity.days_until_expiry <= options.expiry_warning_days {
        warnings.push(format!(
            "certificate expires in {} days",
            validity.days_until_expiry
        ));
        level.degrade_to(SecurityLevel::Medium);
    }

    let key = &cert.public_key;
    if key.algorithm == PublicKeyAlgorithm::Rsa {
        if key.size_bits < 2048 {
            errors.push(format!("RSA key too short: {} bits", key.size_bits));
            level.degrade_to(SecurityLevel::Critical);
        } else if key.size_bits < 3072 {
            warnings.push(format!(
                "RSA key is short: {} bits, 3072 bits or more recommended",
                key.size_bits
            ));
            level.degrade_to(SecurityLevel::Medium);
        }
    }

    let sig_lower = cert.signature_algorithm.to_ascii_lowercase();
    if ["md5", "sha1"].iter().any(|weak| sig_lower.contains(weak)) {
        errors.push(format!(
            "weak signature algorithm: {}",
            cert.signature_algorithm
        ));
        level.degrade_to(SecurityLevel::Critical);
    }

    if cert.version < 3 {
        warnings.push(format!(
            "outdated certificate version: v{}, v3 recommended",
            cert.version
        ));
        level.degrade_to(SecurityLevel::Medium);
    }

    if !cert.has_extension("basicConstraints") {
        warnings.push("missing Basic Constraints extension".to_string());
    }
    if !cert.has_extension("keyUsage") {
        warnings.push("missing Key Usage extension".to_string());
    }
    if !cert.has_extension("subjectAltName") {
        recommendations.push("add a Subject Alternative Name extension".to_string());
    }

    if validity.days_until_expiry <= options.renewal_recommendation_days {
        recommendations.push("renew the certificate soon".to_string());
    }
    if key.algorithm == PublicKeyAlgorithm::Rsa && key.size_bits < 4096 {
        recommendations.push("consider a 4096-bit RSA key or an ECC key".to_string());
    }
    recommendations.push("check certificate validity and security periodically".to_string());
    recommendations.push(
        "monitor certificate issuance through Certificate Transparency logs".to_string(),
    );

    tracing::debug!(
        level = %level,
        errors = errors.len(),
        warnings = warnings.len(),
        "security analysis"
    );

    SecurityAnalysis {
        security_level: level,
        errors,
        warnings,
        recommendations,
    }
}

/// Parse certificate text and analyze it in one step.
pub fn inspect_certificate(input: &str) -> InspectionReport {
    inspect_certificate_with_options(input, &InspectOptions::default())
}

pub fn inspect_certificate_with_options(
    input: &str,
    options: &InspectOptions,
) -> InspectionReport {
    match parser::parse_certificate_with_options(input, options) {
        Ok(cert) => {
            let analysis = analyze_security_with_options(&cert, options);
            InspectionReport {
                is_valid: analysis.is_valid(),
                certificate: Some(cert),
                errors: analysis.errors,
                warnings: analysis.warnings,
                recommendations: analysis.recommendations,
                security_level: analysis.security_level,
            }
        }
        Err(e) => InspectionReport {
            is_valid: false,
            certificate: None,
            errors: vec![e.to_string()],
            warnings: Vec::new(),
            recommendations: Vec::new(),
            security_level: SecurityLevel::Critical,
        },
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::fields::{
        DateTime, DistinguishedName, Extension, ExtensionValue, Fingerprints, PublicKeyInfo,
        Validity,
    };

    /// A healthy v3 ECDSA record with a year of validity left.
    pub(crate) fn record() -> CertificateRecord {
        let name = DistinguishedName {
            common_name: Some("example.com".into()),
            ..DistinguishedName::default()
        };
        let ext = |name: &str| Extension {
            name: name.into(),
            oid: String::new(),
            critical: false,
            value: ExtensionValue::Single(String::new()),
        };
        CertificateRecord {
            subject: name.clone(),
            issuer: name,
            subject_attributes: vec![(crate::oid::COMMON_NAME.into(), "example.com".into())],
            issuer_attributes: vec![(crate::oid::COMMON_NAME.into(), "example.com".into())],
            serial_number: "01".into(),
            version: 3,
            signature_algorithm: "ecdsa-with-SHA256".into(),
            public_key: PublicKeyInfo {
                algorithm: PublicKeyAlgorithm::Ecdsa,
                size_bits: 256,
                curve: Some("P-256".into()),
                ..PublicKeyInfo::unknown()
            },
            validity: Validity {
                not_before: DateTime::from_timestamp(0),
                not_after: DateTime::from_timestamp(0),
                is_valid: true,
                days_until_expiry: 365,
                is_expired: false,
            },
            domains: vec!["example.com".into()],
            ip_addresses: Vec::new(),
            fingerprints: Fingerprints {
                sha1: String::new(),
                sha256: String::new(),
            },
            extensions: vec![ext("basicConstraints"), ext("keyUsage"), ext("subjectAltName")],
            raw_der: Vec::new(),
        }
    }

    fn rsa(bits: u32) -> CertificateRecord {
        let mut cert = record();
        cert.public_key = PublicKeyInfo {
            algorithm: PublicKeyAlgorithm::Rsa,
            size_bits: bits,
            exponent: Some("65537".into()),
            ..PublicKeyInfo::unknown()
        };
        cert.signature_algorithm = "sha256WithRSAEncryption".into();
        cert
    }

    #[test]
    fn healthy_record_is_high() {
        let a = analyze_security(&record());
        assert_eq!(a.security_level, SecurityLevel::High);
        assert!(a.errors.is_empty());
        assert!(a.warnings.is_empty());
        assert_eq!(a.recommendations.len(), 2);
    }

    #[test]
    fn rsa_2048_is_medium_with_warning() {
        let a = analyze_security(&rsa(2048));
        assert_eq!(a.security_level, SecurityLevel::Medium);
        assert!(a.errors.is_empty());
        assert!(a.warnings.iter().any(|w| w.contains("2048 bits")));
        assert!(a.recommendations.iter().any(|r| r.contains("4096-bit")));
    }

    #[test]
    fn rsa_2047_is_critical() {
        let a = analyze_security(&rsa(2047));
        assert_eq!(a.security_level, SecurityLevel::Critical);
        assert_eq!(a.errors, vec!["RSA key too short: 2047 bits".to_string()]);
        assert!(!a.is_valid());
    }

    #[test]
    fn rsa_4096_has_no_key_findings() {
        let a = analyze_security(&rsa(4096));
        assert_eq!(a.security_level, SecurityLevel::High);
        assert!(!a.recommendations.iter().any(|r| r.contains("4096-bit")));
    }

    #[test]
    fn sha1_signature_is_critical_in_any_case() {
        for alg in [
            "sha1WithRSAEncryption",
            "SHA1-RSA",
            "ecdsa-with-Sha1",
            "md5WithRSAEncryption",
        ] {
            let mut cert = record();
            cert.signature_algorithm = alg.into();
            let a = analyze_security(&cert);
            assert_eq!(a.security_level, SecurityLevel::Critical, "{}", alg);
            assert!(a.errors.iter().any(|e| e.contains(alg)));
        }
    }

    #[test]
    fn expired_is_critical_and_stays_critical() {
        let mut cert = record();
        cert.validity.is_expired = true;
        cert.validity.is_valid = false;
        cert.validity.days_until_expiry = -3;
        cert.version = 1;
        let a = analyze_security(&cert);
        assert_eq!(a.security_level, SecurityLevel::Critical);
        assert_eq!(a.errors, vec!["certificate has expired".to_string()]);
        assert!(a.warnings.iter().any(|w| w.contains("v1")));
        assert!(!a.warnings.iter().any(|w| w.contains("expires in")));
    }

    #[test]
    fn expiring_soon_warns_with_day_count() {
        let mut cert = record();
        cert.validity.days_until_expiry = 30;
        let a = analyze_security(&cert);
        assert_eq!(a.security_level, SecurityLevel::Medium);
        assert_eq!(a.warnings, vec!["certificate expires in 30 days".to_string()]);
        assert!(a.recommendations.iter().any(|r| r.contains("renew")));
    }

    #[test]
    fn old_version_is_medium() {
        let mut cert = record();
        cert.version = 2;
        let a = analyze_security(&cert);
        assert_eq!(a.security_level, SecurityLevel::Medium);
        assert!(a.warnings.iter().any(|w| w.contains("v2")));
    }

    #[test]
    fn missing_extensions_warn_and_recommend() {
        let mut cert = record();
        cert.extensions.clear();
        let a = analyze_security(&cert);
        assert_eq!(a.security_level, SecurityLevel::High);
        assert_eq!(a.warnings.len(), 2);
        assert!(a
            .recommendations
            .iter()
            .any(|r| r.contains("Subject Alternative Name")));
    }

    #[test]
    fn extended_key_usage_does_not_count_as_key_usage() {
        let mut cert = record();
        cert.extensions.retain(|e| e.name != "keyUsage");
        cert.extensions.push(Extension {
            name: "extKeyUsage".into(),
            oid: String::new(),
            critical: false,
            value: ExtensionValue::List(Vec::new()),
        });
        let a = analyze_security(&cert);
        assert!(a.warnings.contains(&"missing Key Usage extension".to_string()));
    }

    #[test]
    fn levels_only_get_worse() {
        let mut level = SecurityLevel::Critical;
        level.degrade_to(SecurityLevel::Medium);
        assert_eq!(level, SecurityLevel::Critical);
        let mut level = SecurityLevel::High;
        level.degrade_to(SecurityLevel::Medium);
        assert_eq!(level, SecurityLevel::Medium);
    }

    #[test]
    fn inspect_reports_parse_failure_as_critical() {
        let report = inspect_certificate("not a certificate");
        assert!(!report.is_valid);
        assert!(report.certificate.is_none());
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.security_level, SecurityLevel::Critical);
    }

    #[test]
    fn level_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&SecurityLevel::Critical).ok().as_deref(),
            Some("\"critical\"")
        );
    }
}
