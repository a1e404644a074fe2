//! Field-by-field certificate comparison and aggregate statistics.

use crate::fields::CertificateRecord;
use serde::Serialize;

const EXPIRING_SOON_DAYS: i64 = 30;

/// A field whose value differs between two certificates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDifference {
    pub field: &'static str,
    pub left: String,
    pub right: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificateComparison {
    pub identical: bool,
    pub differences: Vec<FieldDifference>,
}

type FieldGetter = fn(&CertificateRecord) -> String;

const COMPARED_FIELDS: &[(&str, FieldGetter)] = &[
    ("Serial Number", |c| c.serial_number.clone()),
    ("Common Name", |c| c.subject.common_name.clone().unwrap_or_default()),
    ("Issuer", |c| c.issuer.common_name.clone().unwrap_or_default()),
    ("Not Before", |c| c.validity.not_before.iso8601.clone()),
    ("Not After", |c| c.validity.not_after.iso8601.clone()),
    ("Public Key Algorithm", |c| c.public_key.algorithm.to_string()),
    ("Public Key Size", |c| c.public_key.size_bits.to_string()),
    ("Signature Algorithm", |c| c.signature_algorithm.clone()),
    ("SHA256 Fingerprint", |c| c.fingerprints.sha256.clone()),
];

/// Compare the identifying fields of two certificates.
pub fn compare_certificates(
    left: &CertificateRecord,
    right: &CertificateRecord,
) -> CertificateComparison {
    let differences: Vec<FieldDifference> = COMPARED_FIELDS
        .iter()
        .filter_map(|(field, get)| {
            let (l, r) = (get(left), get(right));
            (l != r).then(|| FieldDifference {
                field: *field,
                left: l,
                right: r,
            })
        })
        .collect();

    CertificateComparison {
        identical: differences.is_empty(),
        differences,
    }
}

/// Counts over a set of certificates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateStats {
    pub total: usize,
    pub valid: usize,
    pub expired: usize,
    pub expiring_soon: usize,
    /// Share of currently valid certificates, 0 to 100.
    pub valid_percentage: f64,
}

pub fn certificate_stats(records: &[CertificateRecord]) -> CertificateStats {
    let total = records.len();
    let valid = records.iter().filter(|c| c.validity.is_valid).count();
    let expired = records.iter().filter(|c| c.validity.is_expired).count();
    let expiring_soon = records
        .iter()
        .filter(|c| {
            !c.validity.is_expired && c.validity.days_until_expiry <= EXPIRING_SOON_DAYS
        })
        .count();
    let valid_percentage = if total == 0 {
        0.0
    } else {
        valid as f64 * 100.0 / total as f64
    };

    CertificateStats {
        total,
        valid,
        expired,
        expiring_soon,
        valid_percentage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::tests::record;

    #[test]
    fn same_record_is_identical() {
        let cert = record();
        let cmp = compare_certificates(&cert, &cert);
        assert!(cmp.identical);
        assert!(cmp.differences.is_empty());
    }

    #[test]
    fn differences_are_reported_in_field_order() {
        let left = record();
        let mut right = record();
        right.serial_number = "02".into();
        right.public_key.size_bits = 384;
        let cmp = compare_certificates(&left, &right);
        assert!(!cmp.identical);
        let fields: Vec<&str> = cmp.differences.iter().map(|d| d.field).collect();
        assert_eq!(fields, ["Serial Number", "Public Key Size"]);
        assert_eq!(cmp.differences.first().map(|d| d.right.as_str()), Some("02"));
    }

    #[test]
    fn stats_count_each_bucket() {
        let ok = record();
        let mut soon = record();
        soon.validity.days_until_expiry = 5;
        let mut expired = record();
        expired.validity.is_valid = false;
        expired.validity.is_expired = true;
        expired.validity.days_until_expiry = -1;

        let stats = certificate_stats(&[ok, soon, expired, record()]);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.valid, 3);
        assert_eq!(stats.expired, 1);
        assert_eq!(stats.expiring_soon, 1);
        assert!((stats.valid_percentage - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn stats_of_nothing() {
        let stats = certificate_stats(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.valid_percentage, 0.0);
    }
}
