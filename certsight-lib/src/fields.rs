//! Certificate record types.

use serde::Serialize;
use std::fmt;

/// Digest algorithm for fingerprint computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestAlgorithm {
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

/// A parsed X.509 certificate, flattened into display-ready fields.
///
/// Built once per parse call and never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateRecord {
    pub subject: DistinguishedName,
    pub issuer: DistinguishedName,
    /// Serial number as colon-separated uppercase hex.
    pub serial_number: String,
    /// Displayed version (encoded version + 1).
    pub version: u32,
    pub signature_algorithm: String,
    pub public_key: PublicKeyInfo,
    pub validity: Validity,
    /// Subject CN followed by SAN DNS names, deduplicated in first-seen order.
    pub domains: Vec<String>,
    /// SAN IP address entries.
    pub ip_addresses: Vec<String>,
    pub fingerprints: Fingerprints,
    pub extensions: Vec<Extension>,

    /// Every subject attribute in encoded order, including those
    /// `DistinguishedName` does not surface.
    #[serde(skip)]
    pub subject_attributes: Vec<NameAttribute>,
    #[serde(skip)]
    pub issuer_attributes: Vec<NameAttribute>,

    /// DER bytes of the certificate itself, without any trailing data.
    #[serde(skip)]
    pub raw_der: Vec<u8>,
}

/// One attribute of a name as `(dotted OID, value)`. Values that are not
/// strings are kept as hex of their content octets.
pub type NameAttribute = (String, String);

/// Subject or issuer name, restricted to the attributes we surface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistinguishedName {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizational_unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
}

impl DistinguishedName {
    /// Populated components as `(short name, value)` pairs in display order:
    /// C, ST, L, O, OU, CN, emailAddress.
    pub fn components(&self) -> Vec<(&'static str, &str)> {
        [
            ("C", &self.country),
            ("ST", &self.state),
            ("L", &self.locality),
            ("O", &self.organization),
            ("OU", &self.organizational_unit),
            ("CN", &self.common_name),
            ("emailAddress", &self.email_address),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
        .collect()
    }

    /// Format as a comma-separated one-line string.
    /// Example: "C=US, O=Org, CN=example.com"
    ///
    /// Values containing commas, equals signs, or backslashes are escaped.
    pub fn to_oneline(&self) -> String {
        let mut result = String::new();
        for (i, (k, v)) in self.components().into_iter().enumerate() {
            if i > 0 {
                result.push_str(", ");
            }
            result.push_str(k);
            result.push('=');
            for ch in v.chars() {
                match ch {
                    '\\' => result.push_str("\\\\"),
                    ',' => result.push_str("\\,"),
                    '=' => result.push_str("\\="),
                    _ => result.push(ch),
                }
            }
        }
        result
    }

    pub fn is_empty(&self) -> bool {
        self.components().is_empty()
    }
}

impl fmt::Display for DistinguishedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_oneline())
    }
}

/// Public key family as reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PublicKeyAlgorithm {
    #[serde(rename = "RSA")]
    Rsa,
    #[serde(rename = "DSA")]
    Dsa,
    #[serde(rename = "ECDSA")]
    Ecdsa,
    #[serde(rename = "ECC")]
    Ecc,
    Unknown,
}

impl PublicKeyAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rsa => "RSA",
            Self::Dsa => "DSA",
            Self::Ecdsa => "ECDSA",
            Self::Ecc => "ECC",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for PublicKeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Public key information.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicKeyInfo {
    pub algorithm: PublicKeyAlgorithm,
    /// Key size in bits; 0 when it cannot be determined.
    pub size_bits: u32,
    /// RSA public exponent in decimal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exponent: Option<String>,
    /// RSA modulus as uppercase hex, without leading zero bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modulus_hex: Option<String>,
    /// Named curve for elliptic-curve keys (e.g., "P-256", "Ed25519").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curve: Option<String>,
}

impl PublicKeyInfo {
    pub(crate) fn unknown() -> Self {
        Self {
            algorithm: PublicKeyAlgorithm::Unknown,
            size_bits: 0,
            exponent: None,
            modulus_hex: None,
            curve: None,
        }
    }
}

/// Validity window evaluated against a single instant.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Validity {
    pub not_before: DateTime,
    pub not_after: DateTime,
    /// `not_before <= now <= not_after`.
    pub is_valid: bool,
    /// Ceiling of the remaining time in days; negative once expired.
    pub days_until_expiry: i64,
    /// `now > not_after`.
    pub is_expired: bool,
}

/// SHA-1 and SHA-256 digests of the DER encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fingerprints {
    pub sha1: String,
    pub sha256: String,
}

/// A certificate extension.
#[derive(Debug, Clone, Serialize)]
pub struct Extension {
    /// Extension key, e.g. "keyUsage", or the dotted OID if unknown.
    pub name: String,
    /// OID as a dotted-decimal string.
    pub oid: String,
    pub critical: bool,
    pub value: ExtensionValue,
}

/// Rendered extension value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ExtensionValue {
    Single(String),
    List(Vec<String>),
}

impl ExtensionValue {
    /// Values joined with ", ".
    pub fn joined(&self) -> String {
        match self {
            Self::Single(s) => s.clone(),
            Self::List(items) => items.join(", "),
        }
    }
}

/// Date-time representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateTime {
    /// ISO 8601 formatted string.
    pub iso8601: String,
    /// Unix timestamp.
    pub timestamp: i64,
}

impl DateTime {
    pub(crate) fn from_timestamp(ts: i64) -> Self {
        let iso8601 = match ::time::OffsetDateTime::from_unix_timestamp(ts) {
            Ok(dt) => format!(
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
                dt.year(),
                u8::from(dt.month()),
                dt.day(),
                dt.hour(),
                dt.minute(),
                dt.second()
            ),
            Err(_) => ts.to_string(),
        };
        Self {
            iso8601,
            timestamp: ts,
        }
    }

    /// Format in OpenSSL's default date style: `Feb  3 23:57:06 2026 GMT`.
    pub fn to_openssl(&self) -> String {
        match ::time::OffsetDateTime::from_unix_timestamp(self.timestamp) {
            Ok(dt) => {
                let month = match u8::from(dt.month()) {
                    1 => "Jan",
                    2 => "Feb",
                    3 => "Mar",
                    4 => "Apr",
                    5 => "May",
                    6 => "Jun",
                    7 => "Jul",
                    8 => "Aug",
                    9 => "Sep",
                    10 => "Oct",
                    11 => "Nov",
                    12 => "Dec",
                    _ => "???",
                };
                format!(
                    "{} {:2} {:02}:{:02}:{:02} {} GMT",
                    month,
                    dt.day(),
                    dt.hour(),
                    dt.minute(),
                    dt.second(),
                    dt.year()
                )
            }
            Err(_) => self.iso8601.clone(),
        }
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_openssl())
    }
}

impl CertificateRecord {
    /// Look up an extension by key (e.g. "keyUsage").
    pub fn extension(&self, name: &str) -> Option<&Extension> {
        self.extensions.iter().find(|ext| ext.name == name)
    }

    pub fn has_extension(&self, name: &str) -> bool {
        self.extension(name).is_some()
    }

    /// Key Usage labels, if the extension is present.
    pub fn key_usage(&self) -> Option<Vec<String>> {
        self.extension("keyUsage").map(|ext| match &ext.value {
            ExtensionValue::List(items) => items.clone(),
            ExtensionValue::Single(s) => vec![s.clone()],
        })
    }

    /// Subject Alternative Name entries as rendered (e.g. "DNS:example.com").
    pub fn subject_alt_names(&self) -> Vec<String> {
        match self.extension("subjectAltName").map(|ext| &ext.value) {
            Some(ExtensionValue::List(items)) => items.clone(),
            Some(ExtensionValue::Single(s)) => vec![s.clone()],
            None => Vec::new(),
        }
    }

    /// Whether subject and issuer carry the same attributes.
    pub fn is_self_issued(&self) -> bool {
        self.subject_attributes == self.issuer_attributes
    }

    /// Compute the fingerprint of the certificate using the given digest algorithm.
    pub fn fingerprint(&self, algorithm: DigestAlgorithm) -> String {
        crate::fingerprint::compute_fingerprint(&self.raw_der, algorithm)
    }
}
