//! Object identifier constants and name lookup tables.

// ── Distinguished Name attributes (X.520 / PKCS#9) ───────────────────────

pub const COMMON_NAME: &str = "2.5.4.3";
pub const COUNTRY: &str = "2.5.4.6";
pub const LOCALITY: &str = "2.5.4.7";
pub const STATE_OR_PROVINCE: &str = "2.5.4.8";
pub const ORGANIZATION: &str = "2.5.4.10";
pub const ORGANIZATIONAL_UNIT: &str = "2.5.4.11";
pub const EMAIL_ADDRESS: &str = "1.2.840.113549.1.9.1";

// ── Signature algorithms ─────────────────────────────────────────────────

pub const MD2_WITH_RSA: &str = "1.2.840.113549.1.1.2";
pub const MD5_WITH_RSA: &str = "1.2.840.113549.1.1.4";
pub const SHA1_WITH_RSA: &str = "1.2.840.113549.1.1.5";
pub const RSASSA_PSS: &str = "1.2.840.113549.1.1.10";
pub const SHA256_WITH_RSA: &str = "1.2.840.113549.1.1.11";
pub const SHA384_WITH_RSA: &str = "1.2.840.113549.1.1.12";
pub const SHA512_WITH_RSA: &str = "1.2.840.113549.1.1.13";
pub const SHA224_WITH_RSA: &str = "1.2.840.113549.1.1.14";
pub const DSA_WITH_SHA1: &str = "1.2.840.10040.4.3";
pub const DSA_WITH_SHA256: &str = "2.16.840.1.101.3.4.3.2";
pub const ECDSA_WITH_SHA1: &str = "1.2.840.10045.4.1";
pub const ECDSA_WITH_SHA256: &str = "1.2.840.10045.4.3.2";
pub const ECDSA_WITH_SHA384: &str = "1.2.840.10045.4.3.3";
pub const ECDSA_WITH_SHA512: &str = "1.2.840.10045.4.3.4";

// ── Public key types ─────────────────────────────────────────────────────

pub const RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.1";
pub const DSA: &str = "1.2.840.10040.4.1";
pub const EC_PUBLIC_KEY: &str = "1.2.840.10045.2.1";
pub const X25519: &str = "1.3.101.110";
pub const X448: &str = "1.3.101.111";
pub const ED25519: &str = "1.3.101.112";
pub const ED448: &str = "1.3.101.113";

// ── Named elliptic curves ────────────────────────────────────────────────

pub const CURVE_P192: &str = "1.2.840.10045.3.1.1";
pub const CURVE_P224: &str = "1.3.132.0.33";
pub const CURVE_P256: &str = "1.2.840.10045.3.1.7";
pub const CURVE_P384: &str = "1.3.132.0.34";
pub const CURVE_P521: &str = "1.3.132.0.35";
pub const CURVE_SECP256K1: &str = "1.3.132.0.10";

// ── X.509v3 extensions (RFC 5280 Section 4.2) ───────────────────────────

pub const EXT_SUBJECT_KEY_ID: &str = "2.5.29.14";
pub const EXT_KEY_USAGE: &str = "2.5.29.15";
pub const EXT_PRIVATE_KEY_USAGE_PERIOD: &str = "2.5.29.16";
pub const EXT_SUBJECT_ALT_NAME: &str = "2.5.29.17";
pub const EXT_ISSUER_ALT_NAME: &str = "2.5.29.18";
pub const EXT_BASIC_CONSTRAINTS: &str = "2.5.29.19";
pub const EXT_NAME_CONSTRAINTS: &str = "2.5.29.30";
pub const EXT_CRL_DISTRIBUTION_POINTS: &str = "2.5.29.31";
pub const EXT_CERTIFICATE_POLICIES: &str = "2.5.29.32";
pub const EXT_POLICY_MAPPINGS: &str = "2.5.29.33";
pub const EXT_AUTHORITY_KEY_ID: &str = "2.5.29.35";
pub const EXT_POLICY_CONSTRAINTS: &str = "2.5.29.36";
pub const EXT_EXTENDED_KEY_USAGE: &str = "2.5.29.37";
pub const EXT_INHIBIT_ANY_POLICY: &str = "2.5.29.54";
pub const EXT_AUTHORITY_INFO_ACCESS: &str = "1.3.6.1.5.5.7.1.1";
pub const EXT_SUBJECT_INFO_ACCESS: &str = "1.3.6.1.5.5.7.1.11";
pub const EXT_TLS_FEATURE: &str = "1.3.6.1.5.5.7.1.12";
pub const EXT_SCT_LIST: &str = "1.3.6.1.4.1.11129.2.4.2";
pub const EXT_CT_POISON: &str = "1.3.6.1.4.1.11129.2.4.3";
pub const EXT_NETSCAPE_CERT_TYPE: &str = "2.16.840.1.113730.1.1";
pub const EXT_NETSCAPE_COMMENT: &str = "2.16.840.1.113730.1.13";

// ── Access methods ───────────────────────────────────────────────────────

pub const ACCESS_OCSP: &str = "1.3.6.1.5.5.7.48.1";
pub const ACCESS_CA_ISSUERS: &str = "1.3.6.1.5.5.7.48.2";

// ── Extended Key Usage values not covered by x509-parser's flags ─────────

pub const EKU_IPSEC_END_SYSTEM: &str = "1.3.6.1.5.5.7.3.5";
pub const EKU_IPSEC_TUNNEL: &str = "1.3.6.1.5.5.7.3.6";
pub const EKU_IPSEC_USER: &str = "1.3.6.1.5.5.7.3.7";
pub const EKU_MS_SERVER_GATED_CRYPTO: &str = "1.3.6.1.4.1.311.10.3.3";
pub const EKU_NS_SERVER_GATED_CRYPTO: &str = "2.16.840.1.113730.4.1";

/// Resolve a signature algorithm OID to its conventional name.
pub fn signature_algorithm_name(oid_str: &str) -> Option<&'static str> {
    let name = match oid_str {
        MD2_WITH_RSA => "md2WithRSAEncryption",
        MD5_WITH_RSA => "md5WithRSAEncryption",
        SHA1_WITH_RSA => "sha1WithRSAEncryption",
        RSASSA_PSS => "RSASSA-PSS",
        SHA224_WITH_RSA => "sha224WithRSAEncryption",
        SHA256_WITH_RSA => "sha256WithRSAEncryption",
        SHA384_WITH_RSA => "sha384WithRSAEncryption",
        SHA512_WITH_RSA => "sha512WithRSAEncryption",
        DSA_WITH_SHA1 => "dsa-with-sha1",
        DSA_WITH_SHA256 => "dsa-with-sha256",
        ECDSA_WITH_SHA1 => "ecdsa-with-SHA1",
        ECDSA_WITH_SHA256 => "ecdsa-with-SHA256",
        ECDSA_WITH_SHA384 => "ecdsa-with-SHA384",
        ECDSA_WITH_SHA512 => "ecdsa-with-SHA512",
        ED25519 => "Ed25519",
        ED448 => "Ed448",
        _ => return None,
    };
    Some(name)
}

/// Resolve a named curve OID to `(display name, key size in bits)`.
pub fn curve_info(oid_str: &str) -> Option<(&'static str, u32)> {
    match oid_str {
        CURVE_P192 => Some(("P-192", 192)),
        CURVE_P224 => Some(("P-224", 224)),
        CURVE_P256 => Some(("P-256", 256)),
        CURVE_P384 => Some(("P-384", 384)),
        CURVE_P521 => Some(("P-521", 521)),
        CURVE_SECP256K1 => Some(("secp256k1", 256)),
        _ => None,
    }
}

/// Resolve an extension OID to the key used in [`crate::CertificateRecord::extensions`].
pub fn extension_name(oid_str: &str) -> Option<&'static str> {
    let name = match oid_str {
        EXT_SUBJECT_KEY_ID => "subjectKeyIdentifier",
        EXT_KEY_USAGE => "keyUsage",
        EXT_PRIVATE_KEY_USAGE_PERIOD => "privateKeyUsagePeriod",
        EXT_SUBJECT_ALT_NAME => "subjectAltName",
        EXT_ISSUER_ALT_NAME => "issuerAltName",
        EXT_BASIC_CONSTRAINTS => "basicConstraints",
        EXT_NAME_CONSTRAINTS => "nameConstraints",
        EXT_CRL_DISTRIBUTION_POINTS => "cRLDistributionPoints",
        EXT_CERTIFICATE_POLICIES => "certificatePolicies",
        EXT_POLICY_MAPPINGS => "policyMappings",
        EXT_AUTHORITY_KEY_ID => "authorityKeyIdentifier",
        EXT_POLICY_CONSTRAINTS => "policyConstraints",
        EXT_EXTENDED_KEY_USAGE => "extKeyUsage",
        EXT_INHIBIT_ANY_POLICY => "inhibitAnyPolicy",
        EXT_AUTHORITY_INFO_ACCESS => "authorityInfoAccess",
        EXT_SUBJECT_INFO_ACCESS => "subjectInfoAccess",
        EXT_TLS_FEATURE => "tlsFeature",
        EXT_SCT_LIST => "ctPrecertificateScts",
        EXT_CT_POISON => "ctPrecertificatePoison",
        EXT_NETSCAPE_CERT_TYPE => "nsCertType",
        EXT_NETSCAPE_COMMENT => "nsComment",
        _ => return None,
    };
    Some(name)
}

/// Human-readable label for an extension key, as shown in text dumps.
pub fn extension_label(name: &str) -> Option<&'static str> {
    let label = match name {
        "subjectKeyIdentifier" => "X509v3 Subject Key Identifier",
        "keyUsage" => "X509v3 Key Usage",
        "subjectAltName" => "X509v3 Subject Alternative Name",
        "issuerAltName" => "X509v3 Issuer Alternative Name",
        "basicConstraints" => "X509v3 Basic Constraints",
        "nameConstraints" => "X509v3 Name Constraints",
        "cRLDistributionPoints" => "X509v3 CRL Distribution Points",
        "certificatePolicies" => "X509v3 Certificate Policies",
        "authorityKeyIdentifier" => "X509v3 Authority Key Identifier",
        "extKeyUsage" => "X509v3 Extended Key Usage",
        "authorityInfoAccess" => "Authority Information Access",
        "ctPrecertificateScts" => "CT Precertificate SCTs",
        "nsComment" => "Netscape Comment",
        _ => return None,
    };
    Some(label)
}

/// Name uncommon EKU OIDs that x509-parser reports in `other`.
pub fn eku_name(oid_str: &str) -> String {
    match oid_str {
        EKU_IPSEC_END_SYSTEM => "IPSec End System".into(),
        EKU_IPSEC_TUNNEL => "IPSec Tunnel".into(),
        EKU_IPSEC_USER => "IPSec User".into(),
        EKU_MS_SERVER_GATED_CRYPTO => "Microsoft Server Gated Crypto".into(),
        EKU_NS_SERVER_GATED_CRYPTO => "Netscape Server Gated Crypto".into(),
        other => other.to_string(),
    }
}
