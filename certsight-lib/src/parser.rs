//! Certificate parsing and field extraction.

use crate::fields::{
    CertificateRecord, DateTime, DistinguishedName, Extension, ExtensionValue, NameAttribute,
    PublicKeyAlgorithm, PublicKeyInfo, Validity,
};
use crate::fingerprint;
use crate::input;
use crate::oid;
use crate::options::InspectOptions;
use crate::util;
use crate::CertsightError;
use x509_parser::prelude::*;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Parse certificate text (Base64 DER, PEM, or Base64-wrapped PEM).
pub fn parse_certificate(input: &str) -> Result<CertificateRecord, CertsightError> {
    parse_certificate_with_options(input, &InspectOptions::default())
}

/// Parse certificate text with explicit options.
pub fn parse_certificate_with_options(
    input: &str,
    options: &InspectOptions,
) -> Result<CertificateRecord, CertsightError> {
    let der = input::decode_certificate_input(input, options)?;
    parse_der(&der, options)
}

/// Parse a certificate from DER bytes.
pub fn parse_der(
    input: &[u8],
    options: &InspectOptions,
) -> Result<CertificateRecord, CertsightError> {
    let (x509, cert_der) = parse_x509(input)?;
    tracing::debug!(bytes = cert_der.len(), "parsed X.509 structure");
    build_record(&x509, cert_der, options)
}

/// Run the structural parse, returning the certificate and the exact bytes it
/// occupies (trailing data excluded).
pub(crate) fn parse_x509(input: &[u8]) -> Result<(X509Certificate<'_>, &[u8]), CertsightError> {
    let (remaining, x509) =
        X509Certificate::from_der(input).map_err(|e| CertsightError::Parse(format!("{}", e)))?;
    let cert_len = input.len() - remaining.len();
    let cert_der = input.get(..cert_len).unwrap_or(input);
    Ok((x509, cert_der))
}

fn build_record(
    x509: &X509Certificate,
    raw_der: &[u8],
    options: &InspectOptions,
) -> Result<CertificateRecord, CertsightError> {
    let tbs = &x509.tbs_certificate;

    let raw_version = tbs.version.0;
    if raw_version > 2 {
        return Err(CertsightError::Parse(format!(
            "unsupported X.509 version {} (expected v1, v2, or v3)",
            raw_version + 1
        )));
    }

    let subject = build_dn(&tbs.subject);
    let issuer = build_dn(&tbs.issuer);
    let extensions: Vec<Extension> = tbs.extensions().iter().map(build_extension).collect();
    let (domains, ip_addresses) = collect_names(&subject, tbs.extensions());

    Ok(CertificateRecord {
        serial_number: format_serial(tbs.raw_serial()),
        version: raw_version + 1,
        signature_algorithm: format_sig_algorithm(&x509.signature_algorithm),
        public_key: build_public_key_info(&tbs.subject_pki),
        validity: build_validity(
            tbs.validity.not_before.timestamp(),
            tbs.validity.not_after.timestamp(),
            options.now_millis(),
        ),
        fingerprints: fingerprint::fingerprints(raw_der),
        subject,
        issuer,
        subject_attributes: name_attributes(&tbs.subject),
        issuer_attributes: name_attributes(&tbs.issuer),
        domains,
        ip_addresses,
        extensions,
        raw_der: raw_der.to_vec(),
    })
}

/// Format a serial number as a colon-separated uppercase hex string,
/// stripping leading zero bytes but keeping at least one byte.
fn format_serial(raw: &[u8]) -> String {
    util::hex_colon_upper(strip_leading_zeros(raw))
}

fn format_sig_algorithm(algo: &AlgorithmIdentifier) -> String {
    let oid_str = algo.algorithm.to_id_string();
    match oid::signature_algorithm_name(&oid_str) {
        Some(name) => name.to_string(),
        None => oid_str,
    }
}

pub(crate) fn build_dn(name: &X509Name) -> DistinguishedName {
    let mut dn = DistinguishedName::default();
    for rdn in name.iter() {
        for attr in rdn.iter() {
            let slot = match attr.attr_type().to_id_string().as_str() {
                oid::COMMON_NAME => &mut dn.common_name,
                oid::ORGANIZATION => &mut dn.organization,
                oid::ORGANIZATIONAL_UNIT => &mut dn.organizational_unit,
                oid::LOCALITY => &mut dn.locality,
                oid::STATE_OR_PROVINCE => &mut dn.state,
                oid::COUNTRY => &mut dn.country,
                oid::EMAIL_ADDRESS => &mut dn.email_address,
                _ => continue,
            };
            if let Ok(value) = attr.as_str() {
                *slot = Some(value.to_string());
            }
        }
    }
    dn
}

/// All attributes of `name`, in RDN order.
fn name_attributes(name: &X509Name) -> Vec<NameAttribute> {
    name.iter_attributes()
        .map(|attr| {
            let value = match attr.as_str() {
                Ok(s) => s.to_string(),
                Err(_) => hex::encode(attr.attr_value().data),
            };
            (attr.attr_type().to_id_string(), value)
        })
        .collect()
}

pub(crate) fn build_validity(not_before: i64, not_after: i64, now_ms: i64) -> Validity {
    let before_ms = not_before.saturating_mul(1000);
    let after_ms = not_after.saturating_mul(1000);
    Validity {
        not_before: DateTime::from_timestamp(not_before),
        not_after: DateTime::from_timestamp(not_after),
        is_valid: now_ms >= before_ms && now_ms <= after_ms,
        days_until_expiry: ceil_days(after_ms.saturating_sub(now_ms)),
        is_expired: now_ms > after_ms,
    }
}

/// Ceiling division of a millisecond span by one day.
fn ceil_days(span_ms: i64) -> i64 {
    let days = span_ms / MILLIS_PER_DAY;
    if span_ms % MILLIS_PER_DAY > 0 {
        days + 1
    } else {
        days
    }
}

fn build_public_key_info(spki: &SubjectPublicKeyInfo) -> PublicKeyInfo {
    let oid_str = spki.algorithm.algorithm.to_id_string();

    match oid_str.as_str() {
        oid::RSA_ENCRYPTION | oid::RSASSA_PSS => match spki.parsed() {
            Ok(x509_parser::public_key::PublicKey::RSA(rsa)) => {
                rsa_info(rsa.modulus, rsa.exponent)
            }
            _ => parse_rsa_public_key(&spki.subject_public_key.data)
                .unwrap_or_else(PublicKeyInfo::unknown),
        },
        oid::DSA => PublicKeyInfo {
            algorithm: PublicKeyAlgorithm::Dsa,
            size_bits: extract_dsa_prime_bits(&spki.algorithm).unwrap_or(0),
            ..PublicKeyInfo::unknown()
        },
        oid::EC_PUBLIC_KEY => {
            let curve_oid = spki
                .algorithm
                .parameters
                .as_ref()
                .and_then(|p| p.as_oid().ok())
                .map(|o| o.to_id_string());
            let (curve, size_bits) = match curve_oid.as_deref().and_then(oid::curve_info) {
                Some((name, bits)) => (Some(name.to_string()), bits),
                None => (curve_oid, 0),
            };
            PublicKeyInfo {
                algorithm: PublicKeyAlgorithm::Ecdsa,
                size_bits,
                curve,
                ..PublicKeyInfo::unknown()
            }
        }
        oid::ED25519 => ecc("Ed25519", 256),
        oid::ED448 => ecc("Ed448", 448),
        oid::X25519 => ecc("X25519", 256),
        oid::X448 => ecc("X448", 448),
        _ => PublicKeyInfo::unknown(),
    }
}

fn rsa_info(modulus: &[u8], exponent: &[u8]) -> PublicKeyInfo {
    PublicKeyInfo {
        algorithm: PublicKeyAlgorithm::Rsa,
        size_bits: util::bit_length(modulus),
        exponent: Some(format_exponent(exponent)),
        modulus_hex: Some(hex::encode_upper(strip_leading_zeros(modulus))),
        curve: None,
    }
}

/// Modulus and exponent from a bare `RSAPublicKey` SEQUENCE. x509-parser only
/// decodes it under the rsaEncryption OID, so RSASSA-PSS keys come through here.
fn parse_rsa_public_key(key_der: &[u8]) -> Option<PublicKeyInfo> {
    use x509_parser::der_parser::ber::BerObjectContent;

    let (_, parsed) = x509_parser::der_parser::parse_der(key_der).ok()?;
    let seq = parsed.as_sequence().ok()?;
    match (&seq.first()?.content, &seq.get(1)?.content) {
        (BerObjectContent::Integer(n), BerObjectContent::Integer(e)) => Some(rsa_info(n, e)),
        _ => None,
    }
}

fn ecc(curve: &str, size_bits: u32) -> PublicKeyInfo {
    PublicKeyInfo {
        algorithm: PublicKeyAlgorithm::Ecc,
        size_bits,
        curve: Some(curve.to_string()),
        ..PublicKeyInfo::unknown()
    }
}

fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    match bytes.iter().position(|&b| b != 0) {
        Some(pos) => bytes.get(pos..).unwrap_or(bytes),
        None => bytes.get(bytes.len().saturating_sub(1)..).unwrap_or(bytes),
    }
}

/// Render an RSA exponent in decimal, falling back to hex for values wider
/// than 64 bits.
fn format_exponent(bytes: &[u8]) -> String {
    let significant = strip_leading_zeros(bytes);
    if significant.len() > 8 {
        return format!("0x{}", hex::encode_upper(significant));
    }
    significant
        .iter()
        .fold(0u64, |acc, &b| (acc << 8) | u64::from(b))
        .to_string()
}

/// Bit length of the DSA prime `p` from the `Dss-Parms` SEQUENCE.
fn extract_dsa_prime_bits(algo: &AlgorithmIdentifier) -> Option<u32> {
    use x509_parser::der_parser::asn1_rs::ToDer;
    use x509_parser::der_parser::ber::BerObjectContent;

    let params_der = algo.parameters.as_ref()?.to_der_vec().ok()?;
    let (_, parsed) = x509_parser::der_parser::parse_der(&params_der).ok()?;
    let seq = parsed.as_sequence().ok()?;
    match &seq.first()?.content {
        BerObjectContent::Integer(p) => Some(util::bit_length(p)),
        _ => None,
    }
}

fn build_extension(ext: &X509Extension) -> Extension {
    let oid_str = ext.oid.to_id_string();
    let name = oid::extension_name(&oid_str)
        .map(str::to_string)
        .unwrap_or_else(|| oid_str.clone());

    let value = match ext.parsed_extension() {
        ParsedExtension::BasicConstraints(bc) => {
            let mut rendered = if bc.ca { "CA:TRUE" } else { "CA:FALSE" }.to_string();
            if let Some(n) = bc.path_len_constraint {
                rendered.push_str(&format!(", pathlen:{}", n));
            }
            ExtensionValue::Single(rendered)
        }
        ParsedExtension::KeyUsage(ku) => {
            let flags = [
                (ku.digital_signature(), "Digital Signature"),
                (ku.non_repudiation(), "Non Repudiation"),
                (ku.key_encipherment(), "Key Encipherment"),
                (ku.data_encipherment(), "Data Encipherment"),
                (ku.key_agreement(), "Key Agreement"),
                (ku.key_cert_sign(), "Certificate Sign"),
                (ku.crl_sign(), "CRL Sign"),
                (ku.encipher_only(), "Encipher Only"),
                (ku.decipher_only(), "Decipher Only"),
            ];
            ExtensionValue::List(
                flags
                    .iter()
                    .filter(|(set, _)| *set)
                    .map(|(_, label)| label.to_string())
                    .collect(),
            )
        }
        ParsedExtension::ExtendedKeyUsage(eku) => {
            let flags = [
                (eku.any, "Any Extended Key Usage"),
                (eku.server_auth, "TLS Web Server Authentication"),
                (eku.client_auth, "TLS Web Client Authentication"),
                (eku.code_signing, "Code Signing"),
                (eku.email_protection, "E-mail Protection"),
                (eku.time_stamping, "Time Stamping"),
                (eku.ocsp_signing, "OCSP Signing"),
            ];
            let mut usages: Vec<String> = flags
                .iter()
                .filter(|(set, _)| *set)
                .map(|(_, label)| label.to_string())
                .collect();
            usages.extend(eku.other.iter().map(|o| oid::eku_name(&o.to_id_string())));
            ExtensionValue::List(usages)
        }
        ParsedExtension::SubjectAlternativeName(san) => ExtensionValue::List(
            san.general_names
                .iter()
                .map(format_general_name)
                .collect(),
        ),
        ParsedExtension::SubjectKeyIdentifier(ski) => {
            ExtensionValue::Single(util::hex_colon_upper(ski.0))
        }
        ParsedExtension::AuthorityKeyIdentifier(aki) => match &aki.key_identifier {
            Some(ki) => ExtensionValue::Single(format!("keyid:{}", util::hex_colon_upper(ki.0))),
            None => ExtensionValue::Single("N/A".into()),
        },
        ParsedExtension::AuthorityInfoAccess(aia) => ExtensionValue::List(
            aia.accessdescs
                .iter()
                .map(|desc| {
                    let method = match desc.access_method.to_id_string().as_str() {
                        oid::ACCESS_OCSP => "OCSP".to_string(),
                        oid::ACCESS_CA_ISSUERS => "CA Issuers".to_string(),
                        other => other.to_string(),
                    };
                    format!("{} - {}", method, format_general_name(&desc.access_location))
                })
                .collect(),
        ),
        ParsedExtension::CRLDistributionPoints(cdp) => {
            let mut uris = Vec::new();
            for point in &cdp.points {
                if let Some(x509_parser::extensions::DistributionPointName::FullName(names)) =
                    &point.distribution_point
                {
                    uris.extend(names.iter().map(format_general_name));
                }
            }
            ExtensionValue::List(uris)
        }
        ParsedExtension::CertificatePolicies(policies) => ExtensionValue::List(
            policies
                .iter()
                .map(|p| p.policy_id.to_id_string())
                .collect(),
        ),
        ParsedExtension::NsCertComment(comment) => ExtensionValue::Single(comment.to_string()),
        _ if ext.value.is_empty() => ExtensionValue::Single("N/A".into()),
        _ => ExtensionValue::Single(hex::encode(ext.value)),
    };

    Extension {
        name,
        oid: oid_str,
        critical: ext.critical,
        value,
    }
}

/// Render a GeneralName: DNS and IP entries are tagged, other types are raw.
fn format_general_name(gn: &GeneralName) -> String {
    match gn {
        GeneralName::DNSName(name) => format!("DNS:{}", name),
        GeneralName::IPAddress(ip_bytes) => format!("IP:{}", format_ip_bytes(ip_bytes)),
        GeneralName::RFC822Name(email) => email.to_string(),
        GeneralName::URI(uri) => uri.to_string(),
        GeneralName::DirectoryName(dn) => build_dn(dn).to_oneline(),
        other => format!("{:?}", other),
    }
}

/// Collect subject CN + SAN DNS names, and SAN IPs, each deduplicated.
fn collect_names(
    subject: &DistinguishedName,
    extensions: &[X509Extension],
) -> (Vec<String>, Vec<String>) {
    let mut domains: Vec<String> = subject.common_name.iter().cloned().collect();
    let mut ips: Vec<String> = Vec::new();

    for ext in extensions {
        if let ParsedExtension::SubjectAlternativeName(san) = ext.parsed_extension() {
            for gn in &san.general_names {
                match gn {
                    GeneralName::DNSName(name) => push_unique(&mut domains, name.to_string()),
                    GeneralName::IPAddress(bytes) => push_unique(&mut ips, format_ip_bytes(bytes)),
                    _ => {}
                }
            }
        }
    }
    (domains, ips)
}

fn push_unique(list: &mut Vec<String>, value: String) {
    if !list.contains(&value) {
        list.push(value);
    }
}

pub(crate) fn format_ip_bytes(bytes: &[u8]) -> String {
    if let Ok(octets) = <[u8; 4]>::try_from(bytes) {
        std::net::Ipv4Addr::from(octets).to_string()
    } else if let Ok(octets) = <[u8; 16]>::try_from(bytes) {
        std::net::Ipv6Addr::from(octets).to_string()
    } else {
        hex::encode(bytes)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn der(tag: u8, body: &[u8]) -> Vec<u8> {
        let mut out = vec![tag];
        match body.len() {
            len @ 0..=0x7F => out.push(len as u8),
            len @ 0x80..=0xFF => out.extend([0x81, len as u8]),
            len => out.extend([0x82, (len >> 8) as u8, len as u8]),
        }
        out.extend_from_slice(body);
        out
    }

    #[test]
    fn rsassa_pss_key_reports_modulus_size() {
        let mut modulus = vec![0x00];
        modulus.extend([0xC5; 128]);
        let key = der(
            0x30,
            &[der(0x02, &modulus), der(0x02, &[0x01, 0x00, 0x01])].concat(),
        );
        // AlgorithmIdentifier { id-RSASSA-PSS } with parameters absent.
        let alg = der(
            0x30,
            &[0x06, 0x09, 0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x01, 0x0A],
        );
        let spki_der = der(0x30, &[alg, der(0x03, &[&[0x00][..], &key].concat())].concat());

        let (_, spki) = SubjectPublicKeyInfo::from_der(&spki_der).unwrap();
        let info = build_public_key_info(&spki);
        assert_eq!(info.algorithm, PublicKeyAlgorithm::Rsa);
        assert_eq!(info.size_bits, 1024);
        assert_eq!(info.exponent.as_deref(), Some("65537"));
    }

    #[test]
    fn serial_strips_leading_zeros() {
        assert_eq!(format_serial(&[0x00, 0x8A, 0x01]), "8A:01");
        assert_eq!(format_serial(&[0x00]), "00");
    }

    #[test]
    fn exponent_renders_decimal() {
        assert_eq!(format_exponent(&[0x01, 0x00, 0x01]), "65537");
        assert_eq!(format_exponent(&[0x03]), "3");
    }

    #[test]
    fn days_round_up() {
        assert_eq!(ceil_days(1), 1);
        assert_eq!(ceil_days(MILLIS_PER_DAY), 1);
        assert_eq!(ceil_days(MILLIS_PER_DAY + 1), 2);
        assert_eq!(ceil_days(0), 0);
        assert_eq!(ceil_days(-1), 0);
        assert_eq!(ceil_days(-MILLIS_PER_DAY - 1), -1);
    }

    #[test]
    fn validity_flags_follow_window() {
        let v = build_validity(1_000, 2_000, 1_500_000);
        assert!(v.is_valid);
        assert!(!v.is_expired);

        let expired = build_validity(1_000, 2_000, 2_000_001);
        assert!(!expired.is_valid);
        assert!(expired.is_expired);
        assert!(expired.days_until_expiry <= 0);

        let early = build_validity(1_000, 2_000, 999_999);
        assert!(!early.is_valid);
        assert!(!early.is_expired);
    }

    #[test]
    fn ip_formatting() {
        assert_eq!(format_ip_bytes(&[10, 0, 0, 1]), "10.0.0.1");
        let mut v6 = [0u8; 16];
        v6[15] = 1;
        assert_eq!(format_ip_bytes(&v6), "::1");
        assert_eq!(format_ip_bytes(&[1, 2]), "0102");
    }
}
