//! Certificate fixtures generated at test time with rcgen.
#![allow(dead_code)]

use base64::Engine;
use rcgen::{
    BasicConstraints, Certificate, CertificateParams, DistinguishedName, DnType, IsCa, Issuer,
    KeyPair, KeyUsagePurpose, SanType,
};
use std::net::IpAddr;
use time::{Duration, OffsetDateTime};

pub const DAY: i64 = 86_400;

/// A CA that can sign further certificates.
pub struct TestCa {
    pub cert: Certificate,
    pub issuer: Issuer<'static, KeyPair>,
}

pub fn now() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}

fn name(cn: &str) -> DistinguishedName {
    let mut dn = DistinguishedName::new();
    dn.push(DnType::CountryName, "US");
    dn.push(DnType::OrganizationName, "Certsight Test");
    dn.push(DnType::CommonName, cn);
    dn
}

/// A name made only of serialNumber (2.5.4.5).
pub fn serial_number_name(serial: &str) -> DistinguishedName {
    let mut dn = DistinguishedName::new();
    dn.push(DnType::CustomDnType(vec![2, 5, 4, 5]), serial);
    dn
}

fn window(params: &mut CertificateParams, days_before: i64, days_after: i64) {
    let now = OffsetDateTime::now_utc();
    params.not_before = now - Duration::days(days_before);
    params.not_after = now + Duration::days(days_after);
}

fn ca_params(dn: DistinguishedName) -> CertificateParams {
    let mut params = CertificateParams::default();
    params.distinguished_name = dn;
    params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    params.key_usages = vec![KeyUsagePurpose::KeyCertSign, KeyUsagePurpose::CrlSign];
    window(&mut params, 1, 3650);
    params
}

fn leaf_params(names: &[&str], days_before: i64, days_after: i64) -> CertificateParams {
    let mut params = CertificateParams::default();
    params.distinguished_name = name(names.first().copied().unwrap_or("leaf"));
    params.is_ca = IsCa::ExplicitNoCa;
    params.key_usages = vec![
        KeyUsagePurpose::DigitalSignature,
        KeyUsagePurpose::KeyEncipherment,
    ];
    for entry in names {
        if let Ok(ip) = entry.parse::<IpAddr>() {
            params.subject_alt_names.push(SanType::IpAddress(ip));
        } else {
            params.subject_alt_names.push(SanType::DnsName(
                entry.to_string().try_into().expect("valid DNS name"),
            ));
        }
    }
    window(&mut params, days_before, days_after);
    params
}

/// A self-signed root CA.
pub fn root_ca(cn: &str) -> TestCa {
    root_ca_named(name(cn))
}

pub fn root_ca_named(dn: DistinguishedName) -> TestCa {
    let params = ca_params(dn);
    let key = KeyPair::generate().expect("key pair should be generated");
    let cert = params.self_signed(&key).expect("root should self-sign");
    TestCa {
        cert,
        issuer: Issuer::new(params, key),
    }
}

/// An intermediate CA signed by `parent`.
pub fn intermediate_ca(cn: &str, parent: &TestCa) -> TestCa {
    let params = ca_params(name(cn));
    let key = KeyPair::generate().expect("key pair should be generated");
    let cert = params
        .signed_by(&key, &parent.issuer)
        .expect("intermediate should be signed");
    TestCa {
        cert,
        issuer: Issuer::new(params, key),
    }
}

/// A leaf for `names` (DNS names or IP literals), valid from yesterday for a year.
pub fn leaf(names: &[&str], parent: &TestCa) -> Certificate {
    leaf_with_window(names, parent, 1, 365)
}

pub fn leaf_with_window(
    names: &[&str],
    parent: &TestCa,
    days_before: i64,
    days_after: i64,
) -> Certificate {
    let key = KeyPair::generate().expect("key pair should be generated");
    leaf_params(names, days_before, days_after)
        .signed_by(&key, &parent.issuer)
        .expect("leaf should be signed")
}

/// A leaf under `parent` whose subject is exactly `dn`.
pub fn leaf_named(dn: DistinguishedName, names: &[&str], parent: &TestCa) -> Certificate {
    let key = KeyPair::generate().expect("key pair should be generated");
    let mut params = leaf_params(names, 1, 365);
    params.distinguished_name = dn;
    params
        .signed_by(&key, &parent.issuer)
        .expect("leaf should be signed")
}

/// A self-signed end-entity certificate.
pub fn self_signed_leaf(names: &[&str], days_after: i64) -> Certificate {
    let key = KeyPair::generate().expect("key pair should be generated");
    leaf_params(names, 1, days_after)
        .self_signed(&key)
        .expect("leaf should self-sign")
}

pub fn pem(cert: &Certificate) -> String {
    cert.pem()
}

/// Bare single-line Base64 of the DER encoding.
pub fn base64_der(cert: &Certificate) -> String {
    base64::engine::general_purpose::STANDARD.encode(cert.der())
}
