//! PEM <-> DER format conversion.

use crate::display;
use crate::input;
use crate::options::InspectOptions;
use crate::parser;
use crate::util;
use crate::CertsightError;
use base64::Engine;
use std::str::FromStr;

/// Target representation for [`convert_certificate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// PEM `CERTIFICATE` block.
    Pem,
    /// DER bytes, returned as single-line Base64.
    Der,
    /// OpenSSL-style text dump.
    Text,
}

impl FromStr for OutputFormat {
    type Err = CertsightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pem" => Ok(Self::Pem),
            "der" => Ok(Self::Der),
            "text" | "txt" => Ok(Self::Text),
            other => Err(CertsightError::Unsupported(format!(
                "output format: {}",
                other
            ))),
        }
    }
}

/// Convert certificate input (any accepted shape) to another representation.
///
/// The input is fully parsed first, so malformed certificates are rejected
/// and trailing bytes after the certificate are dropped.
pub fn convert_certificate(input: &str, format: OutputFormat) -> Result<String, CertsightError> {
    let cert = parser::parse_certificate(input)?;
    Ok(match format {
        OutputFormat::Pem => der_to_pem(&cert.raw_der),
        OutputFormat::Der => base64::engine::general_purpose::STANDARD.encode(&cert.raw_der),
        OutputFormat::Text => display::format_certificate_as_text(&cert),
    })
}

/// Convert DER-encoded certificate bytes to a PEM string.
pub fn der_to_pem(der: &[u8]) -> String {
    format!(
        "-----BEGIN CERTIFICATE-----\n{}\n-----END CERTIFICATE-----\n",
        util::base64_wrap(der)
    )
}

/// Convert a PEM-encoded certificate to DER bytes.
pub fn pem_to_der(pem: &[u8]) -> Result<Vec<u8>, CertsightError> {
    let text = std::str::from_utf8(pem)
        .map_err(|_| CertsightError::InputFormat("PEM input is not valid UTF-8".into()))?;
    if !text.contains("-----BEGIN CERTIFICATE-----") {
        return Err(CertsightError::InputFormat(
            "missing BEGIN CERTIFICATE marker".into(),
        ));
    }
    input::decode_certificate_input(text, &InspectOptions::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_format_names() {
        assert_eq!("PEM".parse::<OutputFormat>().ok(), Some(OutputFormat::Pem));
        assert_eq!("der".parse::<OutputFormat>().ok(), Some(OutputFormat::Der));
        assert_eq!("txt".parse::<OutputFormat>().ok(), Some(OutputFormat::Text));
        assert!(matches!(
            "p7b".parse::<OutputFormat>(),
            Err(CertsightError::Unsupported(_))
        ));
    }

    #[test]
    fn pem_wraps_at_64_columns() {
        let der = vec![0x5Au8; 100];
        let pem = der_to_pem(&der);
        assert!(pem.starts_with("-----BEGIN CERTIFICATE-----\n"));
        assert!(pem.ends_with("-----END CERTIFICATE-----\n"));
        assert!(pem.lines().all(|line| line.len() <= 64));
        assert_eq!(pem_to_der(pem.as_bytes()).ok(), Some(der));
    }

    #[test]
    fn pem_to_der_requires_markers() {
        let bare = "QUJD".repeat(40);
        assert!(matches!(
            pem_to_der(bare.as_bytes()),
            Err(CertsightError::InputFormat(_))
        ));
    }
}
