//! Normalization of user-supplied certificate text into DER bytes.
//!
//! Accepted shapes:
//!
//! - raw Base64 DER, optionally broken across lines
//! - a PEM `CERTIFICATE` block
//! - a PEM block that was itself Base64-encoded once more (common when
//!   certificates travel through JSON or environment variables)

use crate::options::InspectOptions;
use crate::util;
use crate::CertsightError;
use base64::Engine;

const PEM_BEGIN: &str = "-----BEGIN CERTIFICATE-----";
const PEM_END: &str = "-----END CERTIFICATE-----";

/// Reduce certificate input to a bare, validated Base64 string.
pub fn normalize_certificate_input(
    input: &str,
    options: &InspectOptions,
) -> Result<String, CertsightError> {
    let trimmed = input.trim();

    let cleaned = if trimmed.contains(PEM_BEGIN) {
        tracing::debug!("input is a PEM block");
        extract_pem_body(trimmed)?
    } else if let Some(inner) = decode_outer_pem(trimmed) {
        tracing::debug!("input is a Base64-wrapped PEM block");
        extract_pem_body(&inner)?
    } else {
        util::strip_whitespace(trimmed)
    };

    if cleaned.is_empty() {
        return Err(CertsightError::InputFormat(
            "certificate content is empty".into(),
        ));
    }
    if cleaned.len() < options.min_base64_len {
        return Err(CertsightError::InputFormat(format!(
            "certificate content too short ({} characters, minimum {})",
            cleaned.len(),
            options.min_base64_len
        )));
    }
    if !util::is_strict_base64(&cleaned) {
        return Err(CertsightError::InputFormat("not valid Base64".into()));
    }

    Ok(cleaned)
}

/// Normalize certificate input and decode it to DER bytes.
pub fn decode_certificate_input(
    input: &str,
    options: &InspectOptions,
) -> Result<Vec<u8>, CertsightError> {
    let cleaned = normalize_certificate_input(input, options)?;
    let der = base64::engine::general_purpose::STANDARD
        .decode(cleaned.as_bytes())
        .map_err(|e| CertsightError::Decode(e.to_string()))?;

    if der.len() < options.min_der_len {
        return Err(CertsightError::InputFormat(format!(
            "decoded certificate too short ({} bytes, minimum {})",
            der.len(),
            options.min_der_len
        )));
    }
    tracing::debug!(bytes = der.len(), "decoded certificate input");
    Ok(der)
}

/// If `text` is Base64 whose decoded form is UTF-8 containing a PEM block,
/// return the decoded text.
fn decode_outer_pem(text: &str) -> Option<String> {
    let compact = util::strip_whitespace(text);
    if !util::is_strict_base64(&compact) {
        return None;
    }
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(compact.as_bytes())
        .ok()?;
    let decoded = String::from_utf8(bytes).ok()?;
    decoded.contains(PEM_BEGIN).then_some(decoded)
}

/// Extract the whitespace-free Base64 body of the first certificate block.
fn extract_pem_body(text: &str) -> Result<String, CertsightError> {
    let start = text
        .find(PEM_BEGIN)
        .map(|pos| pos + PEM_BEGIN.len())
        .ok_or_else(|| CertsightError::InputFormat("missing BEGIN CERTIFICATE marker".into()))?;
    let rest = text.get(start..).unwrap_or_default();
    let end = rest
        .find(PEM_END)
        .ok_or_else(|| CertsightError::InputFormat("missing END CERTIFICATE marker".into()))?;
    Ok(util::strip_whitespace(rest.get(..end).unwrap_or_default()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn body() -> String {
        // 120 characters of valid Base64
        "QUJD".repeat(30)
    }

    fn lenient() -> InspectOptions {
        InspectOptions {
            min_der_len: 0,
            ..InspectOptions::default()
        }
    }

    #[test]
    fn strips_embedded_whitespace() {
        let spaced = format!("  {}\n{}\r\n\t{}  ", &body()[..40], &body()[40..80], &body()[80..]);
        assert_eq!(
            normalize_certificate_input(&spaced, &lenient()).unwrap(),
            body()
        );
    }

    #[test]
    fn extracts_pem_body() {
        let pem = format!("{}\n{}\n{}\n", PEM_BEGIN, util::wrap_lines(&body(), 64), PEM_END);
        assert_eq!(normalize_certificate_input(&pem, &lenient()).unwrap(), body());
    }

    #[test]
    fn extracts_base64_wrapped_pem() {
        let pem = format!("{}\n{}\n{}\n", PEM_BEGIN, util::wrap_lines(&body(), 64), PEM_END);
        let wrapped = base64::engine::general_purpose::STANDARD.encode(pem.as_bytes());
        assert_eq!(
            normalize_certificate_input(&wrapped, &lenient()).unwrap(),
            body()
        );
    }

    #[test]
    fn rejects_unterminated_pem() {
        let pem = format!("{}\n{}\n", PEM_BEGIN, body());
        let err = normalize_certificate_input(&pem, &lenient()).unwrap_err();
        assert!(matches!(err, CertsightError::InputFormat(_)));
    }

    #[test]
    fn rejects_empty_input() {
        let err = normalize_certificate_input("   \n ", &lenient()).unwrap_err();
        assert!(matches!(err, CertsightError::InputFormat(_)));
        assert!(err.to_string().starts_with("invalid format"));
    }

    #[test]
    fn rejects_short_input() {
        let err = normalize_certificate_input("QUJD", &lenient()).unwrap_err();
        assert!(matches!(err, CertsightError::InputFormat(_)));
    }

    #[test]
    fn rejects_non_base64_alphabet() {
        let bad = format!("{}!!!!", "QUJD".repeat(30));
        let err = normalize_certificate_input(&bad, &lenient()).unwrap_err();
        assert!(matches!(err, CertsightError::InputFormat(_)));
    }

    #[test]
    fn short_decoded_der_is_rejected() {
        let err = decode_certificate_input(&body(), &InspectOptions {
            min_der_len: 1000,
            ..InspectOptions::default()
        })
        .unwrap_err();
        assert!(matches!(err, CertsightError::InputFormat(_)));
    }

    #[test]
    fn base64_roundtrip_preserves_bytes() {
        let der: Vec<u8> = (0u8..=255).collect();
        let encoded = base64::engine::general_purpose::STANDARD.encode(&der);
        assert_eq!(decode_certificate_input(&encoded, &lenient()).unwrap(), der);
    }
}
