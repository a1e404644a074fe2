//! Shared encoding utilities.

use base64::Engine;

/// Format bytes as colon-separated uppercase hex (e.g., "AB:CD:EF").
pub fn hex_colon_upper(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(":")
}

/// Encode bytes as base64 with PEM-style 64-character line wrapping.
pub fn base64_wrap(data: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(data);
    wrap_lines(&encoded, 64)
}

/// Split an ASCII string into lines of at most `width` characters.
pub fn wrap_lines(text: &str, width: usize) -> String {
    text.as_bytes()
        .chunks(width.max(1))
        .filter_map(|c| std::str::from_utf8(c).ok())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Remove every whitespace character.
pub fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Strict standard-alphabet Base64 check: `[A-Za-z0-9+/]*` followed by at
/// most two `=`, with a total length that is a multiple of 4.
pub fn is_strict_base64(text: &str) -> bool {
    if text.is_empty() || text.len() % 4 != 0 {
        return false;
    }
    let body = text.trim_end_matches('=');
    if text.len() - body.len() > 2 {
        return false;
    }
    body.bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'/')
}

/// Number of significant bits in a big-endian unsigned integer.
pub fn bit_length(be_bytes: &[u8]) -> u32 {
    let significant = match be_bytes.iter().position(|&b| b != 0) {
        Some(pos) => be_bytes.get(pos..).unwrap_or_default(),
        None => return 0,
    };
    let Some(&first) = significant.first() else {
        return 0;
    };
    let len = u32::try_from(significant.len()).unwrap_or(u32::MAX);
    len.saturating_mul(8)
        .saturating_sub(first.leading_zeros())
}
