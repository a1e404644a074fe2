//! Certificate fingerprint (digest) computation.

use crate::fields::{DigestAlgorithm, Fingerprints};
use crate::util;
use digest::Digest;

/// Compute the fingerprint of DER-encoded certificate bytes.
///
/// Returns a colon-separated uppercase hex string (e.g., "AB:CD:EF:...").
pub fn compute_fingerprint(der_bytes: &[u8], algorithm: DigestAlgorithm) -> String {
    let hash_bytes: Vec<u8> = match algorithm {
        DigestAlgorithm::Sha1 => sha1::Sha1::digest(der_bytes).to_vec(),
        DigestAlgorithm::Sha256 => sha2::Sha256::digest(der_bytes).to_vec(),
        DigestAlgorithm::Sha384 => sha2::Sha384::digest(der_bytes).to_vec(),
        DigestAlgorithm::Sha512 => sha2::Sha512::digest(der_bytes).to_vec(),
    };
    util::hex_colon_upper(&hash_bytes)
}

pub(crate) fn fingerprints(der_bytes: &[u8]) -> Fingerprints {
    Fingerprints {
        sha1: compute_fingerprint(der_bytes, DigestAlgorithm::Sha1),
        sha256: compute_fingerprint(der_bytes, DigestAlgorithm::Sha256),
    }
}
