//! Tunable thresholds shared by parsing, analysis, and validation.

use std::time::{SystemTime, UNIX_EPOCH};

/// Options controlling input acceptance and validation thresholds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectOptions {
    /// Minimum length of the normalized Base64 text. Shorter input is rejected
    /// before decoding since no real certificate encodes that small.
    pub min_base64_len: usize,
    /// Minimum number of decoded DER bytes.
    pub min_der_len: usize,
    /// Certificates expiring within this many days produce a warning.
    pub expiry_warning_days: i64,
    /// Certificates expiring within this many days get a renewal recommendation.
    pub renewal_recommendation_days: i64,
    /// Evaluate validity at a specific Unix timestamp (seconds) instead of the
    /// current time.
    pub at_time: Option<i64>,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self {
            min_base64_len: 100,
            min_der_len: 50,
            expiry_warning_days: 30,
            renewal_recommendation_days: 90,
            at_time: None,
        }
    }
}

impl InspectOptions {
    /// The evaluation instant in milliseconds since the Unix epoch.
    pub(crate) fn now_millis(&self) -> i64 {
        match self.at_time {
            Some(ts) => ts.saturating_mul(1000),
            None => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
                .unwrap_or(0),
        }
    }
}
