//! Compliance thresholds.

/// A check warns once this percent of its cap is used.
pub const WARN_THRESHOLD_PCT: f64 = 90.0;

/// Template penalty for exceeding a cap.
pub const TEMPLATE_FAIL_PENALTY: u32 = 50;
/// Template penalty for using more than [`TEMPLATE_WARN_RATIO`] of a cap.
pub const TEMPLATE_WARN_PENALTY: u32 = 10;
/// Fraction of a cap above which a template is close to the limit.
pub const TEMPLATE_WARN_RATIO: f64 = 0.9;

/// Hex characters kept from the input digest.
pub const INPUT_HASH_LEN: usize = 16;
