//! Progressive-overload suggestion rule.
//!
//! The hint shown next to the weight input: take the last known weight for
//! an exercise and bump it by 2.5%, rounded to two decimal places with
//! round-half-away-from-zero. No last weight means no suggestion.

use crate::core::records::LastWeight;

/// Multiplier applied to the last known weight (+2.5%).
pub const PROGRESSION_FACTOR: f64 = 1.025;

/// Computes the suggested next weight from a last known weight.
///
/// # Examples
///
/// ```
/// use liftlog::core::suggested_next_weight;
///
/// assert_eq!(suggested_next_weight(100.0), 102.5);
/// assert_eq!(suggested_next_weight(33.333), 34.17);
/// ```
#[must_use]
pub fn suggested_next_weight(last_weight: f64) -> f64 {
    round_hundredths(last_weight * PROGRESSION_FACTOR)
}

/// Applies the rule to an optional `LastWeight` record.
///
/// Returns `None` when there is no history, which callers render as a
/// "no history" state rather than a zero suggestion.
#[must_use]
pub fn suggest(last: Option<&LastWeight>) -> Option<f64> {
    last.map(|lw| suggested_next_weight(lw.weight))
}

/// Rounds half away from zero at the hundredths digit.
fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
