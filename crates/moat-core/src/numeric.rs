//! Guarded arithmetic.
//!
//! Every division in the valuation and aggregation pipeline goes through one of
//! these guards, and every derived amount is passed through [`finite_or_zero`].
//!
//! ## Policy
//!
//! ```text
//! divisor == 0 or NaN          -> 1
//! divisor <= 0 or NaN (strict) -> 1
//! result NaN or infinite       -> 0
//! ```

/// Returns `value`, or 1 when it is zero or not finite.
///
/// Used where a zero divisor is a degenerate input, e.g. missing forward
/// earnings or an unset leveraged total. Also applied to a finished ratio
/// that has no meaningful zero, such as cash conversion.
#[inline]
#[must_use]
pub fn divisor_or_one(value: f64) -> f64 {
    if value == 0.0 || !value.is_finite() {
        1.0
    } else {
        value
    }
}

/// Returns `value`, or 1 when it is zero, negative or not finite.
///
/// Used for quantities that are only meaningful when positive: exchange rates
/// and the actual P/E a score is measured against.
#[inline]
#[must_use]
pub fn positive_or_one(value: f64) -> f64 {
    if value > 0.0 && value.is_finite() {
        value
    } else {
        1.0
    }
}

/// Returns `value`, or 0 when it is NaN or infinite.
#[inline]
#[must_use]
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Returns `value` clamped at 0 from below, with NaN mapped to 0.
#[inline]
#[must_use]
pub fn non_negative(value: f64) -> f64 {
    if value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Formats a value with exactly two decimals.
///
/// Non-finite values format as `"0.00"`.
#[must_use]
pub fn fixed2(value: f64) -> String {
    format!("{:.2}", finite_or_zero(value))
}

/// Arithmetic mean of a series, 0 for an empty series.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
