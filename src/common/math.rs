//! Small math utilities used by the indicator and scoring layers.

/// Simple moving average over the most recent `period` values.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let sum: f64 = values.iter().rev().take(period).sum();
    Some(sum / period as f64)
}

/// Clamp a sub-score into the canonical [0, 100] band.
pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

/// Absolute distance between `value` and `reference`, as a percentage of
/// `reference`. `None` when the reference is not a positive finite number.
pub fn percent_distance(value: f64, reference: f64) -> Option<f64> {
    if !value.is_finite() || !reference.is_finite() || reference <= 0.0 {
        return None;
    }
    Some(((value - reference) / reference).abs() * 100.0)
}

/// Signed change from `reference` to `value` as a percentage of `reference`.
pub fn percent_change(value: f64, reference: f64) -> Option<f64> {
    if !value.is_finite() || !reference.is_finite() || reference <= 0.0 {
        return None;
    }
    Some((value - reference) / reference * 100.0)
}

/// Keep a raw input only when it is a finite number.
pub fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// Keep a raw input only when it is finite and strictly positive.
///
/// Out-of-range numeric input (negative price, NaN volume) is treated as
/// unknown rather than coerced into a plausible-looking number.
pub fn positive_finite(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Linear ramp: 0 at `low` or below, 100 at `high` or above.
pub fn ramp(value: f64, low: f64, high: f64) -> f64 {
    if !value.is_finite() || high <= low {
        return 0.0;
    }
    clamp_score((value - low) / (high - low) * 100.0)
}
