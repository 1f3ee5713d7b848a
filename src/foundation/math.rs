/// Round to the nearest integer, ties to even.
///
/// Frame-count splits and crop offsets use this rounding so that odd frame counts split the same
/// way on every platform.
pub(crate) fn round_half_even(x: f64) -> i64 {
    x.round_ties_even() as i64
}

/// `round_half_even(n * fraction)` as a frame count, clamped to `0..=n`.
pub(crate) fn frames_fraction(n: usize, fraction: f64) -> usize {
    let v = round_half_even(n as f64 * fraction).max(0) as usize;
    v.min(n)
}

/// Convert a floating-point channel value to `u8` with rounding and saturation.
pub(crate) fn to_u8_sat(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
