//! Float rounding that works with either `std` or `libm`.

#[cfg(feature = "std")]
pub(crate) fn floor(x: f64) -> f64 {
    x.floor()
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
pub(crate) fn floor(x: f64) -> f64 {
    libm::floor(x)
}

#[cfg(feature = "std")]
pub(crate) fn ceil(x: f64) -> f64 {
    x.ceil()
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
pub(crate) fn ceil(x: f64) -> f64 {
    libm::ceil(x)
}

/// Rounds halves toward positive infinity (`2.5 -> 3`, `-2.5 -> -2`).
///
/// `f64::round` rounds halves away from zero, which differs on negative halves.
pub(crate) fn round_half_up(x: f64) -> f64 {
    let f = floor(x);
    if x - f >= 0.5 { f + 1.0 } else { f }
}

/// Converts a non-negative whole float to `usize`, saturating (NaN and negatives map to 0).
pub(crate) fn to_count(x: f64) -> usize {
    x as usize
}
