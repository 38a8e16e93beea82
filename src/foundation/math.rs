/// Clamp `v` into `[-limit, limit]`.
///
/// A non-finite or negative `limit` collapses to `0`, and a non-finite `v` clamps to `0`.
pub(crate) fn clamp_symmetric(v: f64, limit: f64) -> f64 {
    let limit = finite_or(limit, 0.0).max(0.0);
    finite_or(v, 0.0).clamp(-limit, limit)
}

/// Return `v` when it is finite, otherwise `fallback`.
pub(crate) fn finite_or(v: f64, fallback: f64) -> f64 {
    if v.is_finite() { v } else { fallback }
}

/// `a + (b - a) * t`, unclamped.
pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// `num / den`, or `0` when the quotient is not finite.
pub(crate) fn safe_div(num: f64, den: f64) -> f64 {
    finite_or(num / den, 0.0)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
