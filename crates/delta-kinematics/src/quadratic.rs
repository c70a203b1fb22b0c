/// Relative tolerance below which a negative discriminant counts as a
/// tangency (double root) rather than "no intersection".
pub(crate) const DISCRIMINANT_TOLERANCE: f64 = 1e-12;

/// Square root of a discriminant, or `None` if it is negative beyond
/// rounding noise.
///
/// `scale` is the magnitude of the terms the discriminant was computed from.
/// Values in `[-DISCRIMINANT_TOLERANCE * scale, 0)` are treated as zero.
pub(crate) fn discriminant_sqrt(d: f64, scale: f64) -> Option<f64> {
    if d >= 0.0 {
        Some(d.sqrt())
    } else if d >= -DISCRIMINANT_TOLERANCE * scale.abs() {
        Some(0.0)
    } else {
        None
    }
}
