// src/utils/stats.rs

/// Maximum finite value in a slice, skipping NaN and infinities.
/// NaN when the slice holds no finite value.
pub fn finite_max(values: &[f32]) -> f32 {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(f32::NAN, f32::max)
}
