// src/processing/indices/mod.rs
pub mod cr;
pub mod descriptors;
pub mod dprvic;
pub mod dpsvi;
pub mod dpsvim;
pub mod pol;
pub mod rvim;

// Re-export indices
pub use cr::CR;
pub use descriptors::DualPolDescriptors;
pub use dprvic::DPRVIC;
pub use dpsvi::DPSVI;
pub use dpsvim::DPSVIM;
pub use pol::POL;
pub use rvim::RVIM;

/// Cross/co power ratio clamped from above at exactly 1; ratios above 1 are
/// not meaningful for the ratio-based indices and are capped rather than
/// propagated. NaN stays NaN.
pub(crate) fn clamped_ratio(vh: f32, vv: f32) -> f32 {
    let q = vh / vv;
    if q >= 1.0 {
        1.0
    } else {
        q
    }
}
