// src/processing/indices/descriptors.rs
use std::f32::consts::PI;

use crate::processing::stream::IndexCalculator;

/// Dual-pol descriptors (Bhogapurapu et al. 2021): co-pol purity `m_c`,
/// pseudo entropy `H_c` and pseudo scattering-type angle `Theta_c`, three
/// co-produced bands from one pass over the scene. Inputs in linear power
/// units.
pub struct DualPolDescriptors;

impl DualPolDescriptors {
    pub fn new() -> Self {
        DualPolDescriptors
    }
}

impl IndexCalculator for DualPolDescriptors {
    fn name(&self) -> &str {
        "desc"
    }

    fn output_bands(&self) -> &[&'static str] {
        &["m_c", "H_c", "Theta_c"]
    }

    fn calculate_row(&self, vh: &[f32], vv: &[f32], outputs: &mut [Vec<f32>]) {
        assert_eq!(vh.len(), vv.len(), "input rows differ in length");
        let [mc_out, hc_out, theta_out] = outputs else {
            panic!("descriptor pass expects three output bands");
        };
        for i in 0..vh.len() {
            let q = super::clamped_ratio(vh[i], vv[i]);
            let p1 = 1.0 / (1.0 + q);
            let p2 = q / (1.0 + q);
            mc_out[i] = (1.0 - q) / (1.0 + q);
            hc_out[i] = -(p1 * p1.log2() + p2 * p2.log2());
            theta_out[i] = ((1.0 - q) * (1.0 - q) / (1.0 - q + q * q)).atan() * (180.0 / PI);
        }
    }
}
