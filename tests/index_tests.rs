// tests/index_tests.rs
use approx::assert_relative_eq;
use sarvi::processing::indices::{DualPolDescriptors, CR, DPRVIC, DPSVI, DPSVIM, POL, RVIM};
use sarvi::processing::IndexCalculator;

/// Run a calculator over one row and return its output bands
fn run_row(calc: &dyn IndexCalculator, vh: &[f32], vv: &[f32]) -> Vec<Vec<f32>> {
    let mut outputs = vec![vec![0.0f32; vh.len()]; calc.output_bands().len()];
    calc.calculate_row(vh, vv, &mut outputs);
    outputs
}

/// Test CR against hand-computed dB ratios
#[test]
fn test_cr_known_values() {
    // (vh, vv, expected CR = 10*log10(vv) / 10*log10(vh))
    let test_cases = [
        (0.01f32, 0.02f32, 0.849485f32), // -16.9897 / -20.0
        (0.1, 0.1, 1.0),                 // equal channels
        (0.001, 0.01, 0.666667),         // -20 / -30
    ];

    let vh: Vec<f32> = test_cases.iter().map(|(vh, _, _)| *vh).collect();
    let vv: Vec<f32> = test_cases.iter().map(|(_, vv, _)| *vv).collect();
    let result = run_row(&CR::new(), &vh, &vv);

    for (i, (_, _, expected)) in test_cases.iter().enumerate() {
        assert!(
            (result[0][i] - expected).abs() < 0.0001,
            "Expected {}, got {} at index {}",
            expected,
            result[0][i],
            i
        );
    }
}

/// Test Pol against hand-computed dB differences
#[test]
fn test_pol_known_values() {
    // (vh, vv, expected Pol = (vh_db - vv_db) / (vh_db + vv_db))
    let test_cases = [
        (0.01f32, 0.02f32, 0.081382f32), // -3.0103 / -36.9897
        (0.1, 0.1, 0.0),                 // equal channels
    ];

    let vh: Vec<f32> = test_cases.iter().map(|(vh, _, _)| *vh).collect();
    let vv: Vec<f32> = test_cases.iter().map(|(_, vv, _)| *vv).collect();
    let result = run_row(&POL::new(), &vh, &vv);

    for (i, (_, _, expected)) in test_cases.iter().enumerate() {
        assert!(
            (result[0][i] - expected).abs() < 0.0001,
            "Expected {}, got {} at index {}",
            expected,
            result[0][i],
            i
        );
    }
}

#[test]
fn test_rvim_known_values() {
    // 4 * vh_db / (vv_db + vh_db); vh = 0.01 -> -20 dB, vv = 0.02 -> -16.9897 dB
    let result = run_row(&RVIM::new(), &[0.01], &[0.02]);
    assert!(
        (result[0][0] - 2.162764).abs() < 0.0001,
        "got {}",
        result[0][0]
    );
}

#[test]
fn test_dpsvim_known_values() {
    // (vv^2 + vv*vh) / sqrt(2)
    let result = run_row(&DPSVIM::new(), &[0.01], &[0.02]);
    assert_relative_eq!(result[0][0], 0.000424264, max_relative = 1e-5);
}

#[test]
fn test_dpsvi_with_pinned_maximum() {
    // ((vv_max - vv + vh)/sqrt(2)) * ((vv + vh)/vv) * vh
    let dpsvi = DPSVI::with_co_pol_max(0.05);
    let result = run_row(&dpsvi, &[0.01], &[0.02]);
    assert_relative_eq!(result[0][0], 0.000424264, max_relative = 1e-5);
}

/// A pinned maximum means the driver has nothing left to scan
#[test]
fn test_dpsvi_max_request() {
    assert!(DPSVI::new().needs_co_pol_max());
    assert!(!DPSVI::with_co_pol_max(0.3).needs_co_pol_max());

    let mut dpsvi = DPSVI::new();
    dpsvi.set_co_pol_max(0.3);
    assert!(!dpsvi.needs_co_pol_max());
}

/// Concrete scenario: vh = [0.01, 0.05], vv = [0.02, 0.05] -> q = [0.5, 1.0]
#[test]
fn test_dprvic_and_descriptors_concrete_scenario() {
    let vh = [0.01f32, 0.05];
    let vv = [0.02f32, 0.05];

    let dprvic = run_row(&DPRVIC::new(), &vh, &vv);
    // q = 0.5: 0.5*3.5/1.5^2 = 0.777778; q = 1: 4/4 = 1
    assert!((dprvic[0][0] - 0.777778).abs() < 0.0001, "got {}", dprvic[0][0]);
    assert!((dprvic[0][1] - 1.0).abs() < 0.0001, "got {}", dprvic[0][1]);

    let desc = run_row(&DualPolDescriptors::new(), &vh, &vv);
    let (mc, hc, theta) = (&desc[0], &desc[1], &desc[2]);

    assert!((mc[0] - 0.333333).abs() < 0.0001, "m_c got {}", mc[0]);
    assert!((theta[0] - 18.43495).abs() < 0.001, "Theta_c got {}", theta[0]);
    assert!((hc[0] - 0.918296).abs() < 0.0001, "H_c got {}", hc[0]);

    // boundary vh == vv: q clamps to exactly 1, maximum entropy
    assert_eq!(mc[1], 0.0);
    assert!((hc[1] - 1.0).abs() < 1e-6, "H_c got {}", hc[1]);
    assert_eq!(theta[1], 0.0);
}

/// q is capped, not propagated, when cross-pol exceeds co-pol
#[test]
fn test_ratio_clamped_above_one() {
    let vh = [0.08f32];
    let vv = [0.02f32];

    let dprvic = run_row(&DPRVIC::new(), &vh, &vv);
    assert_eq!(dprvic[0][0], 1.0);

    let desc = run_row(&DualPolDescriptors::new(), &vh, &vv);
    assert_eq!(desc[0][0], 0.0);
    assert_eq!(desc[2][0], 0.0);
}

/// Ratio-only indices are invariant to (vh, vv) -> (k*vh, k*vv)
#[test]
fn test_ratio_indices_scale_invariant() {
    let vh = [0.004f32, 0.01, 0.03];
    let vv = [0.02f32, 0.02, 0.05];
    let k = 7.25f32;
    let vh_scaled: Vec<f32> = vh.iter().map(|v| v * k).collect();
    let vv_scaled: Vec<f32> = vv.iter().map(|v| v * k).collect();

    let calculators: [&dyn IndexCalculator; 2] = [&DPRVIC::new(), &DualPolDescriptors::new()];
    for calc in calculators {
        let plain = run_row(calc, &vh, &vv);
        let scaled = run_row(calc, &vh_scaled, &vv_scaled);
        for (band, (a, b)) in plain.iter().zip(&scaled).enumerate() {
            for i in 0..a.len() {
                assert!(
                    (a[i] - b[i]).abs() < 1e-5,
                    "{} band {} not scale-invariant at {}: {} vs {}",
                    calc.name(),
                    band,
                    i,
                    a[i],
                    b[i]
                );
            }
        }
    }
}

/// The dB-based and power-based indices are not scale-invariant
#[test]
fn test_db_indices_change_under_scaling() {
    let vh = [0.004f32];
    let vv = [0.02f32];
    let k = 10.0f32;
    let vh_scaled = [vh[0] * k];
    let vv_scaled = [vv[0] * k];

    let calculators: [&dyn IndexCalculator; 4] =
        [&CR::new(), &POL::new(), &RVIM::new(), &DPSVIM::new()];
    for calc in calculators {
        let plain = run_row(calc, &vh, &vv);
        let scaled = run_row(calc, &vh_scaled, &vv_scaled);
        assert!(
            (plain[0][0] - scaled[0][0]).abs() > 1e-3,
            "{} unexpectedly scale-invariant: {} vs {}",
            calc.name(),
            plain[0][0],
            scaled[0][0]
        );
    }
}

/// Every formula returns a value for finite positive inputs, and zero or
/// negative backscatter never raises: it lands as NaN/inf per IEEE-754
#[test]
fn test_no_panic_on_edge_inputs() {
    let values = [-0.5f32, 0.0, 1e-6, 0.01, 0.5, 1.0, 3.7, f32::NAN];
    let mut vh = Vec::new();
    let mut vv = Vec::new();
    for &a in &values {
        for &b in &values {
            vh.push(a);
            vv.push(b);
        }
    }

    let calculators: [&dyn IndexCalculator; 7] = [
        &CR::new(),
        &DPSVI::with_co_pol_max(4.0),
        &DPSVIM::new(),
        &POL::new(),
        &RVIM::new(),
        &DPRVIC::new(),
        &DualPolDescriptors::new(),
    ];
    for calc in calculators {
        let outputs = run_row(calc, &vh, &vv);
        for band in &outputs {
            assert_eq!(band.len(), vh.len());
        }
    }
}

/// NaN input pixels stay NaN through the ratio clamp and the dB formulas
#[test]
fn test_nan_propagates() {
    let vh = [f32::NAN, 0.01];
    let vv = [0.02f32, f32::NAN];

    assert!(run_row(&CR::new(), &vh, &vv)[0][0].is_nan());
    assert!(run_row(&CR::new(), &vh, &vv)[0][1].is_nan());
    assert!(run_row(&DPRVIC::new(), &vh, &vv)[0][0].is_nan());
    assert!(run_row(&DPRVIC::new(), &vh, &vv)[0][1].is_nan());
    assert!(run_row(&DualPolDescriptors::new(), &vh, &vv)[1][0].is_nan());
    assert!(run_row(&DPSVIM::new(), &vh, &vv)[0][1].is_nan());
}

/// Division of dB values lands on infinities where the denominator
/// vanishes, mirroring no-data handling in the source products
#[test]
fn test_zero_backscatter_yields_nonfinite() {
    // vh = 1.0 -> 0 dB denominator for CR
    let cr = run_row(&CR::new(), &[1.0], &[0.02]);
    assert!(!cr[0][0].is_finite());

    // vh = 0 -> -inf dB; Pol becomes -inf/-inf = NaN
    let pol = run_row(&POL::new(), &[0.0], &[0.02]);
    assert!(pol[0][0].is_nan());
}

/// Product names and band lists drive file naming and merge order
#[test]
fn test_output_band_names() {
    assert_eq!(CR::new().output_bands(), &["CR"]);
    assert_eq!(DPSVI::new().output_bands(), &["DPSVI"]);
    assert_eq!(DPSVIM::new().name(), "DPSVIm");
    assert_eq!(POL::new().name(), "Pol");
    assert_eq!(RVIM::new().name(), "RVIm");
    assert_eq!(DPRVIC::new().output_bands(), &["DPRVIC"]);
    assert_eq!(
        DualPolDescriptors::new().output_bands(),
        &["m_c", "H_c", "Theta_c"]
    );
    assert_eq!(DualPolDescriptors::new().name(), "desc");
}

#[test]
#[should_panic(expected = "input rows differ in length")]
fn test_mismatched_rows_are_rejected() {
    run_row(&CR::new(), &[0.01, 0.02], &[0.02]);
}
