// src/types.rs
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Polarization mode of a pre-processed Sentinel-1 GRD scene, mapped to a
/// fixed table of band names. Accepts the two-letter filename tokens
/// ("DV", "DH", "SH", "SV", "HH") in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PolarizationMode {
    /// Dual-pol, V transmit: VH (cross) + VV (co)
    DualV,
    /// Dual-pol, H transmit: HV (cross) + HH (co)
    DualH,
    /// Single-pol HH
    SingleH,
    /// Single-pol VV
    SingleV,
}

impl PolarizationMode {
    /// Band names this mode carries, in storage order.
    pub fn band_names(&self) -> &'static [&'static str] {
        match self {
            PolarizationMode::DualV => &["Gamma0_VH", "Gamma0_VV"],
            PolarizationMode::DualH => &["Gamma0_HV", "Gamma0_HH"],
            PolarizationMode::SingleH => &["Gamma0_HH"],
            PolarizationMode::SingleV => &["Gamma0_VV"],
        }
    }

    /// The (cross-pol, co-pol) band pair, if this is a dual-pol mode.
    /// Index computation requires both channels.
    pub fn dual_pair(&self) -> Option<(&'static str, &'static str)> {
        match self.band_names() {
            &[cross, co] => Some((cross, co)),
            _ => None,
        }
    }

    /// Two-letter token used in product names and configuration files.
    pub fn token(&self) -> &'static str {
        match self {
            PolarizationMode::DualV => "DV",
            PolarizationMode::DualH => "DH",
            PolarizationMode::SingleH => "SH",
            PolarizationMode::SingleV => "SV",
        }
    }
}

impl FromStr for PolarizationMode {
    type Err = SarViError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DV" => Ok(PolarizationMode::DualV),
            "DH" => Ok(PolarizationMode::DualH),
            "SH" | "HH" => Ok(PolarizationMode::SingleH),
            "SV" => Ok(PolarizationMode::SingleV),
            _ => Err(SarViError::InvalidPolarization(s.to_string())),
        }
    }
}

impl TryFrom<String> for PolarizationMode {
    type Error = SarViError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<PolarizationMode> for String {
    fn from(mode: PolarizationMode) -> String {
        mode.token().to_string()
    }
}

impl fmt::Display for PolarizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Error types for index computation and product I/O
#[derive(Debug, thiserror::Error)]
pub enum SarViError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GDAL error: {0}")]
    Gdal(#[from] gdal::errors::GdalError),

    #[error("scene '{scene}' has no band named '{band}'")]
    MissingBand { scene: String, band: String },

    #[error("index product not found: {0}")]
    MissingIndexProduct(PathBuf),

    #[error("row buffer length {actual} does not match scene width {expected}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("raster is {actual_w}x{actual_h}, expected {expected_w}x{expected_h}")]
    DimensionMismatch {
        expected_w: usize,
        expected_h: usize,
        actual_w: usize,
        actual_h: usize,
    },

    #[error("unknown polarization mode: '{0}'")]
    InvalidPolarization(String),

    #[error("polarization mode {0} has no cross/co-pol band pair")]
    SinglePolScene(PolarizationMode),

    #[error("unsupported output path: {0}")]
    UnsupportedOutput(PathBuf),
}

/// Result type for index operations
pub type SarViResult<T> = Result<T, SarViError>;
