use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sarvi")]
#[command(about = "Dual-pol SAR vegetation index calculator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory for per-scene index products
    #[arg(long, default_value = "sar_vi", global = true)]
    pub vi_dir: PathBuf,

    /// Directory for merged products
    #[arg(long, default_value = "merged", global = true)]
    pub out_dir: PathBuf,

    /// Polarization mode of the input scenes (DV, DH, SH, SV)
    #[arg(short, long, default_value = "DV", global = true)]
    pub polarization: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Cross Ratio: 10*log10(VV) / 10*log10(VH)
    Cr {
        /// Pre-processed dual-pol scene
        #[arg(short, long)]
        scene: PathBuf,
    },

    /// Dual-pol SAR Vegetation Index (needs the scene-wide VV maximum)
    Dpsvi {
        /// Pre-processed dual-pol scene
        #[arg(short, long)]
        scene: PathBuf,

        /// Pin the VV maximum instead of scanning the scene
        #[arg(long)]
        vv_max: Option<f32>,
    },

    /// Modified Dual-pol SAR Vegetation Index: (VV^2 + VV*VH) / sqrt(2)
    Dpsvim {
        /// Pre-processed dual-pol scene
        #[arg(short, long)]
        scene: PathBuf,
    },

    /// Normalized polarization: (VH - VV) / (VH + VV), both in dB
    Pol {
        /// Pre-processed dual-pol scene
        #[arg(short, long)]
        scene: PathBuf,
    },

    /// Modified Radar Vegetation Index: 4*VH / (VV + VH), all in dB
    Rvim {
        /// Pre-processed dual-pol scene
        #[arg(short, long)]
        scene: PathBuf,
    },

    /// Dual-pol Radar Vegetation Index: q(q+3)/(q+1)^2 with q = min(VH/VV, 1)
    Dprvic {
        /// Pre-processed dual-pol scene
        #[arg(short, long)]
        scene: PathBuf,
    },

    /// Dual-pol descriptors m_c, H_c and Theta_c (one pass, three bands)
    Desc {
        /// Pre-processed dual-pol scene
        #[arg(short, long)]
        scene: PathBuf,
    },

    /// Compute every index for one scene and merge with the source bands
    All {
        /// Pre-processed dual-pol scene
        #[arg(short, long)]
        scene: PathBuf,

        /// Pin the DPSVI VV maximum instead of scanning the scene
        #[arg(long)]
        vv_max: Option<f32>,
    },

    /// Merge previously computed index products with the source scene
    Merge {
        /// Pre-processed dual-pol scene
        #[arg(short, long)]
        scene: PathBuf,
    },

    /// Process a batch of scenes from a JSON configuration file
    Batch {
        /// Batch configuration file
        #[arg(short, long)]
        config: PathBuf,
    },
}
