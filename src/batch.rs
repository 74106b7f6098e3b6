// src/batch.rs
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::io::reader::Scene;
use crate::merge::{merge_scene, MERGE_ORDER};
use crate::processing::stream::product_path;
use crate::processing::StreamProcessor;
use crate::types::PolarizationMode;

#[derive(Deserialize, Serialize, Debug)]
pub struct BatchConfig {
    #[serde(default)]
    pub global: GlobalParams,
    /// Ordered list of scenes to process
    pub scenes: Vec<SceneEntry>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct GlobalParams {
    /// Directory receiving per-scene index products
    #[serde(default = "default_vi_dir")]
    pub vi_dir: PathBuf,
    /// Directory receiving the merged products
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,
    #[serde(default = "default_polarization")]
    pub polarization: PolarizationMode,
    /// Pinned co-pol maximum for DPSVI, shared by the whole series
    #[serde(default)]
    pub vv_max: Option<f32>,
    /// Keep per-scene index products after merging
    #[serde(default)]
    pub keep_indices: bool,
}

fn default_vi_dir() -> PathBuf {
    PathBuf::from("sar_vi")
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("merged")
}

fn default_polarization() -> PolarizationMode {
    PolarizationMode::DualV
}

impl Default for GlobalParams {
    fn default() -> Self {
        GlobalParams {
            vi_dir: default_vi_dir(),
            out_dir: default_out_dir(),
            polarization: default_polarization(),
            vv_max: None,
            keep_indices: false,
        }
    }
}

#[derive(Deserialize, Serialize, Debug)]
pub struct SceneEntry {
    pub path: PathBuf,
    /// Override the global polarization mode for this scene
    pub polarization: Option<PolarizationMode>,
    /// Override the global DPSVI co-pol maximum for this scene
    pub vv_max: Option<f32>,
}

/// Process every scene in the configuration: compute the full index set,
/// merge, clean up intermediates. A failed scene is logged and skipped,
/// its partial outputs removed; the rest of the batch continues.
pub fn process_batch(config_path: &Path) -> Result<()> {
    let config_content = fs::read_to_string(config_path)
        .with_context(|| format!("reading batch config {}", config_path.display()))?;
    let config: BatchConfig = serde_json::from_str(&config_content)
        .with_context(|| format!("parsing batch config {}", config_path.display()))?;

    println!(
        "Starting batch processing with {} scenes...",
        config.scenes.len()
    );

    let mut failed = 0usize;
    for (i, entry) in config.scenes.iter().enumerate() {
        println!(
            "[{}/{}] Processing {}",
            i + 1,
            config.scenes.len(),
            entry.path.display()
        );

        match process_scene(entry, &config.global) {
            Ok(merged) => println!("  -> {}", merged.display()),
            Err(e) => {
                warn!("scene {} failed: {:#}", entry.path.display(), e);
                remove_scene_products(&config.global.vi_dir, &entry.path);
                failed += 1;
            }
        }
    }

    println!(
        "Batch processing complete: {} ok, {} failed",
        config.scenes.len() - failed,
        failed
    );
    Ok(())
}

fn process_scene(entry: &SceneEntry, global: &GlobalParams) -> Result<PathBuf> {
    let mode = entry.polarization.unwrap_or(global.polarization);
    let scene = Scene::open(&entry.path, mode)?;

    let processor = StreamProcessor::new(&global.vi_dir);
    let products = processor.process_all(&scene, entry.vv_max.or(global.vv_max))?;
    let merged = merge_scene(&scene, &global.vi_dir, &global.out_dir)?;

    if !global.keep_indices {
        for product in products {
            fs::remove_file(&product)
                .with_context(|| format!("removing intermediate {}", product.display()))?;
        }
    }
    Ok(merged)
}

/// Best-effort cleanup of a failed scene's index products, so a rerun
/// starts from scratch and no partial output is mistaken for a valid one.
fn remove_scene_products(vi_dir: &Path, scene_path: &Path) {
    let Some(stem) = scene_path.file_stem() else {
        return;
    };
    let name = stem.to_string_lossy();
    for suffix in MERGE_ORDER {
        let path = product_path(vi_dir, &name, suffix);
        if path.exists() {
            let _ = fs::remove_file(path);
        }
    }
}
