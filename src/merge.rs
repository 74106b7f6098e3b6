// src/merge.rs
use std::fs;
use std::path::{Path, PathBuf};

use gdal::{Dataset, Metadata};
use itertools::Itertools;
use log::info;

use crate::io::reader::Scene;
use crate::io::writer::IndexWriter;
use crate::processing::stream::product_path;
use crate::types::{SarViError, SarViResult};

/// Index product suffixes in merge order. The master scene's own bands
/// always come first in the combined product.
pub const MERGE_ORDER: &[&str] = &["CR", "DPRVIC", "desc", "DPSVI", "DPSVIm", "Pol", "RVIm"];

/// Combine a scene's index products with the scene itself into one raster,
/// the scene acting as master for geocoding and band order.
///
/// All index products must exist up front; nothing is written otherwise.
/// The copy is row-streamed, so only one row buffer is resident.
pub fn merge_scene(scene: &Scene, vi_dir: &Path, out_dir: &Path) -> SarViResult<PathBuf> {
    let mut sources: Vec<Dataset> = Vec::with_capacity(MERGE_ORDER.len());
    for suffix in MERGE_ORDER {
        let path = product_path(vi_dir, scene.name(), suffix);
        if !path.exists() {
            return Err(SarViError::MissingIndexProduct(path));
        }
        let dataset = Dataset::open(&path)?;
        let (width, height) = dataset.raster_size();
        if width != scene.width() || height != scene.height() {
            return Err(SarViError::DimensionMismatch {
                expected_w: scene.width(),
                expected_h: scene.height(),
                actual_w: width,
                actual_h: height,
            });
        }
        sources.push(dataset);
    }

    // master bands first, then every index band in merge order
    let mut band_names: Vec<String> = Vec::new();
    for band in 1..=scene.band_count() {
        band_names.push(scene.band_description(band)?);
    }
    for dataset in &sources {
        for band in 1..=dataset.raster_count() {
            band_names.push(dataset.rasterband(band)?.description()?);
        }
    }

    info!(
        "merging '{}' with [{}] into {} bands",
        scene.name(),
        MERGE_ORDER.iter().join(", "),
        band_names.len()
    );

    fs::create_dir_all(out_dir)?;
    let out_path = out_dir.join(format!("{}.tif", scene.name()));
    let name_refs: Vec<&str> = band_names.iter().map(String::as_str).collect();
    let mut writer = IndexWriter::create(&out_path, scene.geo(), &name_refs)?;

    match copy_rows(scene, &sources, &mut writer) {
        Ok(()) => writer.finish(),
        Err(e) => {
            writer.discard();
            Err(e)
        }
    }
}

fn copy_rows(scene: &Scene, sources: &[Dataset], writer: &mut IndexWriter) -> SarViResult<()> {
    let width = scene.width();
    let mut row = vec![0.0f32; width];

    for y in 0..scene.height() {
        let mut out_band = 1;
        for band in 1..=scene.band_count() {
            scene.read_band_row_into(band, y, &mut row)?;
            writer.write_row(out_band, y, &row)?;
            out_band += 1;
        }
        for dataset in sources {
            for band in 1..=dataset.raster_count() {
                dataset.rasterband(band)?.read_into_slice::<f32>(
                    (0, y as isize),
                    (width, 1),
                    (width, 1),
                    &mut row,
                    None,
                )?;
                writer.write_row(out_band, y, &row)?;
                out_band += 1;
            }
        }
    }
    Ok(())
}
