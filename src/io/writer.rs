// src/io/writer.rs
use std::fs;
use std::path::{Path, PathBuf};

use gdal::raster::{Buffer, RasterCreationOptions};
use gdal::{Dataset, DriverManager, DriverType, Metadata};

use crate::types::{SarViError, SarViResult};

use super::reader::GeoInfo;

/// Sequential row-major writer for a float32 raster product.
///
/// The file on disk is not a valid product until `finish` returns; a failed
/// run calls `discard`, which closes the handle and removes the partial file.
pub struct IndexWriter {
    dataset: Dataset,
    path: PathBuf,
    width: usize,
    height: usize,
}

impl IndexWriter {
    /// Create an empty product with one float32 band per name, NaN no-data,
    /// inheriting the source geocoding.
    pub fn create(path: &Path, geo: &GeoInfo, band_names: &[&str]) -> SarViResult<Self> {
        let driver = DriverManager::get_output_driver_for_dataset_name(path, DriverType::Raster)
            .ok_or_else(|| SarViError::UnsupportedOutput(path.to_path_buf()))?;

        let creation_options = RasterCreationOptions::from_iter(["COMPRESS=DEFLATE"]);
        let mut dataset = driver.create_with_band_type_with_options::<f32, _>(
            path,
            geo.width,
            geo.height,
            band_names.len(),
            &creation_options,
        )?;

        dataset.set_projection(&geo.projection)?;
        dataset.set_geo_transform(&geo.geo_transform)?;

        for (i, name) in band_names.iter().enumerate() {
            let mut band = dataset.rasterband(i + 1)?;
            band.set_no_data_value(Some(f64::NAN))?;
            band.set_description(name)?;
        }

        Ok(IndexWriter {
            dataset,
            path: path.to_path_buf(),
            width: geo.width,
            height: geo.height,
        })
    }

    /// Write one row of a band (1-based). Rows must cover the full width.
    pub fn write_row(&mut self, band: usize, y: usize, data: &[f32]) -> SarViResult<()> {
        if data.len() != self.width {
            return Err(SarViError::ShapeMismatch {
                expected: self.width,
                actual: data.len(),
            });
        }
        debug_assert!(y < self.height);
        let mut buffer = Buffer::new((self.width, 1), data.to_vec());
        let mut band = self.dataset.rasterband(band)?;
        band.write((0, y as isize), (self.width, 1), &mut buffer)?;
        Ok(())
    }

    /// Flush and close the product, making it valid on disk.
    pub fn finish(mut self) -> SarViResult<PathBuf> {
        if let Err(e) = self.dataset.flush_cache() {
            self.discard();
            return Err(e.into());
        }
        let IndexWriter { dataset, path, .. } = self;
        drop(dataset);
        Ok(path)
    }

    /// Close the handle and remove the partially written file.
    pub fn discard(self) {
        let IndexWriter { dataset, path, .. } = self;
        drop(dataset);
        let _ = fs::remove_file(&path);
    }
}
