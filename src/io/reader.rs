// src/io/reader.rs
use std::path::Path;

use gdal::{Dataset, Metadata};
use log::debug;

use crate::types::{PolarizationMode, SarViError, SarViResult};
use crate::utils::stats::finite_max;

/// Georeferencing shared by a scene and every product derived from it.
#[derive(Debug, Clone)]
pub struct GeoInfo {
    pub projection: String,
    pub geo_transform: [f64; 6],
    pub width: usize,
    pub height: usize,
}

/// Which of the two input channels to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Cross-polarized backscatter (VH or HV)
    Cross,
    /// Co-polarized backscatter (VV or HH)
    Co,
}

/// An opened dual-pol scene with its cross/co band pair resolved.
///
/// Bands are located by GDAL band description against the fixed name table
/// of the polarization mode. Bare rasters without band descriptions are
/// accepted in table order when the band count matches exactly.
#[derive(Debug)]
pub struct Scene {
    dataset: Dataset,
    name: String,
    geo: GeoInfo,
    cross_band: usize,
    co_band: usize,
}

impl Scene {
    pub fn open<P: AsRef<Path>>(path: P, mode: PolarizationMode) -> SarViResult<Scene> {
        let path = path.as_ref();
        let (cross_name, co_name) = mode
            .dual_pair()
            .ok_or(SarViError::SinglePolScene(mode))?;

        let dataset = Dataset::open(path)?;
        let (width, height) = dataset.raster_size();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "scene".to_string());

        let cross_band = find_band(&dataset, &name, cross_name, 1)?;
        let co_band = find_band(&dataset, &name, co_name, 2)?;

        let geo = GeoInfo {
            projection: dataset.projection(),
            geo_transform: dataset.geo_transform()?,
            width,
            height,
        };

        debug!(
            "opened scene '{}' ({}x{}, {} -> band {}, {} -> band {})",
            name, width, height, cross_name, cross_band, co_name, co_band
        );

        Ok(Scene {
            dataset,
            name,
            geo,
            cross_band,
            co_band,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn geo(&self) -> &GeoInfo {
        &self.geo
    }

    pub fn width(&self) -> usize {
        self.geo.width
    }

    pub fn height(&self) -> usize {
        self.geo.height
    }

    pub fn band_count(&self) -> usize {
        self.dataset.raster_count()
    }

    /// Description of a band (1-based), falling back to `band_<n>` for
    /// rasters that carry none.
    pub fn band_description(&self, band: usize) -> SarViResult<String> {
        let description = self.dataset.rasterband(band)?.description()?;
        if description.is_empty() {
            Ok(format!("band_{}", band))
        } else {
            Ok(description)
        }
    }

    /// Read one row of an input channel into a caller-owned buffer.
    pub fn read_row_into(&self, channel: Channel, y: usize, buf: &mut [f32]) -> SarViResult<()> {
        let band = match channel {
            Channel::Cross => self.cross_band,
            Channel::Co => self.co_band,
        };
        self.read_band_row_into(band, y, buf)
    }

    /// Read one row of an arbitrary band (1-based) into a caller-owned buffer.
    pub fn read_band_row_into(&self, band: usize, y: usize, buf: &mut [f32]) -> SarViResult<()> {
        if buf.len() != self.geo.width {
            return Err(SarViError::ShapeMismatch {
                expected: self.geo.width,
                actual: buf.len(),
            });
        }
        self.dataset.rasterband(band)?.read_into_slice::<f32>(
            (0, y as isize),
            (self.geo.width, 1),
            (self.geo.width, 1),
            buf,
            None,
        )?;
        Ok(())
    }

    /// Scene-wide maximum finite value of the co-pol band, scanned over the
    /// full extent one row at a time. NaN when the band holds no finite pixel.
    pub fn co_pol_max(&self) -> SarViResult<f32> {
        let mut row = vec![0.0f32; self.geo.width];
        let mut max = f32::NAN;
        for y in 0..self.geo.height {
            self.read_band_row_into(self.co_band, y, &mut row)?;
            max = max.max(finite_max(&row));
        }
        debug!("scene '{}': co-pol maximum {}", self.name, max);
        Ok(max)
    }
}

/// Locate a band by description. Rasters without any band description are
/// accepted when their band count equals the mode's table length, taking
/// the band at the table position.
fn find_band(
    dataset: &Dataset,
    scene: &str,
    band_name: &str,
    table_position: usize,
) -> SarViResult<usize> {
    let count = dataset.raster_count();
    let mut all_unnamed = true;
    for band in 1..=count {
        let description = dataset.rasterband(band)?.description()?;
        if description == band_name {
            return Ok(band);
        }
        if !description.is_empty() {
            all_unnamed = false;
        }
    }
    if all_unnamed && count == 2 && table_position <= count {
        return Ok(table_position);
    }
    Err(SarViError::MissingBand {
        scene: scene.to_string(),
        band: band_name.to_string(),
    })
}
