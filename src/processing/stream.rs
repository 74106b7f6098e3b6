// src/processing/stream.rs
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::io::reader::{Channel, Scene};
use crate::io::writer::IndexWriter;
use crate::processing::indices::{DualPolDescriptors, CR, DPRVIC, DPSVI, DPSVIM, POL, RVIM};
use crate::types::SarViResult;

/// Trait for dual-pol SAR index calculators
pub trait IndexCalculator: Send + Sync {
    /// Short identifier used in output product names.
    fn name(&self) -> &str;

    /// Output band names, in write order.
    fn output_bands(&self) -> &[&'static str];

    /// Compute one row of each output band from co-registered input rows.
    ///
    /// `vh` is the cross-pol row, `vv` the co-pol row, both linear power
    /// with NaN no-data. Invalid pixels (zero or negative backscatter)
    /// yield NaN or infinities per IEEE-754 and are written as-is.
    fn calculate_row(&self, vh: &[f32], vv: &[f32], outputs: &mut [Vec<f32>]);

    /// True if the calculator still needs the scene-wide co-pol maximum
    /// before any row can be computed.
    fn needs_co_pol_max(&self) -> bool {
        false
    }

    /// Receive the scene-wide co-pol maximum ahead of the row pass.
    fn set_co_pol_max(&mut self, _max: f32) {}
}

impl<I: IndexCalculator + ?Sized> IndexCalculator for Box<I> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn output_bands(&self) -> &[&'static str] {
        (**self).output_bands()
    }

    fn calculate_row(&self, vh: &[f32], vv: &[f32], outputs: &mut [Vec<f32>]) {
        (**self).calculate_row(vh, vv, outputs)
    }

    fn needs_co_pol_max(&self) -> bool {
        (**self).needs_co_pol_max()
    }

    fn set_co_pol_max(&mut self, max: f32) {
        (**self).set_co_pol_max(max)
    }
}

/// Output path for one index product of a scene.
pub fn product_path(vi_dir: &Path, scene_name: &str, index_name: &str) -> PathBuf {
    vi_dir.join(format!("{}_{}.tif", scene_name, index_name))
}

/// Row-streaming driver: one full pass over the scene per index product,
/// rows written in strictly increasing order.
pub struct StreamProcessor {
    vi_dir: PathBuf,
}

impl StreamProcessor {
    pub fn new<P: Into<PathBuf>>(vi_dir: P) -> Self {
        StreamProcessor {
            vi_dir: vi_dir.into(),
        }
    }

    /// Produce one persisted index product for the scene.
    ///
    /// `co_pol_max` pins the normalization constant for calculators that
    /// ask for one (DPSVI); without it the scene is scanned once. Pinning
    /// the value across a time series keeps the index comparable between
    /// acquisition dates, which a per-scene maximum does not.
    pub fn process<I: IndexCalculator>(
        &self,
        scene: &Scene,
        mut calculator: I,
        co_pol_max: Option<f32>,
    ) -> SarViResult<PathBuf> {
        if calculator.needs_co_pol_max() {
            let max = match co_pol_max {
                Some(value) => {
                    info!("{}: using pinned co-pol maximum {}", calculator.name(), value);
                    value
                }
                None => {
                    let value = scene.co_pol_max()?;
                    info!(
                        "{}: scene-wide co-pol maximum {} from '{}'",
                        calculator.name(),
                        value,
                        scene.name()
                    );
                    value
                }
            };
            calculator.set_co_pol_max(max);
        }

        fs::create_dir_all(&self.vi_dir)?;
        let path = product_path(&self.vi_dir, scene.name(), calculator.name());
        let mut writer = IndexWriter::create(&path, scene.geo(), calculator.output_bands())?;
        info!("writing {} ({} rows)", path.display(), scene.height());

        match stream_rows(scene, &calculator, &mut writer) {
            Ok(()) => writer.finish(),
            Err(e) => {
                writer.discard();
                Err(e)
            }
        }
    }

    /// Compute the full index set for one scene.
    pub fn process_all(&self, scene: &Scene, co_pol_max: Option<f32>) -> SarViResult<Vec<PathBuf>> {
        let mut products = Vec::with_capacity(7);
        products.push(self.process(scene, CR::new(), None)?);
        products.push(self.process(scene, DualPolDescriptors::new(), None)?);
        products.push(self.process(scene, DPRVIC::new(), None)?);
        products.push(self.process(scene, DPSVI::new(), co_pol_max)?);
        products.push(self.process(scene, DPSVIM::new(), None)?);
        products.push(self.process(scene, POL::new(), None)?);
        products.push(self.process(scene, RVIM::new(), None)?);
        Ok(products)
    }
}

fn stream_rows<I: IndexCalculator>(
    scene: &Scene,
    calculator: &I,
    writer: &mut IndexWriter,
) -> SarViResult<()> {
    let width = scene.width();
    let height = scene.height();

    // one resident row buffer per band, reused across the whole pass
    let mut vh = vec![0.0f32; width];
    let mut vv = vec![0.0f32; width];
    let mut outputs = vec![vec![0.0f32; width]; calculator.output_bands().len()];

    for y in 0..height {
        scene.read_row_into(Channel::Cross, y, &mut vh)?;
        scene.read_row_into(Channel::Co, y, &mut vv)?;
        calculator.calculate_row(&vh, &vv, &mut outputs);
        for (band, row) in outputs.iter().enumerate() {
            writer.write_row(band + 1, y, row)?;
        }
        debug!("processed row {} of {}", y + 1, height);
    }
    Ok(())
}
