// src/main.rs
use anyhow::Result;
use clap::Parser;

mod batch;
mod cli;
mod io;
mod merge;
mod processing;
mod types;
mod utils;

use crate::cli::{Cli, Commands};
use crate::io::reader::Scene;
use crate::processing::indices::{DualPolDescriptors, CR, DPRVIC, DPSVI, DPSVIM, POL, RVIM};
use crate::processing::StreamProcessor;
use crate::types::PolarizationMode;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mode: PolarizationMode = cli.polarization.parse()?;
    let processor = StreamProcessor::new(&cli.vi_dir);

    match &cli.command {
        Commands::Cr { scene } => {
            let scene = Scene::open(scene, mode)?;
            let path = processor.process(&scene, CR::new(), None)?;
            println!("Processing complete: {}", path.display());
        }
        Commands::Dpsvi { scene, vv_max } => {
            let scene = Scene::open(scene, mode)?;
            let path = processor.process(&scene, DPSVI::new(), *vv_max)?;
            println!("Processing complete: {}", path.display());
        }
        Commands::Dpsvim { scene } => {
            let scene = Scene::open(scene, mode)?;
            let path = processor.process(&scene, DPSVIM::new(), None)?;
            println!("Processing complete: {}", path.display());
        }
        Commands::Pol { scene } => {
            let scene = Scene::open(scene, mode)?;
            let path = processor.process(&scene, POL::new(), None)?;
            println!("Processing complete: {}", path.display());
        }
        Commands::Rvim { scene } => {
            let scene = Scene::open(scene, mode)?;
            let path = processor.process(&scene, RVIM::new(), None)?;
            println!("Processing complete: {}", path.display());
        }
        Commands::Dprvic { scene } => {
            let scene = Scene::open(scene, mode)?;
            let path = processor.process(&scene, DPRVIC::new(), None)?;
            println!("Processing complete: {}", path.display());
        }
        Commands::Desc { scene } => {
            let scene = Scene::open(scene, mode)?;
            let path = processor.process(&scene, DualPolDescriptors::new(), None)?;
            println!("Processing complete: {}", path.display());
        }
        Commands::All { scene, vv_max } => {
            let scene = Scene::open(scene, mode)?;
            processor.process_all(&scene, *vv_max)?;
            let path = merge::merge_scene(&scene, &cli.vi_dir, &cli.out_dir)?;
            println!("Processing complete: {}", path.display());
        }
        Commands::Merge { scene } => {
            let scene = Scene::open(scene, mode)?;
            let path = merge::merge_scene(&scene, &cli.vi_dir, &cli.out_dir)?;
            println!("Processing complete: {}", path.display());
        }
        Commands::Batch { config } => {
            batch::process_batch(config)?;
        }
    }

    Ok(())
}
