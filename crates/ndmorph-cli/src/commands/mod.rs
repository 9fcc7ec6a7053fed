pub mod components;
pub mod config;
pub mod distance;
pub mod info;
pub mod morph;
pub mod neighbourhood;
pub mod resample;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ndmorph_core::io::{array_to_toml, load_array, save_array};
use ndmorph_core::kernel::DiscreteKernel;
use ndmorph_core::{NdArray, NdMorphConfig};
use tracing::info;

pub fn load_input(path: &Path) -> Result<NdArray> {
    let array =
        load_array(path).with_context(|| format!("Failed to load {}", path.display()))?;
    info!(dims = ?array.dims(), missing = array.count_missing(), "Loaded input");
    Ok(array)
}

pub fn load_kernel(path: &Path) -> Result<DiscreteKernel> {
    let values = load_input(path)?;
    DiscreteKernel::new(values).with_context(|| format!("Invalid kernel in {}", path.display()))
}

pub fn load_config(path: Option<&PathBuf>) -> Result<NdMorphConfig> {
    match path {
        Some(path) => NdMorphConfig::load(path)
            .with_context(|| format!("Failed to read config {}", path.display())),
        None => Ok(NdMorphConfig::default()),
    }
}

/// Save to `output`, or print the TOML form to stdout.
pub fn write_output(array: &NdArray, output: Option<&PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            save_array(path, array)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Saved {:?} array to {}", array.dims(), path.display());
        }
        None => print!("{}", array_to_toml(array)?),
    }
    Ok(())
}
