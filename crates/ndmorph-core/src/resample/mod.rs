mod interpolant;
pub mod resampler;

pub use resampler::Resampler;

use serde::{Deserialize, Serialize};

use crate::array::NdArray;
use crate::error::Result;
use crate::kernel::KernelSpec;

/// Where to sample.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SamplingScheme {
    /// One vector of fractional indices per axis; the output is their
    /// Cartesian product.
    Grid { locations: Vec<Vec<f64>> },
    /// Individual points, each with one fractional index per axis.
    Points { points: Vec<Vec<f64>> },
}

impl Default for SamplingScheme {
    fn default() -> Self {
        SamplingScheme::Grid {
            locations: Vec::new(),
        }
    }
}

/// Kernel and sampling scheme for a resampling run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResampleConfig {
    #[serde(default)]
    pub kernel: KernelSpec,
    #[serde(default)]
    pub scheme: SamplingScheme,
}

/// Resample `source` as described by `config`.
///
/// Grid sampling yields an array shaped by the location counts; point
/// sampling yields a one-dimensional array with one value per point.
pub fn resample(source: &NdArray, config: &ResampleConfig) -> Result<NdArray> {
    let resampler = Resampler::from_spec(&config.kernel);
    match &config.scheme {
        SamplingScheme::Grid { locations } => resampler.resample_grid(source, locations),
        SamplingScheme::Points { points } => {
            Ok(NdArray::from_vec(resampler.resample_points(source, points)?))
        }
    }
}
