pub mod config;
pub mod morpher;
pub mod ops;

pub use config::{MorphConfig, Restrictions};
pub use morpher::Morpher;
pub use ops::{ElementOp, MergeOp};

use crate::array::NdArray;
use crate::error::Result;
use crate::kernel::DiscreteKernel;

/// Apply the sliding-window operation described by `config`.
pub fn morph(source: &NdArray, kernel: &DiscreteKernel, config: &MorphConfig) -> Result<NdArray> {
    Morpher::new(source, kernel, config)?.run()
}

/// Minimum over the nonzero positions of `kernel`.
pub fn erode(source: &NdArray, kernel: &DiscreteKernel) -> Result<NdArray> {
    morph(source, kernel, &MorphConfig::new(ElementOp::Identity, MergeOp::Min))
}

/// Maximum over the nonzero positions of `kernel`.
pub fn dilate(source: &NdArray, kernel: &DiscreteKernel) -> Result<NdArray> {
    morph(source, kernel, &MorphConfig::new(ElementOp::Identity, MergeOp::Max))
}

/// Erosion followed by dilation.
pub fn opening(source: &NdArray, kernel: &DiscreteKernel) -> Result<NdArray> {
    dilate(&erode(source, kernel)?, kernel)
}

/// Dilation followed by erosion.
pub fn closing(source: &NdArray, kernel: &DiscreteKernel) -> Result<NdArray> {
    erode(&dilate(source, kernel)?, kernel)
}

/// Median over a `width`-wide box on every axis (even widths round up).
pub fn median_filter(source: &NdArray, width: usize) -> Result<NdArray> {
    let kernel = DiscreteKernel::full(source.rank(), width);
    morph(source, &kernel, &MorphConfig::new(ElementOp::Identity, MergeOp::Median))
}

/// Mean over a `width`-wide box on every axis (even widths round up).
pub fn mean_filter(source: &NdArray, width: usize) -> Result<NdArray> {
    let kernel = DiscreteKernel::full(source.rank(), width);
    morph(source, &kernel, &MorphConfig::new(ElementOp::Identity, MergeOp::Mean))
}
