pub mod line;
pub mod separable;

pub use line::{transform_line, Envelope};
pub use separable::{distance_transform, squared_distance_transform};

use serde::{Deserialize, Serialize};

use crate::array::NdArray;

/// Options for the Euclidean distance transform.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DistanceConfig {
    /// Scale each axis by the array's spacing.
    #[serde(default)]
    pub honor_spacing: bool,
}

/// Distance transform with options taken from `config`.
pub fn run(source: &NdArray, config: &DistanceConfig) -> NdArray {
    distance_transform(source, config.honor_spacing)
}
