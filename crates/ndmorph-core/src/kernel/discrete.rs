use crate::array::NdArray;
use crate::consts::is_missing;
use crate::error::{NdError, Result};
use crate::inspect::is_symmetric;
use crate::neighbourhood::{odd_width, Neighbourhood};

/// Kernel defined only at integer grid offsets, stored as an array of
/// weights centred on the middle element. Used when the data shape does
/// not change (morphology, component labelling).
#[derive(Clone, Debug, PartialEq)]
pub struct DiscreteKernel {
    values: NdArray,
}

impl DiscreteKernel {
    /// Every dimension must be odd so the centre is well defined.
    pub fn new(values: NdArray) -> Result<Self> {
        if let Some((axis, &extent)) = values
            .dims()
            .iter()
            .enumerate()
            .find(|&(_, &d)| d % 2 == 0)
        {
            return Err(NdError::InvalidKernel(format!(
                "kernel extent {extent} on axis {axis} is not odd"
            )));
        }
        Ok(Self { values })
    }

    /// A `width`^`rank` kernel of ones. Even widths round up.
    pub fn full(rank: usize, width: usize) -> Self {
        Self {
            values: NdArray::filled(vec![odd_width(width); rank], 1.0),
        }
    }

    /// The 3^`rank` kernel connecting each cell only to its face neighbours
    /// (a cross in 2-D).
    pub fn cross(rank: usize) -> Self {
        let mut values = NdArray::filled(vec![3; rank], 0.0);
        let mut coords = vec![0; rank];
        for n in 0..values.len() {
            values.expand_index_into(n, &mut coords);
            let off_centre = coords.iter().filter(|&&c| c != 1).count();
            if off_centre <= 1 {
                values[n] = 1.0;
            }
        }
        Self { values }
    }

    pub fn values(&self) -> &NdArray {
        &self.values
    }

    pub fn rank(&self) -> usize {
        self.values.rank()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Largest half-extent over all axes.
    pub fn support_max(&self) -> f64 {
        self.values
            .dims()
            .iter()
            .map(|&d| (d / 2) as f64)
            .fold(0.0, f64::max)
    }

    /// Neighbourhood over the kernel's own extent; entry `k` corresponds to
    /// kernel value `k`.
    pub fn neighbourhood(&self) -> Neighbourhood {
        self.values.full_neighbourhood()
    }

    /// Sum of the non-missing weights.
    pub fn sum(&self) -> f64 {
        self.values.data().iter().filter(|v| !is_missing(**v)).sum()
    }

    pub fn is_symmetric(&self) -> bool {
        is_symmetric(self.values.data())
    }
}
