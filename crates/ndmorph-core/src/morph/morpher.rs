use rayon::prelude::*;
use tracing::info;

use crate::array::NdArray;
use crate::consts::{is_missing, IMMEDIATE_NEIGHBOURHOOD_WIDTH, PARALLEL_ELEMENT_THRESHOLD};
use crate::error::{NdError, Result};
use crate::kernel::DiscreteKernel;
use crate::neighbourhood::Neighbourhood;

use super::config::MorphConfig;
use super::ops::{Accumulator, MergeOp};

/// Sliding-window reducer: every element is replaced by the merge of its
/// neighbourhood combined elementwise with a discrete kernel.
pub struct Morpher<'a> {
    source: &'a NdArray,
    kernel: &'a DiscreteKernel,
    config: &'a MorphConfig,
    window: Neighbourhood,
    immediate: Neighbourhood,
    kernel_sum: f64,
}

/// Per-worker buffers.
struct Scratch {
    coords: Vec<usize>,
    acc: Accumulator,
}

impl<'a> Morpher<'a> {
    /// Validate shapes and precompute the window. The kernel must have the
    /// same rank as the source.
    pub fn new(
        source: &'a NdArray,
        kernel: &'a DiscreteKernel,
        config: &'a MorphConfig,
    ) -> Result<Self> {
        if kernel.rank() != source.rank() {
            return Err(NdError::RankMismatch {
                expected: source.rank(),
                actual: kernel.rank(),
            });
        }

        let window = source.neighbourhood(kernel.values().dims())?;
        window.ensure_aligned(&kernel.neighbourhood())?;
        let immediate = source.uniform_neighbourhood(IMMEDIATE_NEIGHBOURHOOD_WIDTH);

        Ok(Self {
            source,
            kernel,
            config,
            window,
            immediate,
            kernel_sum: kernel.sum(),
        })
    }

    fn scratch(&self) -> Scratch {
        Scratch {
            coords: vec![0; self.source.rank()],
            acc: Accumulator::new(self.config.merge_op),
        }
    }

    fn renormalising(&self) -> bool {
        self.config.renormalise && self.config.merge_op == MergeOp::Sum
    }

    /// Number of foreground cells among the immediate neighbours of `n`.
    fn foreground_neighbours(&self, n: usize, coords: &[usize]) -> usize {
        let centre = self.immediate.centre_index();
        let data = self.source.data();
        (0..self.immediate.size())
            .filter(|&k| k != centre)
            .filter_map(|k| self.immediate.neighbour_index(k, n, coords, self.source.dims()))
            .filter(|&j| data[j] != 0.0 && !is_missing(data[j]))
            .count()
    }

    fn meets_restrictions(&self, n: usize, coords: &[usize]) -> bool {
        let rules = &self.config.restrictions;
        if !rules.value_allowed(self.source[n]) {
            return false;
        }
        if rules.uses_neighbours() {
            return rules.neighbours_allowed(self.foreground_neighbours(n, coords));
        }
        true
    }

    fn sample(&self, n: usize, scratch: &mut Scratch) -> f64 {
        self.source.expand_index_into(n, &mut scratch.coords);

        if !self.meets_restrictions(n, &scratch.coords) {
            return self.source[n];
        }

        let weights = self.kernel.values().data();
        let data = self.source.data();
        let dims = self.source.dims();
        let element_op = self.config.element_op;
        let mut visited = 0.0;

        scratch.acc.reset();
        for (k, &w) in weights.iter().enumerate() {
            if is_missing(w) {
                continue;
            }
            let Some(j) = self.window.neighbour_index(k, n, &scratch.coords, dims) else {
                continue;
            };
            if let Some(v) = element_op.combine(data[j], w) {
                scratch.acc.push(v);
            }
            visited += w;
        }

        let mut value = scratch.acc.finish();
        if self.renormalising() {
            if self.kernel_sum != 0.0 {
                value *= self.kernel_sum;
            }
            if visited != 0.0 {
                value /= visited;
            }
        }
        value
    }

    /// Apply the operation to every element. The result has the source's
    /// shape and spacing.
    pub fn run(&self) -> Result<NdArray> {
        let n = self.source.len();
        let parallel = n >= PARALLEL_ELEMENT_THRESHOLD;

        let samples: Vec<f64> = if parallel {
            (0..n)
                .into_par_iter()
                .map_init(|| self.scratch(), |scratch, i| self.sample(i, scratch))
                .collect()
        } else {
            let mut scratch = self.scratch();
            (0..n).map(|i| self.sample(i, &mut scratch)).collect()
        };

        info!(
            element_op = %self.config.element_op,
            merge_op = %self.config.merge_op,
            window = self.window.size(),
            parallel,
            "Morph complete"
        );

        self.source.with_data(samples)
    }
}
