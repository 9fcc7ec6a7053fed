use std::borrow::Cow;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::array::{LineView, NdArray};
use crate::consts::{
    MISSING, PARALLEL_ELEMENT_THRESHOLD, PARALLEL_POINT_THRESHOLD, PRESHARPEN_TOLERANCE,
};
use crate::error::{NdError, Result};
use crate::kernel::{Kernel, KernelSpec};

use super::interpolant::Interpolant;

/// Separable interpolation of an array with a continuous kernel.
///
/// Locations are in index units along each axis, so integer locations fall
/// on array cells. Kernels that are not interpolating (nonzero at other
/// integers, or not 1 at the origin) are compensated by presharpening the
/// data first, so that sampling at integer locations reproduces the input.
pub struct Resampler {
    kernel: Box<dyn Kernel>,
    kernel_width: usize,
    base_offset: isize,
    presharpen: bool,
}

impl Resampler {
    pub fn new(kernel: Box<dyn Kernel>) -> Self {
        // At least two taps, so a half-width box still reaches the next cell.
        let kernel_width = ((2.0 * kernel.support_max()).floor() as usize).max(2);
        let base_offset = (kernel_width / 2).saturating_sub(1) as isize;
        let presharpen = (kernel.evaluate(0.0) - 1.0).abs() > PRESHARPEN_TOLERANCE
            || (1..kernel_width / 2)
                .any(|i| kernel.evaluate(i as f64).abs() > PRESHARPEN_TOLERANCE);
        Self {
            kernel,
            kernel_width,
            base_offset,
            presharpen,
        }
    }

    pub fn from_spec(spec: &KernelSpec) -> Self {
        Self::new(spec.build())
    }

    /// Number of samples contributing to each interpolated value.
    pub fn kernel_width(&self) -> usize {
        self.kernel_width
    }

    /// How far left of `floor(x)` the sampling window starts.
    pub fn base_offset(&self) -> usize {
        self.base_offset as usize
    }

    pub fn needs_presharpen(&self) -> bool {
        self.presharpen
    }

    /// Solve the tridiagonal system `k(1) x[i-1] + k(0) x[i] + k(1) x[i+1] = d[i]`
    /// in place, with the first and last rows pinned to the data.
    fn presharpen_line(&self, line: &mut [f64]) {
        let n = line.len();
        if n < 3 {
            return;
        }
        let diagonal = self.kernel.evaluate(0.0);
        let off = self.kernel.evaluate(1.0);

        let mut coefs = vec![0.0; n];
        for i in 1..n - 1 {
            let denom = diagonal - off * coefs[i - 1];
            coefs[i] = off / denom;
            line[i] = (line[i] - off * line[i - 1]) / denom;
        }
        for i in (1..n).rev() {
            line[i - 1] -= coefs[i - 1] * line[i];
        }
    }

    /// The array to interpolate: `source` itself, or a presharpened copy.
    pub fn working_array<'a>(&self, source: &'a NdArray) -> Result<Cow<'a, NdArray>> {
        if !self.presharpen {
            return Ok(Cow::Borrowed(source));
        }
        let mut working = source.clone();
        for axis in 0..working.rank() {
            working.update_lines(axis, |line| self.presharpen_line(line))?;
        }
        debug!(kernel_width = self.kernel_width, "Presharpened working array");
        Ok(Cow::Owned(working))
    }

    /// Interpolated value of `line` at fractional index `x`.
    fn interpolate(&self, line: &Interpolant<'_>, x: f64) -> f64 {
        let base = x.floor() as isize - self.base_offset;
        (base..base + self.kernel_width as isize)
            .map(|k| line.get(k) * self.kernel.evaluate(k as f64 - x))
            .sum()
    }

    /// Resample onto the grid spanned by one location vector per axis.
    ///
    /// Axes are handled in order; each pass replaces the extent of one axis
    /// by the number of its locations. The result keeps the source spacing.
    pub fn resample_grid(&self, source: &NdArray, locations: &[Vec<f64>]) -> Result<NdArray> {
        if locations.len() != source.rank() {
            return Err(NdError::RankMismatch {
                expected: source.rank(),
                actual: locations.len(),
            });
        }
        if let Some(axis) = locations.iter().position(|l| l.is_empty()) {
            return Err(NdError::InvalidSampling(format!(
                "no locations given for axis {axis}"
            )));
        }

        let mut current = self.working_array(source)?.into_owned();
        for (axis, locs) in locations.iter().enumerate() {
            current = self.resample_axis(&current, axis, locs)?;
        }
        current.set_spacing(source.spacing().to_vec())?;
        info!(dims = ?current.dims(), "Grid resampling complete");
        Ok(current)
    }

    fn resample_axis(&self, input: &NdArray, axis: usize, locs: &[f64]) -> Result<NdArray> {
        let mut dims = input.dims().to_vec();
        dims[axis] = locs.len();
        let mut output = NdArray::filled(dims, MISSING);

        let lines = input.count_lines(axis)?;
        let in_views: Vec<LineView> = input.lines(axis)?.collect();
        let out_views: Vec<LineView> = output.lines(axis)?.collect();
        let parallel = input.len() >= PARALLEL_ELEMENT_THRESHOLD && lines > 1;

        let sample_line = |view: &LineView| -> Vec<f64> {
            let samples = view.gather(input.data());
            let line = Interpolant::new(&samples);
            locs.iter().map(|&x| self.interpolate(&line, x)).collect()
        };

        let results: Vec<Vec<f64>> = if parallel {
            in_views.par_iter().map(sample_line).collect()
        } else {
            in_views.iter().map(sample_line).collect()
        };
        for (view, values) in out_views.iter().zip(&results) {
            view.scatter(output.data_mut(), values);
        }

        debug!(axis, lines, locations = locs.len(), parallel, "Resampled axis");
        Ok(output)
    }

    /// Sample at arbitrary points, each given as one fractional index per axis.
    pub fn resample_points(&self, source: &NdArray, points: &[Vec<f64>]) -> Result<Vec<f64>> {
        let rank = source.rank();
        if rank == 0 || source.is_empty() {
            return Err(NdError::InvalidSampling(
                "cannot sample points from an empty array".into(),
            ));
        }
        if let Some(point) = points.iter().find(|p| p.len() != rank) {
            return Err(NdError::RankMismatch {
                expected: rank,
                actual: point.len(),
            });
        }

        let working = self.working_array(source)?;
        let working = working.as_ref();
        let parallel = points.len() >= PARALLEL_POINT_THRESHOLD;

        let values = if parallel {
            points
                .par_iter()
                .map(|p| self.sample_point(working, p))
                .collect()
        } else {
            points.iter().map(|p| self.sample_point(working, p)).collect()
        };

        info!(points = points.len(), parallel, "Point resampling complete");
        Ok(values)
    }

    fn sample_point(&self, working: &NdArray, point: &[f64]) -> f64 {
        let dims = working.dims();
        let mut base = vec![0usize; dims.len()];
        let mut offset = vec![0.0; dims.len()];
        for (i, (&x, &extent)) in point.iter().zip(dims).enumerate() {
            // Windows hanging off the array are pulled back inside; the
            // interpolant's extension covers the difference.
            let start = (x.floor() as isize - self.base_offset).clamp(0, extent as isize - 1);
            base[i] = start as usize;
            offset[i] = x - start as f64;
        }
        self.sample_window(working, &mut base, &offset, dims.len() - 1)
    }

    /// Interpolate along `axis` over values produced by lower axes.
    fn sample_window(
        &self,
        working: &NdArray,
        base: &mut [usize],
        offset: &[f64],
        axis: usize,
    ) -> f64 {
        let dims = working.dims();
        let samples: Vec<f64> = if axis == 0 {
            let start = working.flatten_index(base);
            let len = self.kernel_width.min(dims[0] - base[0]);
            LineView::new(start, working.strides()[0], len).gather(working.data())
        } else {
            let origin = base[axis];
            let mut samples = Vec::with_capacity(self.kernel_width);
            for i in 0..self.kernel_width {
                if origin + i >= dims[axis] {
                    break;
                }
                base[axis] = origin + i;
                samples.push(self.sample_window(working, base, offset, axis - 1));
            }
            base[axis] = origin;
            samples
        };
        let line = Interpolant::new(&samples);
        self.interpolate(&line, offset[axis])
    }
}
