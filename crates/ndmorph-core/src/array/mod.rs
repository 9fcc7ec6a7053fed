pub mod index;
pub mod line;

pub use line::{LineView, StridedLine, StridedLineMut};

use std::ops::{Index, IndexMut};

use ndarray::{ArrayD, IxDyn, ShapeBuilder};
use rayon::prelude::*;

use crate::consts::{is_missing, PARALLEL_ELEMENT_THRESHOLD};
use crate::error::{NdError, Result};
use crate::neighbourhood::Neighbourhood;

/// Dense N-dimensional array of `f64` with axis 0 varying fastest.
///
/// Owns a flat buffer together with its dimensions, the derived strides and
/// an optional physical spacing per axis (defaults to 1.0).
#[derive(Clone, Debug, PartialEq)]
pub struct NdArray {
    data: Vec<f64>,
    dims: Vec<usize>,
    strides: Vec<usize>,
    spacing: Vec<f64>,
}

impl NdArray {
    /// Wrap `data` with shape `dims`. Fails with `ShapeMismatch` if the buffer
    /// length is not the product of `dims`.
    pub fn new(dims: Vec<usize>, data: Vec<f64>) -> Result<Self> {
        let strides = index::compute_strides(&dims);
        let expected = strides[dims.len()];
        if data.len() != expected {
            return Err(NdError::ShapeMismatch {
                expected,
                actual: data.len(),
            });
        }
        let spacing = vec![1.0; dims.len()];
        Ok(Self {
            data,
            dims,
            strides,
            spacing,
        })
    }

    /// Array of shape `dims` with every element set to `value`.
    pub fn filled(dims: Vec<usize>, value: f64) -> Self {
        let strides = index::compute_strides(&dims);
        let len = strides[dims.len()];
        let spacing = vec![1.0; dims.len()];
        Self {
            data: vec![value; len],
            dims,
            strides,
            spacing,
        }
    }

    /// One-dimensional array over `data`.
    pub fn from_vec(data: Vec<f64>) -> Self {
        let dims = vec![data.len()];
        let strides = index::compute_strides(&dims);
        Self {
            data,
            dims,
            strides,
            spacing: vec![1.0],
        }
    }

    /// Same shape and spacing as `self`, new contents.
    pub fn with_data(&self, data: Vec<f64>) -> Result<Self> {
        let mut out = Self::new(self.dims.clone(), data)?;
        out.spacing = self.spacing.clone();
        Ok(out)
    }

    pub fn with_spacing(mut self, spacing: Vec<f64>) -> Result<Self> {
        self.set_spacing(spacing)?;
        Ok(self)
    }

    /// Replace the per-axis spacing. Must have one positive, finite entry per axis.
    pub fn set_spacing(&mut self, spacing: Vec<f64>) -> Result<()> {
        if spacing.len() != self.rank() {
            return Err(NdError::RankMismatch {
                expected: self.rank(),
                actual: spacing.len(),
            });
        }
        if let Some(bad) = spacing.iter().find(|s| !(s.is_finite() && **s > 0.0)) {
            return Err(NdError::InvalidSpacing(format!(
                "spacing must be positive and finite, got {bad}"
            )));
        }
        self.spacing = spacing;
        Ok(())
    }

    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Strides, one more than the rank; the last entry equals `len()`.
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    pub fn spacing(&self) -> &[f64] {
        &self.spacing
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn into_data(self) -> Vec<f64> {
        self.data
    }

    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    /// Elementwise map into a new array of the same shape and spacing.
    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> Self {
        Self {
            data: self.data.iter().map(|&v| f(v)).collect(),
            dims: self.dims.clone(),
            strides: self.strides.clone(),
            spacing: self.spacing.clone(),
        }
    }

    /// Number of missing (NaN) cells.
    pub fn count_missing(&self) -> usize {
        self.data.iter().filter(|&&v| is_missing(v)).count()
    }

    // -----------------------------------------------------------------------
    // Element access
    // -----------------------------------------------------------------------

    /// Checked access by linear index.
    pub fn get(&self, n: usize) -> Result<f64> {
        self.data.get(n).copied().ok_or(NdError::IndexOutOfRange {
            index: n,
            bound: self.data.len(),
            axis: None,
        })
    }

    /// Checked access by coordinates.
    pub fn at(&self, coords: &[usize]) -> Result<f64> {
        let n = self.flatten_index_checked(coords)?;
        Ok(self.data[n])
    }

    /// Checked mutable access by coordinates.
    pub fn at_mut(&mut self, coords: &[usize]) -> Result<&mut f64> {
        let n = self.flatten_index_checked(coords)?;
        Ok(&mut self.data[n])
    }

    // -----------------------------------------------------------------------
    // Index conversion
    // -----------------------------------------------------------------------

    /// Unchecked coordinate-to-linear conversion.
    pub fn flatten_index(&self, coords: &[usize]) -> usize {
        index::flatten(coords, &self.dims, &self.strides)
    }

    /// Coordinate-to-linear conversion with rank and bounds checks. A
    /// coordinate past its extent is `IndexOutOfRange` tagged with its axis.
    pub fn flatten_index_checked(&self, coords: &[usize]) -> Result<usize> {
        if coords.len() != self.rank() {
            return Err(NdError::RankMismatch {
                expected: self.rank(),
                actual: coords.len(),
            });
        }
        for (axis, (&coord, &extent)) in coords.iter().zip(&self.dims).enumerate() {
            if coord >= extent {
                return Err(NdError::IndexOutOfRange {
                    index: coord,
                    bound: extent,
                    axis: Some(axis),
                });
            }
        }
        Ok(self.flatten_index(coords))
    }

    /// Unchecked linear-to-coordinate conversion.
    pub fn expand_index(&self, n: usize) -> Vec<usize> {
        let mut coords = vec![0; self.rank()];
        self.expand_index_into(n, &mut coords);
        coords
    }

    /// Like [`expand_index`](Self::expand_index), reusing a caller buffer of length `rank()`.
    pub fn expand_index_into(&self, n: usize, coords: &mut [usize]) {
        index::expand_into(n, &self.dims, &self.strides, coords);
    }

    pub fn expand_index_checked(&self, n: usize) -> Result<Vec<usize>> {
        if n >= self.len() {
            return Err(NdError::IndexOutOfRange {
                index: n,
                bound: self.len(),
                axis: None,
            });
        }
        Ok(self.expand_index(n))
    }

    // -----------------------------------------------------------------------
    // Line access
    // -----------------------------------------------------------------------

    fn check_axis(&self, axis: usize) -> Result<()> {
        if axis >= self.rank() {
            return Err(NdError::IndexOutOfRange {
                index: axis,
                bound: self.rank(),
                axis: None,
            });
        }
        Ok(())
    }

    /// Number of lines running along `axis`. Zero when the axis is empty.
    pub fn count_lines(&self, axis: usize) -> Result<usize> {
        self.check_axis(axis)?;
        Ok(self.line_count(axis))
    }

    /// `axis` must be below `rank()`.
    #[inline]
    pub(crate) fn line_count(&self, axis: usize) -> usize {
        match self.dims[axis] {
            0 => 0,
            extent => self.len() / extent,
        }
    }

    /// Start offset in the buffer of line `n` along `axis`.
    pub fn line_offset(&self, axis: usize, n: usize) -> usize {
        index::line_offset(axis, n, &self.strides)
    }

    /// Strided view of line `n` along `axis`.
    pub fn begin_line(&self, axis: usize, n: usize) -> Result<LineView> {
        let lines = self.count_lines(axis)?;
        if n >= lines {
            return Err(NdError::IndexOutOfRange {
                index: n,
                bound: lines,
                axis: None,
            });
        }
        Ok(self.line_unchecked(axis, n))
    }

    /// One-past-the-end offset of line `n` along `axis`.
    pub fn end_line(&self, axis: usize, n: usize) -> Result<usize> {
        Ok(self.begin_line(axis, n)?.end())
    }

    #[inline]
    pub(crate) fn line_unchecked(&self, axis: usize, n: usize) -> LineView {
        LineView::new(
            self.line_offset(axis, n),
            self.strides[axis],
            self.dims[axis],
        )
    }

    /// View from `coords` to the end of `axis`, holding the other axes fixed.
    pub fn line_through(&self, coords: &[usize], axis: usize) -> Result<LineView> {
        self.check_axis(axis)?;
        let start = self.flatten_index_checked(coords)?;
        Ok(LineView::new(
            start,
            self.strides[axis],
            self.dims[axis] - coords[axis],
        ))
    }

    /// Every line along `axis`, in line-number order.
    pub fn lines(&self, axis: usize) -> Result<impl Iterator<Item = LineView> + '_> {
        self.check_axis(axis)?;
        Ok((0..self.line_count(axis)).map(move |n| self.line_unchecked(axis, n)))
    }

    /// Apply `f` to a contiguous copy of every line along `axis`, then write
    /// the lines back. Large arrays spread the lines over Rayon workers.
    pub fn update_lines<F>(&mut self, axis: usize, f: F) -> Result<()>
    where
        F: Fn(&mut [f64]) + Sync,
    {
        let lines = self.count_lines(axis)?;
        let views: Vec<LineView> = (0..lines).map(|n| self.line_unchecked(axis, n)).collect();

        if self.len() >= PARALLEL_ELEMENT_THRESHOLD && lines > 1 {
            let data = &self.data;
            let results: Vec<Vec<f64>> = views
                .par_iter()
                .map(|view| {
                    let mut buf = view.gather(data);
                    f(&mut buf);
                    buf
                })
                .collect();
            for (view, values) in views.iter().zip(&results) {
                view.scatter(&mut self.data, values);
            }
        } else {
            let mut buf = Vec::with_capacity(self.dims[axis]);
            for view in &views {
                buf.clear();
                buf.extend(view.indices().map(|idx| self.data[idx]));
                f(&mut buf);
                view.scatter(&mut self.data, &buf);
            }
        }
        Ok(())
    }

    pub fn line(&self, view: LineView) -> StridedLine<'_> {
        view.view(&self.data)
    }

    pub fn line_mut(&mut self, view: LineView) -> StridedLineMut<'_> {
        view.view_mut(&mut self.data)
    }

    // -----------------------------------------------------------------------
    // Neighbourhoods
    // -----------------------------------------------------------------------

    /// Neighbourhood spanning the full extent of every axis.
    pub fn full_neighbourhood(&self) -> Neighbourhood {
        Neighbourhood::build(&self.dims, &self.strides)
    }

    /// Neighbourhood with the same width on every axis.
    pub fn uniform_neighbourhood(&self, width: usize) -> Neighbourhood {
        let widths = vec![width; self.rank()];
        Neighbourhood::build(&widths, &self.strides)
    }

    /// Neighbourhood with per-axis `widths`; one width per axis is required.
    pub fn neighbourhood(&self, widths: &[usize]) -> Result<Neighbourhood> {
        if widths.len() != self.rank() {
            return Err(NdError::RankMismatch {
                expected: self.rank(),
                actual: widths.len(),
            });
        }
        Ok(Neighbourhood::build(widths, &self.strides))
    }

    // -----------------------------------------------------------------------
    // ndarray interop
    // -----------------------------------------------------------------------

    /// Copy into an `ndarray` array with the same shape (Fortran order).
    pub fn to_ndarray(&self) -> Result<ArrayD<f64>> {
        let shape = IxDyn(&self.dims).f();
        ArrayD::from_shape_vec(shape, self.data.clone()).map_err(|_| NdError::ShapeMismatch {
            expected: self.strides[self.rank()],
            actual: self.data.len(),
        })
    }

    /// Build from any `ndarray` array, preserving logical indexing.
    pub fn from_ndarray(array: &ArrayD<f64>) -> Self {
        let dims = array.shape().to_vec();
        let data: Vec<f64> = array.t().iter().copied().collect();
        let strides = index::compute_strides(&dims);
        let spacing = vec![1.0; dims.len()];
        Self {
            data,
            dims,
            strides,
            spacing,
        }
    }
}

impl Index<usize> for NdArray {
    type Output = f64;

    fn index(&self, n: usize) -> &f64 {
        &self.data[n]
    }
}

impl IndexMut<usize> for NdArray {
    fn index_mut(&mut self, n: usize) -> &mut f64 {
        &mut self.data[n]
    }
}

impl Index<&[usize]> for NdArray {
    type Output = f64;

    fn index(&self, coords: &[usize]) -> &f64 {
        &self.data[self.flatten_index(coords)]
    }
}
