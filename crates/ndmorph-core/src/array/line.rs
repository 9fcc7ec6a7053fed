use std::ops::{Index, IndexMut};

/// A strided run of cells in a flat buffer: `len` elements starting at
/// `start`, `step` apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineView {
    pub start: usize,
    pub step: usize,
    pub len: usize,
}

impl LineView {
    pub fn new(start: usize, step: usize, len: usize) -> Self {
        Self { start, step, len }
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Buffer index of the `i`-th element of the line.
    #[inline]
    pub fn index(&self, i: usize) -> usize {
        self.start + i * self.step
    }

    /// One-past-the-end buffer offset, i.e. where element `len` would live.
    pub fn end(&self) -> usize {
        self.start + self.len * self.step
    }

    /// Buffer index of the last element, if any.
    pub fn last(&self) -> Option<usize> {
        self.len.checked_sub(1).map(|i| self.index(i))
    }

    /// True when every element lies inside a buffer of `buffer_len` cells.
    pub fn fits(&self, buffer_len: usize) -> bool {
        self.last().is_none_or(|last| last < buffer_len)
    }

    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len).map(move |i| self.index(i))
    }

    /// Copy the line out of `data` into a contiguous vector.
    pub fn gather(&self, data: &[f64]) -> Vec<f64> {
        self.indices().map(|idx| data[idx]).collect()
    }

    /// Write `values` back along the line. Extra values are ignored.
    pub fn scatter(&self, data: &mut [f64], values: &[f64]) {
        for (idx, &v) in self.indices().zip(values) {
            data[idx] = v;
        }
    }

    /// Borrow the line mutably out of `data`.
    pub fn view_mut<'a>(&self, data: &'a mut [f64]) -> StridedLineMut<'a> {
        debug_assert!(self.fits(data.len()));
        StridedLineMut { data, view: *self }
    }

    /// Borrow the line immutably out of `data`.
    pub fn view<'a>(&self, data: &'a [f64]) -> StridedLine<'a> {
        debug_assert!(self.fits(data.len()));
        StridedLine { data, view: *self }
    }
}

/// Read-only strided line over a borrowed buffer.
#[derive(Clone, Copy, Debug)]
pub struct StridedLine<'a> {
    data: &'a [f64],
    view: LineView,
}

impl StridedLine<'_> {
    pub fn len(&self) -> usize {
        self.view.len
    }

    pub fn is_empty(&self) -> bool {
        self.view.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.view.indices().map(move |idx| self.data[idx])
    }
}

impl Index<usize> for StridedLine<'_> {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.data[self.view.index(i)]
    }
}

/// Mutable strided line over a borrowed buffer. Lets 1-D algorithms run in
/// place along any axis.
#[derive(Debug)]
pub struct StridedLineMut<'a> {
    data: &'a mut [f64],
    view: LineView,
}

impl StridedLineMut<'_> {
    pub fn len(&self) -> usize {
        self.view.len
    }

    pub fn is_empty(&self) -> bool {
        self.view.len == 0
    }
}

impl Index<usize> for StridedLineMut<'_> {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.data[self.view.index(i)]
    }
}

impl IndexMut<usize> for StridedLineMut<'_> {
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.data[self.view.index(i)]
    }
}
