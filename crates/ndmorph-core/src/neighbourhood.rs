use ndarray::Array2;

use crate::error::{NdError, Result};

/// Relative offsets describing a rectangular window around any array position.
///
/// Offsets are enumerated in odometer order with axis 0 varying fastest, so
/// the enumeration depends only on `widths`. Two neighbourhoods built with the
/// same widths agree index-for-index even over arrays of different shape,
/// which is what lets a kernel array be zipped with a data array.
///
/// The centre (all-zero offset) is always included, exactly once, at
/// [`centre_index`](Self::centre_index).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Neighbourhood {
    widths: Vec<usize>,
    size: usize,
    locs: Array2<isize>,
    offsets: Vec<isize>,
}

/// Round a requested width up to the next odd value. Zero becomes one.
#[inline]
pub fn odd_width(width: usize) -> usize {
    if width % 2 == 0 {
        width + 1
    } else {
        width
    }
}

impl Neighbourhood {
    /// Enumerate the window described by `widths` against an array with
    /// `strides` (at least `widths.len()` entries).
    pub(crate) fn build(widths: &[usize], strides: &[usize]) -> Self {
        let rank = widths.len();
        let widths: Vec<usize> = widths.iter().map(|&w| odd_width(w)).collect();
        let extremes: Vec<isize> = widths.iter().map(|&w| ((w - 1) / 2) as isize).collect();
        let size: usize = widths.iter().product();

        let mut locs = Array2::<isize>::zeros((size, rank));
        let mut offsets = Vec::with_capacity(size);

        let mut current: Vec<isize> = extremes.iter().map(|&e| -e).collect();
        for k in 0..size {
            let mut offset = 0isize;
            for (i, &c) in current.iter().enumerate() {
                locs[[k, i]] = c;
                offset += c * strides[i] as isize;
            }
            offsets.push(offset);

            // Advance the odometer, axis 0 first.
            for (c, &e) in current.iter_mut().zip(&extremes) {
                if *c < e {
                    *c += 1;
                    break;
                }
                *c = -e;
            }
        }

        Self {
            widths,
            size,
            locs,
            offsets,
        }
    }

    /// Per-axis widths after odd rounding.
    pub fn widths(&self) -> &[usize] {
        &self.widths
    }

    pub fn rank(&self) -> usize {
        self.widths.len()
    }

    /// Number of offsets, the product of the widths.
    pub fn size(&self) -> usize {
        self.size
    }

    /// `size x rank` matrix of signed per-axis offsets.
    pub fn locs(&self) -> &Array2<isize> {
        &self.locs
    }

    /// Per-axis offset of entry `k`.
    pub fn loc(&self, k: usize) -> ndarray::ArrayView1<'_, isize> {
        self.locs.row(k)
    }

    /// Linear buffer deltas, one per entry.
    pub fn offsets(&self) -> &[isize] {
        &self.offsets
    }

    /// Half-width per axis.
    pub fn extremes(&self) -> Vec<usize> {
        self.widths.iter().map(|&w| (w - 1) / 2).collect()
    }

    /// Position of the all-zero offset: `sum(extreme[i] * prod(widths[..i]))`.
    pub fn centre_index(&self) -> usize {
        let mut index = 0;
        let mut place = 1;
        for &w in &self.widths {
            index += (w - 1) / 2 * place;
            place *= w;
        }
        index
    }

    /// Fails unless `other` enumerates the same relative coordinates in the
    /// same order: `RankMismatch` (on sizes) when the windows differ in size,
    /// `NeighbourhoodMismatch` when only the widths differ.
    pub fn ensure_aligned(&self, other: &Neighbourhood) -> Result<()> {
        if self.size != other.size {
            return Err(NdError::RankMismatch {
                expected: self.size,
                actual: other.size,
            });
        }
        if self.widths != other.widths {
            return Err(NdError::NeighbourhoodMismatch {
                left: self.widths.clone(),
                right: other.widths.clone(),
            });
        }
        Ok(())
    }

    /// Linear index of neighbour `k` of the element at `centre` (whose
    /// coordinates are `coords`), or `None` if it falls outside `dims`.
    #[inline]
    pub fn neighbour_index(
        &self,
        k: usize,
        centre: usize,
        coords: &[usize],
        dims: &[usize],
    ) -> Option<usize> {
        for (i, (&c, &d)) in coords.iter().zip(dims).enumerate() {
            let shifted = c as isize + self.locs[[k, i]];
            if shifted < 0 || shifted >= d as isize {
                return None;
            }
        }
        Some((centre as isize + self.offsets[k]) as usize)
    }

    /// Index of the entry whose offset is the negation of entry `k`'s.
    /// Odometer order over symmetric ranges puts it at `size - 1 - k`.
    pub fn mirror_index(&self, k: usize) -> usize {
        self.size - 1 - k
    }
}
