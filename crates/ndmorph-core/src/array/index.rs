//! Mixed-radix index arithmetic shared by arrays and neighbourhoods.
//!
//! Axis 0 varies fastest: `linear = c[0] + d[0] * (c[1] + d[1] * (c[2] + ...))`.

/// Strides for `dims`: `strides[0] = 1`, `strides[i + 1] = strides[i] * dims[i]`.
/// The result has `dims.len() + 1` entries; the last one is the element count.
pub fn compute_strides(dims: &[usize]) -> Vec<usize> {
    let mut strides = Vec::with_capacity(dims.len() + 1);
    strides.push(1);
    for (i, &d) in dims.iter().enumerate() {
        strides.push(strides[i] * d);
    }
    strides
}

/// Generic flattening driven by strides. Valid for every rank.
#[inline]
pub fn flatten_strided(coords: &[usize], strides: &[usize]) -> usize {
    coords.iter().zip(strides).map(|(&c, &s)| c * s).sum()
}

/// Flatten with hand-unrolled arithmetic for ranks 1 to 4, falling back to
/// [`flatten_strided`] otherwise. Both paths give identical results.
#[inline]
pub fn flatten(coords: &[usize], dims: &[usize], strides: &[usize]) -> usize {
    debug_assert_eq!(coords.len(), dims.len());
    match *coords {
        [c0] => c0,
        [c0, c1] => c0 + dims[0] * c1,
        [c0, c1, c2] => c0 + dims[0] * (c1 + dims[1] * c2),
        [c0, c1, c2, c3] => c0 + dims[0] * (c1 + dims[1] * (c2 + dims[2] * c3)),
        _ => flatten_strided(coords, strides),
    }
}

/// Decode `linear` into `out`, one coordinate per axis.
#[inline]
pub fn expand_into(linear: usize, dims: &[usize], strides: &[usize], out: &mut [usize]) {
    debug_assert_eq!(out.len(), dims.len());
    for (i, c) in out.iter_mut().enumerate() {
        *c = (linear / strides[i]) % dims[i];
    }
}

/// Start offset of line `n` along `axis`. Lines are numbered by the
/// remaining axes in the same fastest-first order.
#[inline]
pub fn line_offset(axis: usize, n: usize, strides: &[usize]) -> usize {
    let inner = strides[axis];
    (n % inner) + (n / inner) * strides[axis + 1]
}
