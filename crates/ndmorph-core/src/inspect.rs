use crate::consts::is_missing;

/// Outcome of [`is_binary`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BinaryCheck {
    /// All nonzero values are equal.
    pub binary: bool,
    /// The common nonzero value, when binary and at least one exists.
    pub value: Option<f64>,
}

/// Check whether `data` holds at most one distinct nonzero value.
///
/// Missing values count as nonzero and never equal anything, so any missing
/// cell makes the data non-binary.
pub fn is_binary(data: &[f64]) -> BinaryCheck {
    let mut value: Option<f64> = None;
    for &v in data {
        if v == 0.0 {
            continue;
        }
        match value {
            None if !is_missing(v) => value = Some(v),
            Some(seen) if seen == v => {}
            _ => {
                return BinaryCheck {
                    binary: false,
                    value: None,
                }
            }
        }
    }
    BinaryCheck {
        binary: true,
        value,
    }
}

/// True when `data[i] == data[n - 1 - i]` for every non-missing `data[i]`.
///
/// For an array with odd extents this is point symmetry about the centre.
pub fn is_symmetric(data: &[f64]) -> bool {
    let n = data.len();
    (0..n / 2).all(|i| is_missing(data[i]) || data[i] == data[n - 1 - i])
}
