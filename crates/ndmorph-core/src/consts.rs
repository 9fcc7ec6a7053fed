/// Sentinel used for missing values. Missing cells are skipped by reducers
/// and never compared numerically.
pub const MISSING: f64 = f64::NAN;

/// Minimum element count to distribute lines of an axis pass across Rayon workers.
pub const PARALLEL_ELEMENT_THRESHOLD: usize = 65_536;

/// Minimum number of scattered sample points to evaluate them in parallel.
pub const PARALLEL_POINT_THRESHOLD: usize = 1_024;

/// Kernel values within this distance of their interpolating ideal (1 at the
/// origin, 0 at other integers) do not trigger presharpening.
pub const PRESHARPEN_TOLERANCE: f64 = 1e-6;

/// Width of the immediate neighbourhood used for neighbour-count restrictions.
pub const IMMEDIATE_NEIGHBOURHOOD_WIDTH: usize = 3;

/// Number of lobes of the Lanczos kernel.
pub const LANCZOS_LOBES: f64 = 3.0;

/// Default Mitchell-Netravali parameters (B = C = 1/3).
pub const DEFAULT_MITCHELL_B: f64 = 1.0 / 3.0;
pub const DEFAULT_MITCHELL_C: f64 = 1.0 / 3.0;

/// Returns true for the missing sentinel.
#[inline]
pub fn is_missing(value: f64) -> bool {
    value.is_nan()
}
