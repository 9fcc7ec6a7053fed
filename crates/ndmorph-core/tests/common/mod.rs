#![allow(dead_code)]

use ndmorph_core::NdArray;

/// Array of zeros with a one at each of `foreground` (given as coordinates).
pub fn binary_array(dims: &[usize], foreground: &[&[usize]]) -> NdArray {
    let mut array = NdArray::filled(dims.to_vec(), 0.0);
    for coords in foreground {
        *array.at_mut(coords).unwrap() = 1.0;
    }
    array
}

/// Deterministic pseudo-random binary array (roughly `density` foreground).
pub fn scattered_array(dims: &[usize], density: f64, seed: u64) -> NdArray {
    let mut state = seed;
    let mut array = NdArray::filled(dims.to_vec(), 0.0);
    for v in array.data_mut() {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let u = (state >> 11) as f64 / (1u64 << 53) as f64;
        if u < density {
            *v = 1.0;
        }
    }
    array
}

/// Exhaustive nearest-foreground Euclidean distance, for checking fast paths.
pub fn brute_force_distance(array: &NdArray, spacing: &[f64]) -> Vec<f64> {
    let foreground: Vec<Vec<usize>> = (0..array.len())
        .filter(|&n| array[n] != 0.0 && !array[n].is_nan())
        .map(|n| array.expand_index(n))
        .collect();

    (0..array.len())
        .map(|n| {
            let here = array.expand_index(n);
            foreground
                .iter()
                .map(|f| {
                    here.iter()
                        .zip(f)
                        .zip(spacing)
                        .map(|((&a, &b), &s)| {
                            let d = (a as f64 - b as f64) * s;
                            d * d
                        })
                        .sum::<f64>()
                })
                .fold(f64::INFINITY, f64::min)
                .sqrt()
        })
        .collect()
}

pub fn assert_all_close(actual: &[f64], expected: &[f64], tol: f64) {
    assert_eq!(actual.len(), expected.len(), "length mismatch");
    for (i, (&a, &e)) in actual.iter().zip(expected).enumerate() {
        if e.is_infinite() {
            assert_eq!(a, e, "index {i}");
        } else {
            assert!((a - e).abs() <= tol, "index {i}: got {a}, expected {e}");
        }
    }
}
