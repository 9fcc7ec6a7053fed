mod common;

use common::binary_array;
use ndmorph_core::kernel::DiscreteKernel;
use ndmorph_core::morph::{
    closing, dilate, erode, mean_filter, median_filter, morph, opening, ElementOp, MergeOp,
    MorphConfig, Morpher, Restrictions,
};
use ndmorph_core::{NdArray, NdError};

fn line(values: &[f64]) -> NdArray {
    NdArray::from_vec(values.to_vec())
}

fn kernel_1d(values: &[f64]) -> DiscreteKernel {
    DiscreteKernel::new(line(values)).unwrap()
}

// ---------------------------------------------------------------------------
// Basic operations
// ---------------------------------------------------------------------------

#[test]
fn test_dilate_1d() {
    let source = line(&[0.0, 0.0, 1.0, 0.0, 0.0]);
    let result = dilate(&source, &DiscreteKernel::full(1, 3)).unwrap();
    assert_eq!(result.data(), &[0.0, 1.0, 1.0, 1.0, 0.0]);
}

#[test]
fn test_erode_1d_clips_window_at_border() {
    let source = line(&[1.0, 1.0, 1.0, 1.0, 0.0]);
    let result = erode(&source, &DiscreteKernel::full(1, 3)).unwrap();
    assert_eq!(result.data(), &[1.0, 1.0, 1.0, 0.0, 0.0]);
}

#[test]
fn test_erode_2d_with_cross() {
    let block: Vec<&[usize]> = vec![
        &[1, 1], &[2, 1], &[3, 1], &[1, 2], &[2, 2], &[3, 2], &[1, 3], &[2, 3], &[3, 3],
    ];
    let source = binary_array(&[5, 5], &block);
    let result = erode(&source, &DiscreteKernel::cross(2)).unwrap();
    assert_eq!(result.data().iter().sum::<f64>(), 1.0);
    assert_eq!(result.at(&[2, 2]).unwrap(), 1.0);
}

#[test]
fn test_opening_removes_isolated_cell() {
    let source = binary_array(&[5, 5], &[&[2, 2]]);
    let result = opening(&source, &DiscreteKernel::full(2, 3)).unwrap();
    assert!(result.data().iter().all(|&v| v == 0.0));
}

#[test]
fn test_closing_fills_hole() {
    let mut source = NdArray::filled(vec![5, 5], 1.0);
    *source.at_mut(&[2, 2]).unwrap() = 0.0;
    let result = closing(&source, &DiscreteKernel::full(2, 3)).unwrap();
    assert!(result.data().iter().all(|&v| v == 1.0));
}

#[test]
fn test_result_keeps_shape_and_spacing() {
    let source = NdArray::filled(vec![4, 3], 1.0)
        .with_spacing(vec![0.5, 2.0])
        .unwrap();
    let result = dilate(&source, &DiscreteKernel::cross(2)).unwrap();
    assert_eq!(result.dims(), source.dims());
    assert_eq!(result.spacing(), source.spacing());
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

#[test]
fn test_median_filter() {
    let source = line(&[1.0, 100.0, 2.0, 3.0, 4.0]);
    let result = median_filter(&source, 3).unwrap();
    assert_eq!(result.data(), &[50.5, 2.0, 3.0, 3.0, 3.5]);
}

#[test]
fn test_mean_filter() {
    let source = line(&[3.0, 6.0, 9.0]);
    let result = mean_filter(&source, 3).unwrap();
    assert_eq!(result.data(), &[4.5, 6.0, 7.5]);
}

// ---------------------------------------------------------------------------
// Element and merge operations
// ---------------------------------------------------------------------------

#[test]
fn test_sum_renormalises_at_border() {
    let source = line(&[1.0, 1.0, 1.0, 1.0]);
    let kernel = DiscreteKernel::full(1, 3);

    let config = MorphConfig::new(ElementOp::Identity, MergeOp::Sum);
    let result = morph(&source, &kernel, &config).unwrap();
    assert_eq!(result.data(), &[3.0, 3.0, 3.0, 3.0]);

    let config = MorphConfig {
        renormalise: false,
        ..config
    };
    let result = morph(&source, &kernel, &config).unwrap();
    assert_eq!(result.data(), &[2.0, 3.0, 3.0, 2.0]);
}

#[test]
fn test_weighted_sum() {
    let source = line(&[1.0, 1.0, 1.0]);
    let config = MorphConfig {
        renormalise: false,
        ..MorphConfig::new(ElementOp::Multiply, MergeOp::Sum)
    };
    let result = morph(&source, &kernel_1d(&[1.0, 2.0, 1.0]), &config).unwrap();
    assert_eq!(result.data(), &[3.0, 4.0, 3.0]);
}

#[test]
fn test_equal_all_matches_pattern() {
    let source = line(&[1.0, 0.0, 1.0]);
    let config = MorphConfig::new(ElementOp::Equal, MergeOp::All);
    let result = morph(&source, &kernel_1d(&[1.0, 0.0, 1.0]), &config).unwrap();
    assert_eq!(result.data(), &[0.0, 1.0, 0.0]);
}

#[test]
fn test_any_and_one() {
    let source = line(&[0.0, 0.0, 5.0, 0.0]);
    let kernel = DiscreteKernel::full(1, 3);
    let any = morph(&source, &kernel, &MorphConfig::new(ElementOp::Identity, MergeOp::Any)).unwrap();
    assert_eq!(any.data(), &[0.0, 1.0, 1.0, 1.0]);
    let count = MorphConfig {
        renormalise: false,
        ..MorphConfig::new(ElementOp::One, MergeOp::Sum)
    };
    let ones = morph(&source, &kernel, &count).unwrap();
    assert_eq!(ones.data(), &[2.0, 3.0, 3.0, 2.0]);
}

#[test]
fn test_zero_weights_are_skipped_by_identity() {
    let source = line(&[9.0, 1.0, 9.0]);
    let result = morph(
        &source,
        &kernel_1d(&[0.0, 1.0, 0.0]),
        &MorphConfig::new(ElementOp::Identity, MergeOp::Max),
    )
    .unwrap();
    assert_eq!(result.data(), &[9.0, 1.0, 9.0]);
}

// ---------------------------------------------------------------------------
// Missing values
// ---------------------------------------------------------------------------

#[test]
fn test_missing_values_are_ignored() {
    let source = line(&[f64::NAN, 1.0, 2.0]);
    let result = dilate(&source, &DiscreteKernel::full(1, 3)).unwrap();
    assert_eq!(result.data(), &[1.0, 2.0, 2.0]);
}

#[test]
fn test_empty_window_gives_merge_seed() {
    let source = line(&[f64::NAN, f64::NAN, f64::NAN]);
    let kernel = DiscreteKernel::full(1, 3);

    let eroded = erode(&source, &kernel).unwrap();
    assert_eq!(eroded.data(), &[f64::INFINITY; 3]);

    let dilated = dilate(&source, &kernel).unwrap();
    assert_eq!(dilated.data(), &[f64::NEG_INFINITY; 3]);

    let all = morph(&source, &kernel, &MorphConfig::new(ElementOp::Identity, MergeOp::All)).unwrap();
    assert_eq!(all.data(), &[1.0; 3]);

    let any = morph(&source, &kernel, &MorphConfig::new(ElementOp::Identity, MergeOp::Any)).unwrap();
    assert_eq!(any.data(), &[0.0; 3]);
}

#[test]
fn test_empty_window_is_missing_for_collecting_merges() {
    let source = line(&[f64::NAN]);
    let kernel = DiscreteKernel::full(1, 3);
    for merge in [MergeOp::Sum, MergeOp::Mean, MergeOp::Median] {
        let result = morph(&source, &kernel, &MorphConfig::new(ElementOp::Identity, merge)).unwrap();
        assert!(result[0].is_nan(), "{merge}");
    }
}

#[test]
fn test_missing_kernel_weights_are_skipped() {
    let source = line(&[5.0, 1.0, 7.0]);
    let result = dilate(&source, &kernel_1d(&[f64::NAN, 1.0, 1.0])).unwrap();
    assert_eq!(result.data(), &[5.0, 7.0, 7.0]);
}

// ---------------------------------------------------------------------------
// Restrictions
// ---------------------------------------------------------------------------

#[test]
fn test_value_restriction_passes_others_through() {
    let source = line(&[0.0, 5.0, 0.0, 0.0]);
    let config = MorphConfig {
        restrictions: Restrictions {
            include_values: vec![0.0],
            ..Restrictions::default()
        },
        ..MorphConfig::new(ElementOp::Identity, MergeOp::Max)
    };
    let result = morph(&source, &DiscreteKernel::full(1, 3), &config).unwrap();
    assert_eq!(result.data(), &[5.0, 5.0, 5.0, 0.0]);
}

#[test]
fn test_exclude_values() {
    let source = line(&[0.0, 5.0, 0.0]);
    let config = MorphConfig {
        restrictions: Restrictions {
            exclude_values: vec![0.0],
            ..Restrictions::default()
        },
        ..MorphConfig::new(ElementOp::Identity, MergeOp::Min)
    };
    let result = morph(&source, &DiscreteKernel::full(1, 3), &config).unwrap();
    assert_eq!(result.data(), &[0.0, 0.0, 0.0]);
}

#[test]
fn test_neighbour_restriction_keeps_isolated_cells() {
    let source = line(&[0.0, 1.0, 0.0, 1.0, 1.0, 1.0]);
    let config = MorphConfig {
        restrictions: Restrictions {
            exclude_neighbours: vec![0],
            ..Restrictions::default()
        },
        ..MorphConfig::new(ElementOp::Identity, MergeOp::Min)
    };
    let result = morph(&source, &DiscreteKernel::full(1, 3), &config).unwrap();
    assert_eq!(result.data(), &[0.0, 1.0, 0.0, 0.0, 1.0, 1.0]);
}

// ---------------------------------------------------------------------------
// Validation and scale
// ---------------------------------------------------------------------------

#[test]
fn test_rank_mismatch() {
    let source = line(&[1.0, 2.0]);
    let config = MorphConfig::default();
    let err = Morpher::new(&source, &DiscreteKernel::cross(2), &config)
        .err()
        .unwrap();
    assert!(matches!(
        err,
        NdError::RankMismatch {
            expected: 1,
            actual: 2
        }
    ));
}

#[test]
fn test_kernel_larger_than_array() {
    let source = line(&[1.0, 4.0]);
    let result = dilate(&source, &DiscreteKernel::full(1, 7)).unwrap();
    assert_eq!(result.data(), &[4.0, 4.0]);
}

#[test]
fn test_large_array_dilation() {
    let source = binary_array(&[300, 300], &[&[100, 200]]);
    let result = dilate(&source, &DiscreteKernel::full(2, 3)).unwrap();
    assert_eq!(result.data().iter().sum::<f64>(), 9.0);
    assert_eq!(result.at(&[101, 201]).unwrap(), 1.0);
    assert_eq!(result.at(&[102, 200]).unwrap(), 0.0);
}
