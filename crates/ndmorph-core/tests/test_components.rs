mod common;

use common::binary_array;
use ndmorph_core::components::{label_components, Connectivity};
use ndmorph_core::kernel::DiscreteKernel;
use ndmorph_core::{NdArray, NdError};

fn face(rank: usize) -> DiscreteKernel {
    Connectivity::Face.kernel(rank)
}

// ---------------------------------------------------------------------------
// Labelling
// ---------------------------------------------------------------------------

#[test]
fn test_labels_follow_first_index() {
    let source = NdArray::from_vec(vec![0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 1.0, 1.0]);
    let labels = label_components(&source, &face(1)).unwrap();
    assert_eq!(labels.count(), 3);
    assert_eq!(
        labels.labels(),
        &[None, Some(1), Some(1), None, Some(2), None, Some(3), Some(3)]
    );
    assert_eq!(labels.sizes(), vec![2, 1, 2]);
}

#[test]
fn test_diagonal_depends_on_connectivity() {
    let source = binary_array(&[4, 4], &[&[0, 0], &[1, 1], &[3, 3]]);
    let face_labels = label_components(&source, &face(2)).unwrap();
    assert_eq!(face_labels.count(), 3);

    let full_labels = label_components(&source, &Connectivity::Full.kernel(2)).unwrap();
    assert_eq!(full_labels.count(), 2);
    assert_eq!(full_labels.sizes(), vec![2, 1]);
}

#[test]
fn test_ring_is_one_component() {
    let mut source = NdArray::filled(vec![5, 5], 1.0);
    for x in 1..4 {
        for y in 1..4 {
            *source.at_mut(&[x, y]).unwrap() = 0.0;
        }
    }
    let labels = label_components(&source, &face(2)).unwrap();
    assert_eq!(labels.count(), 1);
    assert_eq!(labels.sizes(), vec![16]);
}

#[test]
fn test_u_shape_merges_late() {
    // Two arms that only join on the last row.
    let source = binary_array(
        &[3, 3],
        &[&[0, 0], &[2, 0], &[0, 1], &[2, 1], &[0, 2], &[1, 2], &[2, 2]],
    );
    let labels = label_components(&source, &face(2)).unwrap();
    assert_eq!(labels.count(), 1);
    assert!(labels.labels().iter().flatten().all(|&l| l == 1));
}

#[test]
fn test_missing_and_zero_are_background() {
    let source = NdArray::from_vec(vec![1.0, f64::NAN, 1.0, 0.0, 2.0]);
    let labels = label_components(&source, &Connectivity::Full.kernel(1)).unwrap();
    assert_eq!(labels.count(), 3);
    assert_eq!(labels.labels()[1], None);
}

#[test]
fn test_to_array_marks_background_missing() {
    let source = NdArray::from_vec(vec![1.0, 0.0, 1.0]);
    let array = label_components(&source, &face(1)).unwrap().to_array().unwrap();
    assert_eq!(array[0], 1.0);
    assert!(array[1].is_nan());
    assert_eq!(array[2], 2.0);
}

#[test]
fn test_custom_kernel_skips_cells() {
    // Connect cells two apart but not adjacent ones.
    let kernel = DiscreteKernel::new(NdArray::from_vec(vec![1.0, 0.0, 1.0, 0.0, 1.0])).unwrap();
    let source = NdArray::from_vec(vec![1.0, 1.0, 1.0, 0.0, 0.0]);
    let labels = label_components(&source, &kernel).unwrap();
    assert_eq!(labels.count(), 2);
    assert_eq!(labels.labels()[..3], [Some(1), Some(2), Some(1)]);
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn test_asymmetric_kernel_rejected() {
    let kernel = DiscreteKernel::new(NdArray::from_vec(vec![1.0, 1.0, 0.0])).unwrap();
    let source = NdArray::from_vec(vec![1.0, 1.0]);
    assert!(matches!(
        label_components(&source, &kernel),
        Err(NdError::InvalidKernel(_))
    ));
}

#[test]
fn test_rank_mismatch() {
    let source = NdArray::from_vec(vec![1.0, 1.0]);
    assert!(matches!(
        label_components(&source, &face(2)),
        Err(NdError::RankMismatch { .. })
    ));
}

#[test]
fn test_connectivity_kernels() {
    assert_eq!(Connectivity::Face.kernel(2).sum(), 5.0);
    assert_eq!(Connectivity::Full.kernel(2).sum(), 9.0);
    assert_eq!(Connectivity::Full.kernel(3).sum(), 27.0);
    assert_eq!(Connectivity::default(), Connectivity::Face);
}

// ---------------------------------------------------------------------------
// Scale
// ---------------------------------------------------------------------------

#[test]
fn test_large_array_stripes() {
    let mut source = NdArray::filled(vec![300, 300], 0.0);
    for y in (0..300).step_by(2) {
        for x in 0..300 {
            *source.at_mut(&[x, y]).unwrap() = 1.0;
        }
    }
    let labels = label_components(&source, &face(2)).unwrap();
    assert_eq!(labels.count(), 150);
    assert!(labels.sizes().iter().all(|&s| s == 300));
}
