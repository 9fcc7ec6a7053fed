use ndarray::{array, Array2};

use ndmorph_core::array::index::{compute_strides, flatten, flatten_strided};
use ndmorph_core::array::LineView;
use ndmorph_core::{NdArray, NdError};

fn counting(dims: &[usize]) -> NdArray {
    let len = dims.iter().product::<usize>();
    NdArray::new(dims.to_vec(), (0..len).map(|v| v as f64).collect()).unwrap()
}

// ---------------------------------------------------------------------------
// Construction and strides
// ---------------------------------------------------------------------------

#[test]
fn test_strides_have_trailing_total() {
    assert_eq!(compute_strides(&[3, 4, 5]), vec![1, 3, 12, 60]);
    assert_eq!(compute_strides(&[]), vec![1]);
}

#[test]
fn test_new_rejects_wrong_length() {
    let err = NdArray::new(vec![2, 3], vec![0.0; 5]).unwrap_err();
    assert!(matches!(
        err,
        NdError::ShapeMismatch {
            expected: 6,
            actual: 5
        }
    ));
}

#[test]
fn test_default_spacing_is_unit() {
    let a = NdArray::filled(vec![2, 2, 2], 0.0);
    assert_eq!(a.spacing(), &[1.0, 1.0, 1.0]);
}

#[test]
fn test_set_spacing_validates() {
    let mut a = NdArray::filled(vec![2, 2], 0.0);
    assert!(matches!(
        a.set_spacing(vec![1.0]),
        Err(NdError::RankMismatch { .. })
    ));
    assert!(matches!(
        a.set_spacing(vec![1.0, 0.0]),
        Err(NdError::InvalidSpacing(_))
    ));
    a.set_spacing(vec![0.5, 2.0]).unwrap();
    assert_eq!(a.spacing(), &[0.5, 2.0]);
}

// ---------------------------------------------------------------------------
// Index conversion
// ---------------------------------------------------------------------------

#[test]
fn test_axis_zero_varies_fastest() {
    let a = counting(&[3, 4]);
    assert_eq!(a.flatten_index(&[1, 0]), 1);
    assert_eq!(a.flatten_index(&[0, 1]), 3);
    assert_eq!(a[&[2, 3][..]], 11.0);
}

#[test]
fn test_flatten_expand_roundtrip_all_ranks() {
    for dims in [
        vec![7],
        vec![3, 4],
        vec![3, 4, 5],
        vec![2, 3, 2, 4],
        vec![2, 3, 2, 2, 3],
    ] {
        let a = counting(&dims);
        for n in 0..a.len() {
            let coords = a.expand_index(n);
            assert!(coords.iter().zip(&dims).all(|(&c, &d)| c < d));
            assert_eq!(a.flatten_index(&coords), n);
            assert_eq!(
                flatten(&coords, a.dims(), a.strides()),
                flatten_strided(&coords, a.strides())
            );
        }
    }
}

#[test]
fn test_checked_access_errors() {
    let a = counting(&[3, 4]);
    assert!(matches!(
        a.at(&[3, 0]),
        Err(NdError::IndexOutOfRange {
            index: 3,
            bound: 3,
            axis: Some(0)
        })
    ));
    assert!(matches!(
        a.flatten_index_checked(&[0, 4]),
        Err(NdError::IndexOutOfRange {
            index: 4,
            bound: 4,
            axis: Some(1)
        })
    ));
    assert!(matches!(a.at(&[1]), Err(NdError::RankMismatch { .. })));
    assert!(matches!(
        a.get(12),
        Err(NdError::IndexOutOfRange {
            index: 12,
            bound: 12,
            axis: None
        })
    ));
    assert!(matches!(
        a.expand_index_checked(12),
        Err(NdError::IndexOutOfRange { index: 12, .. })
    ));
    assert_eq!(a.at(&[1, 2]).unwrap(), 7.0);
}

// ---------------------------------------------------------------------------
// Lines
// ---------------------------------------------------------------------------

#[test]
fn test_count_lines() {
    let a = counting(&[3, 4]);
    assert_eq!(a.count_lines(0).unwrap(), 4);
    assert_eq!(a.count_lines(1).unwrap(), 3);

    let empty = NdArray::filled(vec![3, 0], 0.0);
    assert_eq!(empty.count_lines(0).unwrap(), 0);
    assert_eq!(empty.count_lines(1).unwrap(), 0);
}

#[test]
fn test_count_lines_rejects_axis_past_rank() {
    let a = counting(&[3, 4]);
    assert!(matches!(
        a.count_lines(2),
        Err(NdError::IndexOutOfRange {
            index: 2,
            bound: 2,
            axis: None
        })
    ));
}

#[test]
fn test_begin_and_end_line() {
    let a = counting(&[3, 4]);
    assert_eq!(a.begin_line(0, 1).unwrap(), LineView::new(3, 1, 3));
    assert_eq!(a.begin_line(1, 2).unwrap(), LineView::new(2, 3, 4));
    assert_eq!(a.end_line(1, 2).unwrap(), 14);

    let values: Vec<f64> = a.line(a.begin_line(1, 2).unwrap()).iter().collect();
    assert_eq!(values, vec![2.0, 5.0, 8.0, 11.0]);
}

#[test]
fn test_begin_line_errors() {
    let a = counting(&[3, 4]);
    assert!(matches!(
        a.begin_line(0, 4),
        Err(NdError::IndexOutOfRange {
            index: 4,
            bound: 4,
            axis: None
        })
    ));
    assert!(matches!(
        a.begin_line(2, 0),
        Err(NdError::IndexOutOfRange {
            index: 2,
            bound: 2,
            ..
        })
    ));
}

#[test]
fn test_lines_cover_every_cell_once() {
    let a = counting(&[2, 3, 4]);
    for axis in 0..3 {
        let mut seen = vec![0usize; a.len()];
        for view in a.lines(axis).unwrap() {
            assert_eq!(view.len, a.dims()[axis]);
            for idx in view.indices() {
                seen[idx] += 1;
            }
        }
        assert!(seen.iter().all(|&c| c == 1), "axis {axis}");
    }
}

#[test]
fn test_line_through() {
    let a = counting(&[3, 4]);
    let view = a.line_through(&[1, 2], 0).unwrap();
    assert_eq!(view, LineView::new(7, 1, 2));
    let view = a.line_through(&[1, 2], 1).unwrap();
    assert_eq!(a.line(view).iter().collect::<Vec<_>>(), vec![7.0, 10.0]);
}

#[test]
fn test_line_mut_writes_through() {
    let mut a = counting(&[3, 4]);
    let view = a.begin_line(1, 0).unwrap();
    let mut line = a.line_mut(view);
    line[3] = -1.0;
    assert_eq!(a.at(&[0, 3]).unwrap(), -1.0);
}

#[test]
fn test_update_lines_reverses_along_axis() {
    let mut a = counting(&[2, 3]);
    a.update_lines(1, |line| line.reverse()).unwrap();
    assert_eq!(a.data(), &[4.0, 5.0, 2.0, 3.0, 0.0, 1.0]);
}

#[test]
fn test_update_lines_parallel_matches_sequential() {
    let mut big = counting(&[300, 300]);
    big.update_lines(0, |line| line.iter_mut().for_each(|v| *v *= 2.0))
        .unwrap();
    assert_eq!(big.at(&[299, 299]).unwrap(), 2.0 * 89_999.0);
    assert_eq!(big.at(&[1, 0]).unwrap(), 2.0);
}

// ---------------------------------------------------------------------------
// ndarray interop
// ---------------------------------------------------------------------------

#[test]
fn test_from_ndarray_preserves_logical_indexing() {
    let source: Array2<f64> = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
    let a = NdArray::from_ndarray(&source.clone().into_dyn());
    assert_eq!(a.dims(), &[2, 3]);
    assert_eq!(a.at(&[1, 0]).unwrap(), 4.0);
    assert_eq!(a.at(&[0, 2]).unwrap(), 3.0);

    let back = a.to_ndarray().unwrap();
    assert_eq!(back, source.into_dyn());
}

#[test]
fn test_map_and_count_missing() {
    let a = NdArray::from_vec(vec![1.0, f64::NAN, 3.0]);
    assert_eq!(a.count_missing(), 1);
    let doubled = a.map(|v| v * 2.0);
    assert_eq!(doubled[0], 2.0);
    assert!(doubled[1].is_nan());
    assert_eq!(doubled[2], 6.0);
}
