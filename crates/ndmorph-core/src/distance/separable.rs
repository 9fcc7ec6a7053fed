use rayon::prelude::*;
use tracing::{debug, info};

use crate::array::{LineView, NdArray};
use crate::consts::{is_missing, PARALLEL_ELEMENT_THRESHOLD};

use super::line::Envelope;

/// Initial squared distance: zero on foreground (nonzero, not missing),
/// infinite elsewhere.
#[inline]
fn initial_value(v: f64) -> f64 {
    if v != 0.0 && !is_missing(v) {
        0.0
    } else {
        f64::INFINITY
    }
}

/// Squared Euclidean distance from every cell to the nearest foreground cell.
///
/// The source array is not modified. Axes are processed strictly in order,
/// each pass reading the complete output of the previous one. With
/// `honor_spacing` each axis is scaled by its spacing; otherwise unit
/// spacing is used on every axis.
pub fn squared_distance_transform(source: &NdArray, honor_spacing: bool) -> NdArray {
    let mut field = source.map(initial_value);

    for axis in 0..field.rank() {
        let spacing = if honor_spacing {
            field.spacing()[axis]
        } else {
            1.0
        };
        transform_axis(&mut field, axis, spacing);
    }

    field
}

/// Euclidean distance from every cell to the nearest foreground cell.
///
/// Cells with no foreground anywhere in the array come out as `+inf`.
/// The square root is taken once, after every axis pass.
pub fn distance_transform(source: &NdArray, honor_spacing: bool) -> NdArray {
    let mut field = squared_distance_transform(source, honor_spacing);
    for v in field.data_mut() {
        *v = v.sqrt();
    }
    info!(
        dims = ?source.dims(),
        honor_spacing,
        "Distance transform complete"
    );
    field
}

/// Run the line envelope over every line along `axis`.
fn transform_axis(field: &mut NdArray, axis: usize, spacing: f64) {
    let lines = field.line_count(axis);
    let len = field.dims()[axis];
    if lines == 0 || len == 0 {
        return;
    }

    let parallel = field.len() >= PARALLEL_ELEMENT_THRESHOLD && lines > 1;

    if parallel {
        // Lines touch disjoint cells: transform copies on the workers, then
        // write them back before the next axis starts.
        let views: Vec<LineView> = (0..lines).map(|n| field.line_unchecked(axis, n)).collect();
        let data = field.data();
        let results: Vec<Vec<f64>> = views
            .par_iter()
            .map_init(
                || Envelope::with_capacity(len),
                |envelope, view| {
                    let mut buf = view.gather(data);
                    envelope.transform(&mut buf[..], len, spacing);
                    buf
                },
            )
            .collect();

        let data = field.data_mut();
        for (view, values) in views.iter().zip(&results) {
            view.scatter(data, values);
        }
    } else {
        let mut envelope = Envelope::with_capacity(len);
        for n in 0..lines {
            let view = field.line_unchecked(axis, n);
            let mut line = field.line_mut(view);
            envelope.transform(&mut line, len, spacing);
        }
    }

    debug!(axis, lines, spacing, parallel, "Distance pass complete");
}
