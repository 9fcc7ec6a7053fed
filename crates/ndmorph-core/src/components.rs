use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::array::NdArray;
use crate::consts::{is_missing, MISSING, PARALLEL_ELEMENT_THRESHOLD};
use crate::error::{NdError, Result};
use crate::kernel::DiscreteKernel;
use crate::neighbourhood::Neighbourhood;

/// Standard connectivity shapes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Connectivity {
    /// Cells sharing a face (4-connectivity in 2-D, 6 in 3-D).
    #[default]
    Face,
    /// Cells sharing any corner (8-connectivity in 2-D, 26 in 3-D).
    Full,
}

impl Connectivity {
    /// The 3^`rank` kernel for this connectivity.
    pub fn kernel(self, rank: usize) -> DiscreteKernel {
        match self {
            Connectivity::Face => DiscreteKernel::cross(rank),
            Connectivity::Full => DiscreteKernel::full(rank, 3),
        }
    }
}

/// Result of connected-component labelling.
#[derive(Clone, Debug, PartialEq)]
pub struct ComponentLabels {
    dims: Vec<usize>,
    labels: Vec<Option<u32>>,
    count: usize,
}

impl ComponentLabels {
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// One entry per cell; `None` for background.
    pub fn labels(&self) -> &[Option<u32>] {
        &self.labels
    }

    /// Number of components.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Cell count of each component; entry `i` is label `i + 1`.
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.count];
        for label in self.labels.iter().flatten() {
            sizes[*label as usize - 1] += 1;
        }
        sizes
    }

    /// Labels as an array; background cells are missing.
    pub fn to_array(&self) -> Result<NdArray> {
        let data = self
            .labels
            .iter()
            .map(|l| l.map_or(MISSING, |v| v as f64))
            .collect();
        NdArray::new(self.dims.clone(), data)
    }
}

#[inline]
fn is_foreground(v: f64) -> bool {
    v != 0.0 && !is_missing(v)
}

/// Find with path halving.
fn find(parent: &mut [usize], mut x: usize) -> usize {
    while parent[x] != x {
        parent[x] = parent[parent[x]];
        x = parent[x];
    }
    x
}

fn union(parent: &mut [usize], a: usize, b: usize) {
    let ra = find(parent, a);
    let rb = find(parent, b);
    if ra != rb {
        // The smaller index stays root, so roots are each component's first cell.
        let (small, big) = if ra < rb { (ra, rb) } else { (rb, ra) };
        parent[big] = small;
    }
}

/// Neighbours of `n` connected to it through the second half of the window.
fn forward_links(
    source: &NdArray,
    kernel: &DiscreteKernel,
    window: &Neighbourhood,
    n: usize,
    coords: &mut [usize],
) -> Vec<usize> {
    let data = source.data();
    let weights = kernel.values().data();
    source.expand_index_into(n, coords);
    ((window.centre_index() + 1)..window.size())
        .filter(|&k| weights[k] != 0.0 && !is_missing(weights[k]))
        .filter_map(|k| window.neighbour_index(k, n, coords, source.dims()))
        .filter(|&j| is_foreground(data[j]))
        .collect()
}

/// Label connected foreground regions (nonzero, non-missing cells).
///
/// Two foreground cells are connected when one lies at a nonzero kernel
/// position relative to the other. The kernel must be symmetric, so only the
/// half of the window after the centre is scanned. Labels start at 1 and are
/// assigned in order of each component's lowest linear index.
pub fn label_components(source: &NdArray, kernel: &DiscreteKernel) -> Result<ComponentLabels> {
    if kernel.rank() != source.rank() {
        return Err(NdError::RankMismatch {
            expected: source.rank(),
            actual: kernel.rank(),
        });
    }
    if !kernel.is_symmetric() {
        return Err(NdError::InvalidKernel(
            "connectivity kernel must be symmetric".into(),
        ));
    }

    let window = source.neighbourhood(kernel.values().dims())?;
    window.ensure_aligned(&kernel.neighbourhood())?;

    let n = source.len();
    let data = source.data();
    let rank = source.rank();
    let parallel = n >= PARALLEL_ELEMENT_THRESHOLD;

    let links: Vec<(usize, Vec<usize>)> = if parallel {
        (0..n)
            .into_par_iter()
            .filter(|&i| is_foreground(data[i]))
            .map_init(
                || vec![0; rank],
                |coords, i| (i, forward_links(source, kernel, &window, i, coords)),
            )
            .collect()
    } else {
        let mut coords = vec![0; rank];
        (0..n)
            .filter(|&i| is_foreground(data[i]))
            .map(|i| (i, forward_links(source, kernel, &window, i, &mut coords)))
            .collect()
    };

    let mut parent: Vec<usize> = (0..n).collect();
    for (i, neighbours) in &links {
        for &j in neighbours {
            union(&mut parent, *i, j);
        }
    }

    let mut root_labels: Vec<Option<u32>> = vec![None; n];
    let mut labels: Vec<Option<u32>> = vec![None; n];
    let mut count = 0usize;
    for i in 0..n {
        if !is_foreground(data[i]) {
            continue;
        }
        let root = find(&mut parent, i);
        let label = *root_labels[root].get_or_insert_with(|| {
            count += 1;
            count as u32
        });
        labels[i] = Some(label);
    }

    info!(components = count, parallel, "Component labelling complete");

    Ok(ComponentLabels {
        dims: source.dims().to_vec(),
        labels,
        count,
    })
}
