use serde::{Deserialize, Serialize};

use super::ops::{ElementOp, MergeOp};

/// Conditions an element must meet to be processed; others pass through
/// unchanged.
///
/// Value lists compare the element's own value. Neighbour lists compare the
/// number of foreground cells among its immediate neighbours (the 3^rank
/// window, centre excluded). An include list takes precedence over the
/// matching exclude list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Restrictions {
    #[serde(default)]
    pub include_values: Vec<f64>,
    #[serde(default)]
    pub exclude_values: Vec<f64>,
    #[serde(default)]
    pub include_neighbours: Vec<usize>,
    #[serde(default)]
    pub exclude_neighbours: Vec<usize>,
}

impl Restrictions {
    pub fn is_empty(&self) -> bool {
        self.include_values.is_empty()
            && self.exclude_values.is_empty()
            && !self.uses_neighbours()
    }

    pub fn uses_neighbours(&self) -> bool {
        !self.include_neighbours.is_empty() || !self.exclude_neighbours.is_empty()
    }

    pub(crate) fn value_allowed(&self, value: f64) -> bool {
        if !self.include_values.is_empty() {
            self.include_values.contains(&value)
        } else {
            !self.exclude_values.contains(&value)
        }
    }

    pub(crate) fn neighbours_allowed(&self, count: usize) -> bool {
        if !self.include_neighbours.is_empty() {
            self.include_neighbours.contains(&count)
        } else {
            !self.exclude_neighbours.contains(&count)
        }
    }
}

/// Parameters for a morphological sliding-window operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MorphConfig {
    #[serde(default)]
    pub element_op: ElementOp,
    #[serde(default)]
    pub merge_op: MergeOp,
    #[serde(default)]
    pub restrictions: Restrictions,
    /// For `sum` merges, rescale windows clipped at the array border by the
    /// fraction of kernel weight actually visited.
    #[serde(default = "default_renormalise")]
    pub renormalise: bool,
}

fn default_renormalise() -> bool {
    true
}

impl Default for MorphConfig {
    fn default() -> Self {
        Self {
            element_op: ElementOp::default(),
            merge_op: MergeOp::default(),
            restrictions: Restrictions::default(),
            renormalise: true,
        }
    }
}

impl MorphConfig {
    pub fn new(element_op: ElementOp, merge_op: MergeOp) -> Self {
        Self {
            element_op,
            merge_op,
            ..Self::default()
        }
    }
}
