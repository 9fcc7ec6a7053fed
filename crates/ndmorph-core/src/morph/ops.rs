use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{is_missing, MISSING};
use crate::error::NdError;

/// How a source value `x` is combined with the kernel weight `w` under it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementOp {
    /// `x + w`.
    Plus,
    /// `x - w`.
    Minus,
    /// `x * w`.
    Multiply,
    /// `x`, where `w` is nonzero.
    #[default]
    Identity,
    /// `1`, where `w` is nonzero.
    One,
    /// `0`, where `w` is nonzero.
    Zero,
    /// `1` if `x == w`, else `0`.
    Equal,
}

impl ElementOp {
    /// Combined value, or `None` when this kernel position contributes nothing.
    #[inline]
    pub fn combine(self, x: f64, w: f64) -> Option<f64> {
        match self {
            ElementOp::Plus => Some(x + w),
            ElementOp::Minus => Some(x - w),
            ElementOp::Multiply => Some(x * w),
            ElementOp::Identity => (w != 0.0).then_some(x),
            ElementOp::One => (w != 0.0).then_some(1.0),
            ElementOp::Zero => (w != 0.0).then_some(0.0),
            ElementOp::Equal => Some(if x == w { 1.0 } else { 0.0 }),
        }
    }
}

impl fmt::Display for ElementOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ElementOp::Plus => "+",
            ElementOp::Minus => "-",
            ElementOp::Multiply => "*",
            ElementOp::Identity => "i",
            ElementOp::One => "1",
            ElementOp::Zero => "0",
            ElementOp::Equal => "==",
        };
        f.write_str(s)
    }
}

impl FromStr for ElementOp {
    type Err = NdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "+" | "plus" => Ok(ElementOp::Plus),
            "-" | "minus" => Ok(ElementOp::Minus),
            "*" | "multiply" => Ok(ElementOp::Multiply),
            "i" | "identity" => Ok(ElementOp::Identity),
            "1" | "one" => Ok(ElementOp::One),
            "0" | "zero" => Ok(ElementOp::Zero),
            "==" | "equal" => Ok(ElementOp::Equal),
            other => Err(NdError::InvalidOperation(format!(
                "unknown element operation '{other}'"
            ))),
        }
    }
}

/// How the combined values of one window are reduced to a single value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeOp {
    Sum,
    Min,
    #[default]
    Max,
    Mean,
    Median,
    /// 1 unless some value is zero.
    All,
    /// 1 if some value is nonzero.
    Any,
}

impl fmt::Display for MergeOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MergeOp::Sum => "sum",
            MergeOp::Min => "min",
            MergeOp::Max => "max",
            MergeOp::Mean => "mean",
            MergeOp::Median => "median",
            MergeOp::All => "all",
            MergeOp::Any => "any",
        };
        f.write_str(s)
    }
}

impl FromStr for MergeOp {
    type Err = NdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sum" => Ok(MergeOp::Sum),
            "min" => Ok(MergeOp::Min),
            "max" => Ok(MergeOp::Max),
            "mean" => Ok(MergeOp::Mean),
            "median" => Ok(MergeOp::Median),
            "all" => Ok(MergeOp::All),
            "any" => Ok(MergeOp::Any),
            other => Err(NdError::InvalidOperation(format!(
                "unknown merge operation '{other}'"
            ))),
        }
    }
}

/// Running reduction for one window.
///
/// Min, Max, All and Any keep a single running value; the other merges
/// collect every value. Missing values are ignored.
#[derive(Clone, Debug)]
pub(crate) struct Accumulator {
    merge: MergeOp,
    running: f64,
    values: Vec<f64>,
    count: usize,
}

impl Accumulator {
    pub(crate) fn new(merge: MergeOp) -> Self {
        let mut acc = Self {
            merge,
            running: 0.0,
            values: Vec::new(),
            count: 0,
        };
        acc.reset();
        acc
    }

    pub(crate) fn reset(&mut self) {
        self.values.clear();
        self.count = 0;
        self.running = match self.merge {
            MergeOp::Min => f64::INFINITY,
            MergeOp::Max => f64::NEG_INFINITY,
            MergeOp::All => 1.0,
            _ => 0.0,
        };
    }

    #[inline]
    pub(crate) fn push(&mut self, value: f64) {
        if is_missing(value) {
            return;
        }
        self.count += 1;
        match self.merge {
            MergeOp::Min => self.running = self.running.min(value),
            MergeOp::Max => self.running = self.running.max(value),
            MergeOp::All => {
                if value == 0.0 {
                    self.running = 0.0;
                }
            }
            MergeOp::Any => {
                if value != 0.0 {
                    self.running = 1.0;
                }
            }
            MergeOp::Sum | MergeOp::Mean | MergeOp::Median => self.values.push(value),
        }
    }

    /// Reduced value. With nothing accumulated, Min, Max, All and Any give
    /// their seed (+inf, -inf, 1, 0) and the other merges give missing.
    pub(crate) fn finish(&mut self) -> f64 {
        match self.merge {
            MergeOp::Min | MergeOp::Max | MergeOp::All | MergeOp::Any => self.running,
            _ if self.count == 0 => MISSING,
            MergeOp::Sum => self.values.iter().sum(),
            MergeOp::Mean => self.values.iter().sum::<f64>() / self.values.len() as f64,
            MergeOp::Median => median(&mut self.values),
        }
    }
}

/// Median by selection; the mean of the two middle values for even counts.
fn median(values: &mut [f64]) -> f64 {
    let n = values.len();
    let mid = n / 2;
    if n % 2 == 1 {
        *values.select_nth_unstable_by(mid, |a, b| a.total_cmp(b)).1
    } else {
        values.select_nth_unstable_by(mid, |a, b| a.total_cmp(b));
        values[..mid].select_nth_unstable_by(mid - 1, |a, b| a.total_cmp(b));
        (values[mid - 1] + values[mid]) / 2.0
    }
}
