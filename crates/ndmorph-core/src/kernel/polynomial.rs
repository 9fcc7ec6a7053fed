use std::f64::consts::PI;

use crate::consts::LANCZOS_LOBES;

use super::Kernel;

/// Evaluate `c[0] + c[1] x + c[2] x² + ...` by Horner's method.
#[inline]
pub fn horner(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

/// Polynomial in `|x|` with ascending coefficients, zero outside its support.
#[derive(Clone, Debug, PartialEq)]
pub struct PolynomialKernel {
    coefficients: Vec<f64>,
    support: (f64, f64),
}

impl PolynomialKernel {
    pub fn new(coefficients: Vec<f64>, support_min: f64, support_max: f64) -> Self {
        Self {
            coefficients,
            support: (support_min, support_max),
        }
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }
}

impl Kernel for PolynomialKernel {
    fn support(&self) -> (f64, f64) {
        self.support
    }

    fn evaluate(&self, x: f64) -> f64 {
        if !self.is_within_support(x) {
            return 0.0;
        }
        horner(&self.coefficients, x.abs())
    }
}

/// Piecewise kernel: the first piece whose support contains `|x|` is used.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositeKernel {
    pieces: Vec<PolynomialKernel>,
    support: (f64, f64),
}

impl CompositeKernel {
    pub fn new(pieces: Vec<PolynomialKernel>) -> Self {
        let support = if pieces.is_empty() {
            (0.0, 0.0)
        } else {
            pieces.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                let (min, max) = p.support();
                (lo.min(min), hi.max(max))
            })
        };
        Self { pieces, support }
    }

    pub fn pieces(&self) -> &[PolynomialKernel] {
        &self.pieces
    }
}

impl Kernel for CompositeKernel {
    fn support(&self) -> (f64, f64) {
        self.support
    }

    fn evaluate(&self, x: f64) -> f64 {
        if self.pieces.is_empty() || !self.is_within_support(x) {
            return 0.0;
        }
        self.pieces
            .iter()
            .find(|p| p.is_within_support(x))
            .map_or(0.0, |p| p.evaluate(x))
    }
}

/// Lanczos kernel with [`LANCZOS_LOBES`] lobes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LanczosKernel;

impl Kernel for LanczosKernel {
    fn support(&self) -> (f64, f64) {
        (0.0, LANCZOS_LOBES)
    }

    fn evaluate(&self, x: f64) -> f64 {
        if !self.is_within_support(x) {
            0.0
        } else if x == 0.0 {
            1.0
        } else {
            let a = LANCZOS_LOBES;
            a * (PI * x).sin() * (PI * x / a).sin() / (PI * x).powi(2)
        }
    }
}
