pub mod discrete;
pub mod polynomial;
pub mod spec;

pub use discrete::DiscreteKernel;
pub use polynomial::{horner, CompositeKernel, LanczosKernel, PolynomialKernel};
pub use spec::KernelSpec;

/// A continuous, symmetric interpolation kernel.
///
/// Support is an interval `[min, max]` on `|x|`; kernels evaluate to zero
/// outside it.
pub trait Kernel: Send + Sync {
    fn support(&self) -> (f64, f64);

    fn evaluate(&self, x: f64) -> f64;

    fn support_max(&self) -> f64 {
        self.support().1
    }

    fn is_within_support(&self, x: f64) -> bool {
        let (min, max) = self.support();
        let abs_x = x.abs();
        abs_x >= min && abs_x <= max
    }
}

/// Evaluate `kernel` at every value of `xs`.
pub fn sample_kernel(kernel: &dyn Kernel, xs: &[f64]) -> Vec<f64> {
    xs.iter().map(|&x| kernel.evaluate(x)).collect()
}

/// Constant 1 on `[0, 0.5]`; nearest-neighbour sampling.
pub fn box_kernel() -> PolynomialKernel {
    PolynomialKernel::new(vec![1.0], 0.0, 0.5)
}

/// `1 - |x|` on `[0, 1]`; linear interpolation.
pub fn triangle_kernel() -> PolynomialKernel {
    PolynomialKernel::new(vec![1.0, -1.0], 0.0, 1.0)
}

/// Mitchell-Netravali family of piecewise cubics with parameters `b` and `c`.
pub fn mitchell_netravali_kernel(b: f64, c: f64) -> CompositeKernel {
    let inner = PolynomialKernel::new(
        vec![1.0 - b / 3.0, 0.0, -3.0 + 2.0 * b + c, 2.0 - 1.5 * b - c],
        0.0,
        1.0,
    );
    let outer = PolynomialKernel::new(
        vec![
            4.0 * b / 3.0 + 4.0 * c,
            -2.0 * b - 8.0 * c,
            b + 5.0 * c,
            -b / 6.0 - c,
        ],
        1.0,
        2.0,
    );
    CompositeKernel::new(vec![inner, outer])
}

/// Three-lobed Lanczos (windowed sinc) kernel.
pub fn lanczos_kernel() -> LanczosKernel {
    LanczosKernel::default()
}
