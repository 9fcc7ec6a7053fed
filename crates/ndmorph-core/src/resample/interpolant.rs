/// One line of samples, extended past both ends for interpolation.
///
/// Reads at -1 and `len` return a linear extrapolation from the two nearest
/// samples; anything further out reads as zero.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Interpolant<'a> {
    samples: &'a [f64],
    before: f64,
    after: f64,
}

impl<'a> Interpolant<'a> {
    pub(crate) fn new(samples: &'a [f64]) -> Self {
        let (before, after) = match samples.len() {
            0 | 1 => (0.0, 0.0),
            n => (
                2.0 * samples[0] - samples[1],
                2.0 * samples[n - 1] - samples[n - 2],
            ),
        };
        Self {
            samples,
            before,
            after,
        }
    }

    #[inline]
    pub(crate) fn get(&self, i: isize) -> f64 {
        let len = self.samples.len() as isize;
        if i == -1 {
            self.before
        } else if i == len {
            self.after
        } else if (0..len).contains(&i) {
            self.samples[i as usize]
        } else {
            0.0
        }
    }
}
