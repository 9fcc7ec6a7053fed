use std::ops::IndexMut;

/// Lower envelope of upward parabolas along one line.
///
/// Holds the working buffers so one instance can be reused for every line
/// of an axis pass. After [`transform`](Self::transform) the envelope of the
/// last line stays available through [`apexes`](Self::apexes).
#[derive(Clone, Debug, Default)]
pub struct Envelope {
    /// Apex positions of the kept parabolas, strictly increasing.
    vertices: Vec<usize>,
    /// Line value at each apex, captured before the readout overwrites it.
    values: Vec<f64>,
    /// `boundaries[j]` is the left edge of parabola `j`'s interval.
    boundaries: Vec<f64>,
}

/// Abscissa where the parabola with apex `(l, fl)` crosses the one at `(t, ft)`.
///
/// Solves `fl + p²(x - l)² = ft + p²(x - t)²` for `x`, with `sq = p²`.
#[inline]
fn intersection(l: usize, fl: f64, t: usize, ft: f64, sq: f64) -> f64 {
    let (lf, tf) = (l as f64, t as f64);
    (fl - ft + sq * (lf * lf - tf * tf)) / (2.0 * sq * (lf - tf))
}

impl Envelope {
    pub fn with_capacity(len: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(len),
            values: Vec::with_capacity(len),
            boundaries: Vec::with_capacity(len + 1),
        }
    }

    /// Apex positions of the envelope built for the most recent line.
    pub fn apexes(&self) -> &[usize] {
        &self.vertices
    }

    /// Replace the squared distances held in `line[0..len]` by the minimum
    /// over all finite cells `p` of `line[p] + (spacing * (l - p))²`.
    ///
    /// Infinite cells place no parabola. A line without any finite cell is
    /// left untouched. When a new parabola meets the top of the stack exactly
    /// at the top's left boundary, the top is discarded, so the newer apex
    /// wins ties.
    pub fn transform<L>(&mut self, line: &mut L, len: usize, spacing: f64)
    where
        L: IndexMut<usize, Output = f64> + ?Sized,
    {
        self.vertices.clear();
        self.values.clear();
        self.boundaries.clear();

        let sq = spacing * spacing;

        for l in 0..len {
            let value = line[l];
            if !value.is_finite() {
                continue;
            }

            let mut boundary = f64::NEG_INFINITY;
            while let (Some(&top), Some(&top_value)) = (self.vertices.last(), self.values.last()) {
                let s = intersection(l, value, top, top_value, sq);
                // The first apex owns the -inf sentinel and is never popped.
                if self.vertices.len() > 1 && s <= self.boundaries[self.boundaries.len() - 1] {
                    self.vertices.pop();
                    self.values.pop();
                    self.boundaries.pop();
                    continue;
                }
                boundary = s;
                break;
            }

            self.vertices.push(l);
            self.values.push(value);
            self.boundaries.push(boundary);
        }

        if self.vertices.is_empty() {
            return;
        }

        self.boundaries.push(f64::INFINITY);

        let mut k = 0;
        for l in 0..len {
            let q = l as f64;
            while self.boundaries[k + 1] < q {
                k += 1;
            }
            let dx = (q - self.vertices[k] as f64) * spacing;
            line[l] = self.values[k] + dx * dx;
        }

        self.boundaries.pop();
    }
}

/// Squared-distance transform of a single contiguous line, in place.
pub fn transform_line(line: &mut [f64], spacing: f64) {
    let len = line.len();
    Envelope::with_capacity(len).transform(line, len, spacing);
}
