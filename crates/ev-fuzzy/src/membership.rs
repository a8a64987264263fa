//! Triangular membership functions evaluated on a fixed sample grid.
//!
//! Membership of a crisp input is not computed from the triangle directly.
//! Each set is first sampled on its variable's [`Universe`], then the input
//! is located on that grid and linearly interpolated.  Peaks and feet of the
//! standard sets fall on grid points, so for in-range inputs this agrees with
//! the analytic triangle up to rounding; outside the grid it is always `0`.

/// Triangle with feet `a`, `c` and peak `b` (`a <= b <= c`).
///
/// Degenerate shoulders are allowed: `a == b` gives a left shoulder whose
/// value at `b` is `1`, likewise `b == c` on the right.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Triangle {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Triangle {
    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// Degree of membership of `x`.
    ///
    /// Open intervals on both slopes, then the peak is forced to `1`, so a
    /// shoulder (`a == b`) still reaches full membership at `b`.
    pub fn degree(&self, x: f64) -> f64 {
        let Triangle { a, b, c } = *self;
        if x == b {
            return 1.0;
        }
        if a != b && a < x && x < b {
            return (x - a) / (b - a);
        }
        if b != c && b < x && x < c {
            return (c - x) / (c - b);
        }
        0.0
    }
}

/// Evenly spaced sample points `start, start + 1/n, …, stop`.
///
/// Points are generated as integer ticks divided by the resolution rather
/// than by repeated addition, so e.g. `0.0`, `-5.0` and `0.1` are exact.
#[derive(Clone, Debug, PartialEq)]
pub struct Universe {
    first_tick:     i64,
    count:          usize,
    ticks_per_unit: f64,
}

impl Universe {
    /// Grid over `[start, stop]` with `ticks_per_unit` points per unit
    /// (`10` → step `0.1`, `1` → step `1`, `100` → step `0.01`).
    pub fn new(start: f64, stop: f64, ticks_per_unit: u32) -> Self {
        let tpu = ticks_per_unit.max(1) as f64;
        let first_tick = (start * tpu).round() as i64;
        let last_tick  = (stop * tpu).round() as i64;
        let count = (last_tick - first_tick).max(0) as usize + 1;
        Self { first_tick, count, ticks_per_unit: tpu }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn point(&self, i: usize) -> f64 {
        (self.first_tick + i as i64) as f64 / self.ticks_per_unit
    }

    pub fn start(&self) -> f64 {
        self.point(0)
    }

    pub fn stop(&self) -> f64 {
        self.point(self.count - 1)
    }

    pub fn points(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.count).map(|i| self.point(i))
    }

    /// Sample `set` at every grid point.
    pub fn sample(&self, set: &Triangle) -> Vec<f64> {
        self.points().map(|x| set.degree(x)).collect()
    }
}

/// Linear interpolation of `(xs, ys)` at `x`.
///
/// `xs` must be ascending.  Inputs outside `[xs[0], xs[last]]` (and `NaN`)
/// yield `0`.
pub fn interp_membership(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    debug_assert_eq!(xs.len(), ys.len());
    let (Some(&lo), Some(&hi)) = (xs.first(), xs.last()) else {
        return 0.0;
    };
    if !(lo..=hi).contains(&x) {
        return 0.0;
    }

    let i = xs.partition_point(|&p| p <= x);
    if i == xs.len() {
        return ys[xs.len() - 1];
    }
    // i ≥ 1 because xs[0] <= x.
    let (x0, x1) = (xs[i - 1], xs[i]);
    let (y0, y1) = (ys[i - 1], ys[i]);
    y0 + (x - x0) * (y1 - y0) / (x1 - x0)
}
