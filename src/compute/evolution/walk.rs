//! Bounded random walks around an antlion.
//!
//! A walk is built in three stages:
//!
//! 1. The feasible box is divided by the shrink ratio `I`, which grows in
//!    stages as the epoch approaches the horizon.
//! 2. Each end of the shrunk box is re-centered on the reference solution,
//!    either as `bound + reference` or `-bound + reference` with equal
//!    probability.
//! 3. One cumulative walk of `±1` steps per dimension is min-max normalized
//!    onto that dimension's re-centered interval.
//!
//! Stage 3 is the only part that differs between strategies, so it is the
//! [`RandomWalk::walk`] method; [`RandomWalk::generate`] runs all three.

use std::fmt;

use crate::compute::{Bounds, ProblemError};
use crate::schema::WalkStrategy;

use super::SearchRng;

/// Stages of the shrink schedule as `(fraction of horizon, coefficient)`.
/// Past `fraction * T`, `I = 1 + coefficient * t / T`; later stages win.
const SHRINK_STAGES: [(f64, f64); 5] = [
    (0.10, 1e2),
    (0.50, 1e3),
    (0.75, 1e4),
    (0.90, 1e5),
    (0.95, 1e6),
];

/// Shrink ratio `I` for epoch `epoch` out of `max_epoch`.
///
/// Equals 1 up to a tenth of the horizon and never decreases with `epoch`.
pub fn shrink_ratio(epoch: usize, max_epoch: usize) -> f64 {
    if max_epoch == 0 {
        return 1.0;
    }
    let t = epoch as f64;
    let horizon = max_epoch as f64;

    SHRINK_STAGES
        .iter()
        .rev()
        .find(|(fraction, _)| t > horizon * fraction)
        .map_or(1.0, |(_, coefficient)| 1.0 + coefficient * (t / horizon))
}

/// Per-dimension target interval of a walk.
///
/// `lower[k]` may exceed `upper[k]`: re-centering can flip the interval, in
/// which case normalization maps the walk's minimum to `lower[k]` anyway.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkInterval {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl WalkInterval {
    /// Interval with one `[lower[k], upper[k]]` pair per dimension.
    ///
    /// The ends may be in either order.
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Result<Self, ProblemError> {
        if lower.len() != upper.len() {
            return Err(ProblemError::LengthMismatch {
                lower: lower.len(),
                upper: upper.len(),
            });
        }
        Ok(Self { lower, upper })
    }

    /// Shrink `bounds` for this epoch and re-center both ends on `reference`.
    pub fn around(
        reference: &[f64],
        epoch: usize,
        horizon: usize,
        bounds: &Bounds,
        rng: &mut SearchRng,
    ) -> Self {
        let ratio = shrink_ratio(epoch, horizon);
        let lower_sign = if rng.coin() { 1.0 } else { -1.0 };
        let upper_sign = if rng.coin() { 1.0 } else { -1.0 };

        let recenter = |bound: &[f64], sign: f64| -> Vec<f64> {
            bound
                .iter()
                .zip(reference)
                .map(|(&b, &r)| sign * (b / ratio) + r)
                .collect()
        };

        Self {
            lower: recenter(bounds.lower(), lower_sign),
            upper: recenter(bounds.upper(), upper_sign),
        }
    }

    pub fn n_dims(&self) -> usize {
        self.lower.len()
    }

    #[inline]
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    #[inline]
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Whether `value` lies in dimension `k`'s interval, within `tol`.
    pub fn contains(&self, k: usize, value: f64, tol: f64) -> bool {
        let (lo, hi) = if self.lower[k] <= self.upper[k] {
            (self.lower[k], self.upper[k])
        } else {
            (self.upper[k], self.lower[k])
        };
        value >= lo - tol && value <= hi + tol
    }
}

/// `n_dims x horizon` matrix of walk positions, stored row-major by dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkMatrix {
    n_dims: usize,
    horizon: usize,
    data: Vec<f64>,
}

impl WalkMatrix {
    /// Zero-filled matrix.
    pub fn zeros(n_dims: usize, horizon: usize) -> Self {
        Self {
            n_dims,
            horizon,
            data: vec![0.0; n_dims * horizon],
        }
    }

    #[inline]
    pub fn n_dims(&self) -> usize {
        self.n_dims
    }

    #[inline]
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    #[inline]
    pub fn get(&self, dim: usize, step: usize) -> f64 {
        self.data[dim * self.horizon + step]
    }

    /// Walk of one dimension over the whole horizon.
    #[inline]
    pub fn row(&self, dim: usize) -> &[f64] {
        &self.data[dim * self.horizon..(dim + 1) * self.horizon]
    }

    #[inline]
    pub fn row_mut(&mut self, dim: usize) -> &mut [f64] {
        let h = self.horizon;
        &mut self.data[dim * h..(dim + 1) * h]
    }

    /// Positions of every dimension at one step.
    pub fn column(&self, step: usize) -> Vec<f64> {
        (0..self.n_dims).map(|k| self.get(k, step)).collect()
    }
}

/// Random-walk construction strategy.
pub trait RandomWalk: Send + Sync + fmt::Debug {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Build normalized walks of length `horizon` into `interval`.
    fn walk(&self, interval: &WalkInterval, horizon: usize, rng: &mut SearchRng) -> WalkMatrix;

    /// Walks around `reference` for `epoch` with the given horizon.
    fn generate(
        &self,
        reference: &[f64],
        epoch: usize,
        horizon: usize,
        bounds: &Bounds,
        rng: &mut SearchRng,
    ) -> WalkMatrix {
        let interval = WalkInterval::around(reference, epoch, horizon, bounds, rng);
        self.walk(&interval, horizon, rng)
    }
}

/// Builds each dimension's walk in turn, drawing its whole horizon at once.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialWalk;

impl RandomWalk for SequentialWalk {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn walk(&self, interval: &WalkInterval, horizon: usize, rng: &mut SearchRng) -> WalkMatrix {
        let mut matrix = WalkMatrix::zeros(interval.n_dims(), horizon);
        for k in 0..interval.n_dims() {
            let row = matrix.row_mut(k);
            let mut position = 0.0;
            for x in row.iter_mut() {
                position += rng.step();
                *x = position;
            }
            normalize_row(row, interval.lower[k], interval.upper[k]);
        }
        matrix
    }
}

/// Builds all dimensions together: steps are drawn one time step at a time
/// across every dimension, then accumulated and rescaled row by row.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchWalk;

impl RandomWalk for BatchWalk {
    fn name(&self) -> &'static str {
        "batch"
    }

    fn walk(&self, interval: &WalkInterval, horizon: usize, rng: &mut SearchRng) -> WalkMatrix {
        let n_dims = interval.n_dims();
        let mut matrix = WalkMatrix::zeros(n_dims, horizon);
        if horizon == 0 {
            return matrix;
        }

        for t in 0..horizon {
            for k in 0..n_dims {
                matrix.data[k * horizon + t] = rng.step();
            }
        }

        let mut scale = vec![0.0; n_dims];
        let mut offset = vec![0.0; n_dims];
        let mut minima = vec![0.0; n_dims];
        for (k, row) in matrix.data.chunks_exact_mut(horizon).enumerate() {
            let mut position = 0.0;
            let mut lo = f64::INFINITY;
            let mut hi = f64::NEG_INFINITY;
            for x in row.iter_mut() {
                position += *x;
                *x = position;
                lo = lo.min(position);
                hi = hi.max(position);
            }

            let (c, d) = (interval.lower[k], interval.upper[k]);
            minima[k] = lo;
            if hi > lo {
                scale[k] = (d - c) / (hi - lo);
                offset[k] = c;
            } else {
                offset[k] = 0.5 * (c + d);
            }
        }

        for (k, row) in matrix.data.chunks_exact_mut(horizon).enumerate() {
            let (a, s, o) = (minima[k], scale[k], offset[k]);
            for x in row.iter_mut() {
                *x = (*x - a) * s + o;
            }
        }
        matrix
    }
}

/// Min-max map `row` from its own range onto `[c, d]`.
///
/// A constant row has no range to map from and becomes the midpoint of `[c, d]`.
fn normalize_row(row: &mut [f64], c: f64, d: f64) {
    let (a, b) = row
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
            (lo.min(x), hi.max(x))
        });
    if b > a {
        let scale = (d - c) / (b - a);
        for x in row.iter_mut() {
            *x = (*x - a) * scale + c;
        }
    } else {
        row.fill(0.5 * (c + d));
    }
}

/// Walk implementation for a configured strategy.
pub fn walk_for(strategy: WalkStrategy) -> Box<dyn RandomWalk> {
    match strategy {
        WalkStrategy::Sequential => Box::new(SequentialWalk),
        WalkStrategy::Batch => Box::new(BatchWalk),
    }
}
