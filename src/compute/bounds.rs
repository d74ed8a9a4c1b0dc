//! Box bounds and bounds correction.

use super::ProblemError;
use super::evolution::SearchRng;

/// Validated feasible box `[lower, upper]`, fixed for a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl Bounds {
    /// Create bounds, rejecting empty, mismatched, non-finite, or inverted input.
    ///
    /// Each bound is also limited to half the largest finite `f64`, so the
    /// width of a dimension and any walk re-centered inside the box stay finite.
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Result<Self, ProblemError> {
        if lower.is_empty() {
            return Err(ProblemError::EmptyBounds);
        }
        if lower.len() != upper.len() {
            return Err(ProblemError::LengthMismatch {
                lower: lower.len(),
                upper: upper.len(),
            });
        }
        for (dim, (&lo, &hi)) in lower.iter().zip(&upper).enumerate() {
            if !lo.is_finite() || !hi.is_finite() {
                return Err(ProblemError::NonFiniteBound { dim });
            }
            if lo > hi {
                return Err(ProblemError::InvertedBounds {
                    dim,
                    lower: lo,
                    upper: hi,
                });
            }
            if !(2.0 * lo.abs().max(hi.abs())).is_finite() {
                return Err(ProblemError::RangeOverflow { dim });
            }
        }
        Ok(Self { lower, upper })
    }

    /// Bounds `[-bound, bound]` in every dimension.
    pub fn symmetric(n_dims: usize, bound: f64) -> Result<Self, ProblemError> {
        Self::new(vec![-bound; n_dims], vec![bound; n_dims])
    }

    /// Number of dimensions.
    #[inline]
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

    /// Whether `solution` lies component-wise inside the box.
    pub fn contains(&self, solution: &[f64]) -> bool {
        solution.len() == self.n_dims()
            && solution
                .iter()
                .zip(self.lower.iter().zip(&self.upper))
                .all(|(&x, (&lo, &hi))| x >= lo && x <= hi)
    }

    /// Repair a raw vector into the box.
    ///
    /// Finite components are clipped; non-finite ones are replaced by the
    /// midpoint of their interval.
    pub fn correct(&self, raw: &[f64]) -> Vec<f64> {
        debug_assert_eq!(raw.len(), self.n_dims());
        raw.iter()
            .zip(self.lower.iter().zip(&self.upper))
            .map(|(&x, (&lo, &hi))| {
                if x.is_finite() {
                    x.clamp(lo, hi)
                } else {
                    0.5 * (lo + hi)
                }
            })
            .collect()
    }

    /// Sample a solution uniformly inside the box.
    pub fn random_solution(&self, rng: &mut SearchRng) -> Vec<f64> {
        self.lower
            .iter()
            .zip(&self.upper)
            .map(|(&lo, &hi)| rng.uniform_in(lo, hi))
            .collect()
    }
}
