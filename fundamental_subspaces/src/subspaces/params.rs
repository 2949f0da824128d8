use crate::error::{Result, SubspaceError};
use crate::real_matrix::DEFAULT_ZERO_TOLERANCE;

/// Singular values at or below this count as zero when determining rank.
pub const DEFAULT_RANK_TOLERANCE: f64 = 1e-10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReductionParams {
    /// Pivot threshold shared by row reduction, back substitution and pivot detection.
    pub zero_tolerance: f64,
    /// Singular-value threshold used by the SVD strategy.
    pub rank_tolerance: f64,
}

impl ReductionParams {
    pub fn new(zero_tolerance: f64, rank_tolerance: f64) -> Self {
        Self {
            zero_tolerance,
            rank_tolerance,
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure_tolerance("zero tolerance", self.zero_tolerance)?;
        ensure_tolerance("rank tolerance", self.rank_tolerance)
    }
}

impl Default for ReductionParams {
    fn default() -> Self {
        Self::new(DEFAULT_ZERO_TOLERANCE, DEFAULT_RANK_TOLERANCE)
    }
}

// a negative or NaN threshold would let an exact zero become a pivot
pub(crate) fn ensure_tolerance(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SubspaceError::InvalidTolerance { name, value })
    }
}
