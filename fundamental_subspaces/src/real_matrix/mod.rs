pub mod is_in_nullspace;
pub mod matrix;
pub mod row_echelon;
pub mod rref;

pub use matrix::Matrix;

/// Magnitude at or below which an entry counts as zero during elimination.
pub const DEFAULT_ZERO_TOLERANCE: f64 = 1e-12;
