use thiserror::Error;

/// Errors raised while building matrices or extracting subspaces.
#[derive(Debug, Error, PartialEq)]
pub enum SubspaceError {
    /// The matrix has a shape the operation cannot work with.
    #[error("unsupported {rows}x{cols} matrix: {reason}")]
    Shape {
        rows: usize,
        cols: usize,
        reason: &'static str,
    },

    /// A row does not have as many entries as the first one.
    #[error("matrix is not rectangular: row {row} has {actual} entries, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// The amount of supplied data disagrees with the declared dimensions.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("entry ({row}, {col}) is not a finite number")]
    NonFiniteEntry { row: usize, col: usize },

    /// A tolerance is negative or not a finite number.
    #[error("{name} must be a finite, non-negative number, got {value}")]
    InvalidTolerance { name: &'static str, value: f64 },

    /// `A` and `A^T` reduce to different ranks under the zero tolerance.
    #[error("rank {rank} of the matrix disagrees with rank {transpose_rank} of its transpose; the zero tolerance is too close to an entry")]
    InconsistentRank { rank: usize, transpose_rank: usize },

    #[error("singular value decomposition did not converge")]
    SvdDidNotConverge,
}

pub type Result<T> = std::result::Result<T, SubspaceError>;
