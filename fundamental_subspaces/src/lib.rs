//! Bases for the four fundamental subspaces of a real matrix, computed either
//! by Gaussian elimination to reduced row-echelon form or by singular value
//! decomposition.

pub mod error;
pub mod real_matrix;
pub mod subspaces;

pub use error::{Result, SubspaceError};
pub use real_matrix::row_echelon::row_echelon;
pub use real_matrix::rref::ref_to_rref;
pub use real_matrix::Matrix;
pub use subspaces::rref_subspaces::compute_subspaces;
pub use subspaces::svd_subspaces::compute_subspaces_svd;
