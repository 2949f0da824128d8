pub mod extractor;
pub mod fundamental;
pub mod params;
pub mod rref_subspaces;
pub mod svd_subspaces;

pub use extractor::{Strategy, SubspaceExtractor};
pub use fundamental::{FundamentalSubspaces, Subspace};
pub use params::ReductionParams;
