use strum_macros::{Display, EnumIter, EnumString};

use super::fundamental::FundamentalSubspaces;
use super::params::ReductionParams;
use super::rref_subspaces::RrefSubspaces;
use super::svd_subspaces::SvdSubspaces;
use crate::error::{Result, SubspaceError};
use crate::real_matrix::Matrix;

pub trait SubspaceExtractor {
    fn extract(&self, matrix: &Matrix) -> Result<FundamentalSubspaces>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Strategy {
    Rref,
    Svd,
}

impl Strategy {
    pub fn extractor(self, params: ReductionParams) -> Box<dyn SubspaceExtractor> {
        match self {
            Self::Rref => Box::new(RrefSubspaces::new(params)),
            Self::Svd => Box::new(SvdSubspaces::new(params.rank_tolerance)),
        }
    }
}

pub(crate) fn ensure_not_empty(matrix: &Matrix) -> Result<()> {
    if matrix.is_empty() {
        let (rows, cols) = matrix.shape();
        return Err(SubspaceError::Shape {
            rows,
            cols,
            reason: "subspaces need at least one row and one column",
        });
    }
    Ok(())
}
