use super::matrix::Matrix;

/// True when `a` sends every column of `vectors` to zero, entry by entry
/// within `tolerance`. Vectors that do not live in the domain of `a` are
/// never in its null space.
pub fn is_in_nullspace(a: &Matrix, vectors: &Matrix, tolerance: f64) -> bool {
    a.product(vectors).is_ok_and(|residual| {
        residual
            .rows
            .iter()
            .flatten()
            .all(|value| value.abs() <= tolerance)
    })
}
