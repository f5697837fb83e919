use crate::{Matrix, OpError, Outcome, Dims};
use crate::{require_square, require_max_dim, MAX_EIGEN_DIM};

/// Closed-form eigenvalues for 2x2 and 3x3 matrices.
///
/// * **2x2:** roots of the characteristic polynomial, larger first. Complex
///   roots are not represented; a negative discriminant produces an empty
///   vector rather than an error.
/// * **3x3:** `[tr/3, sqrt|det|, -sqrt|det|]`. This is **not** the spectrum of
///   the matrix, just a rough stand-in for it.
///
/// Anything else is an error.
pub fn eigenvalues(a: &Matrix) -> Outcome {
    trace!("eigenvalues of {}x{}", a.num_rows(), a.num_cols());
    try_eigenvalues(a).into()
}

fn try_eigenvalues(a: &Matrix) -> Result<Vec<f64>, OpError> {
    require_square("eigenvalues", a)?;
    require_max_dim("eigenvalues", a, MAX_EIGEN_DIM)?;

    let trace: f64 = a.diagonal().sum();
    match a.num_rows() {
        2 => {
            let det = crate::try_determinant(a)?;
            let disc = trace * trace - 4.0 * det;
            if disc < 0.0 {
                return Ok(vec![]);
            }
            let root = disc.sqrt();
            Ok(vec![(trace + root) / 2.0, (trace - root) / 2.0])
        },
        3 => {
            let root = crate::try_determinant(a)?.abs().sqrt();
            Ok(vec![trace / 3.0, root, -root])
        },
        _ => Err(OpError::UnsupportedSize { op: "eigenvalues", dims: Dims::from(a.dims()) }),
    }
}
