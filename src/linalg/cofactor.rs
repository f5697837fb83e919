//! Determinant and inverse by cofactor expansion.
//!
//! This is O(n!) and is only offered up to `MAX_COFACTOR_DIM`.

use crate::{Matrix, OpError, Outcome};
use crate::{require_square, require_max_dim, MAX_COFACTOR_DIM, SINGULAR_TOL};

pub fn determinant(a: &Matrix) -> Outcome {
    trace!("determinant of {}x{}", a.num_rows(), a.num_cols());
    try_determinant(a).into()
}

pub fn inverse(a: &Matrix) -> Outcome {
    trace!("inverse of {}x{}", a.num_rows(), a.num_cols());
    try_inverse(a).into()
}

pub fn try_determinant(a: &Matrix) -> Result<f64, OpError> {
    require_square("determinant", a)?;
    require_max_dim("determinant", a, MAX_COFACTOR_DIM)?;
    Ok(expand(a))
}

/// Adjugate divided by the determinant.
///
/// Fails with `OpError::Singular` when `|det| < SINGULAR_TOL`.
pub fn try_inverse(a: &Matrix) -> Result<Matrix, OpError> {
    require_square("inverse", a)?;
    require_max_dim("inverse", a, MAX_COFACTOR_DIM)?;

    let det = expand(a);
    if det.abs() < SINGULAR_TOL {
        return Err(OpError::Singular);
    }

    // adj[j][i] = (-1)^(i+j) * det(minor(a, i, j))
    let n = a.num_rows();
    let adjugate = Matrix::from_fn((n, n), |j, i| sign(i + j) * minor_determinant(a, i, j));
    Ok(adjugate.map(|x| x / det))
}

// a must be square
fn expand(a: &Matrix) -> f64 {
    match a.num_rows() {
        1 => a[(0, 0)],
        2 => a[(0, 0)] * a[(1, 1)] - a[(0, 1)] * a[(1, 0)],
        n => (0..n).map(|i| sign(i) * a[(0, i)] * minor_determinant(a, 0, i)).sum(),
    }
}

// The empty minor of a 1x1 matrix has determinant 1, which makes its adjugate [[1]].
fn minor_determinant(a: &Matrix, row: usize, col: usize) -> f64 {
    a.minor(row, col).map_or(1.0, |m| expand(&m))
}

fn sign(k: usize) -> f64 {
    match k % 2 {
        0 => 1.0,
        _ => -1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Dims;
    use crate::test_util::{mat, random_matrix};
    use rand::Rng;

    #[test]
    fn small_determinants() {
        assert_eq!(determinant(&mat(vec![vec![7.0]])), Outcome::Scalar(7.0));
        assert_eq!(determinant(&mat(vec![vec![1.0, 2.0], vec![3.0, 4.0]])), Outcome::Scalar(-2.0));

        let a = mat(vec![
            vec![2.0, -3.0, 1.0],
            vec![2.0, 0.0, -1.0],
            vec![1.0, 4.0, 5.0],
        ]);
        assert_close!(abs=1e-12, try_determinant(&a).unwrap(), 49.0);

        let a = mat(vec![
            vec![1.0, 0.0, 2.0, -1.0],
            vec![3.0, 0.0, 0.0, 5.0],
            vec![2.0, 1.0, 4.0, -3.0],
            vec![1.0, 0.0, 5.0, 0.0],
        ]);
        assert_close!(abs=1e-12, try_determinant(&a).unwrap(), 30.0);
    }

    #[test]
    fn preconditions() {
        assert_eq!(
            determinant(&Matrix::zeros((2, 3))),
            Outcome::Error(OpError::NotSquare { op: "determinant", dims: Dims(2, 3) }),
        );
        assert_eq!(
            inverse(&Matrix::identity(5)),
            Outcome::Error(OpError::SizeExceeded { op: "inverse", dims: Dims(5, 5), max: 4 }),
        );
        assert_eq!(
            inverse(&mat(vec![vec![1.0, 2.0], vec![2.0, 4.0]])),
            Outcome::Error(OpError::Singular),
        );
    }

    #[test]
    fn known_inverse() {
        let a = mat(vec![vec![4.0, 7.0], vec![2.0, 6.0]]);
        let expected = mat(vec![vec![0.6, -0.7], vec![-0.2, 0.4]]);
        assert_close!(abs=1e-12, try_inverse(&a).unwrap(), expected);

        assert_eq!(try_inverse(&mat(vec![vec![4.0]])), Ok(mat(vec![vec![0.25]])));
    }

    #[test]
    fn inverse_times_self_is_identity() {
        for n in 1..=MAX_COFACTOR_DIM {
            let a = random_matrix((n, n));
            let inv = match try_inverse(&a) {
                Ok(inv) => inv,
                Err(_) => continue, // singular random uniform, astonishingly
            };
            let prod = crate::elementwise::multiply(&a, &inv);
            assert_close!(abs=1e-8, prod.as_matrix().unwrap(), &Matrix::identity(n));
        }
    }

    #[test]
    fn determinant_of_inverse_is_reciprocal() {
        for _ in 0..100 {
            let n = rand::thread_rng().gen_range(1, MAX_COFACTOR_DIM + 1);
            let a = random_matrix((n, n));
            let det = try_determinant(&a).unwrap();
            match try_inverse(&a) {
                Ok(inv) => assert_close!(rel=1e-6, try_determinant(&inv).unwrap(), 1.0 / det),
                Err(e) => {
                    assert_eq!(e, OpError::Singular);
                    assert!(det.abs() < SINGULAR_TOL);
                },
            }
        }
    }

    #[test]
    fn singular_exactly_below_tolerance() {
        let nearly = |eps: f64| mat(vec![vec![1.0, 0.0], vec![0.0, eps]]);
        assert_eq!(try_inverse(&nearly(0.5e-10)), Err(OpError::Singular));
        assert!(try_inverse(&nearly(2e-10)).is_ok());
        assert_eq!(try_inverse(&Matrix::zeros((3, 3))), Err(OpError::Singular));
    }
}
