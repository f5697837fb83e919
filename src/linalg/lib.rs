/* ************************************************************************ **
** This file is part of matops, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Dense linear algebra on small matrices.
//!
//! Every public operation returns an [`Outcome`] rather than panicking or
//! producing a `Result`, so that a batch of operations evaluated side by side
//! can report each failure in place of the value it would have produced.
//!
//! The algorithms are the textbook ones (cofactor expansion, naive Gaussian
//! elimination) and are only meant for the handful of rows a person types in
//! by hand. Size ceilings are enforced where the cost is exponential.
//!
//! [`Outcome`]: enum.Outcome.html

#[macro_use] extern crate log;
#[cfg(test)] #[macro_use] extern crate matops_assert_close;

pub use matops_matrix::Matrix;

pub use self::error::{OpError, Dims};
mod error;

pub use self::outcome::Outcome;
mod outcome;

pub use self::cofactor::{determinant, inverse, try_determinant, try_inverse};
mod cofactor;

pub use self::elimination::rank;
mod elimination;

pub use self::eigen::eigenvalues;
mod eigen;

pub use self::elementwise::{add, subtract, multiply, scalar_multiply, transpose, trace};
mod elementwise;

/// `|det|` below this makes a matrix singular for the purposes of `inverse`.
pub const SINGULAR_TOL: f64 = 1e-10;

/// Pivots with magnitude at or below this are treated as zero during elimination.
pub const PIVOT_TOL: f64 = 1e-10;

/// Largest dimension accepted by `determinant` and `inverse`.
pub const MAX_COFACTOR_DIM: usize = 4;

/// Largest dimension accepted by `eigenvalues`.
pub const MAX_EIGEN_DIM: usize = 3;

fn require_square(op: &'static str, a: &Matrix) -> Result<(), OpError> {
    match a.is_square() {
        true => Ok(()),
        false => Err(OpError::NotSquare { op, dims: a.dims().into() }),
    }
}

fn require_max_dim(op: &'static str, a: &Matrix, max: usize) -> Result<(), OpError> {
    match a.num_rows() <= max && a.num_cols() <= max {
        true => Ok(()),
        false => Err(OpError::SizeExceeded { op, dims: a.dims().into(), max }),
    }
}

#[cfg(test)]
pub(crate) mod test_util {
    use super::*;
    use rand::Rng;

    pub fn mat(rows: Vec<Vec<f64>>) -> Matrix { Matrix::from_rows(rows).unwrap() }

    pub fn random_matrix(dims: (usize, usize)) -> Matrix {
        let mut rng = rand::thread_rng();
        Matrix::from_fn(dims, |_, _| 1.0 - 2.0 * rng.gen::<f64>())
    }

    pub fn random_dims(max: usize) -> (usize, usize) {
        let mut rng = rand::thread_rng();
        (rng.gen_range(1, max + 1), rng.gen_range(1, max + 1))
    }
}
