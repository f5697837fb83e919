use crate::{Matrix, OpError, Outcome};
use crate::require_square;

pub fn transpose(a: &Matrix) -> Outcome {
    trace!("transpose of {}x{}", a.num_rows(), a.num_cols());
    Outcome::Matrix(a.to_transpose())
}

pub fn trace(a: &Matrix) -> Outcome {
    trace!("trace of {}x{}", a.num_rows(), a.num_cols());
    require_square("trace", a).map(|()| a.diagonal().sum::<f64>()).into()
}

pub fn add(a: &Matrix, b: &Matrix) -> Outcome {
    trace!("add {}x{} and {}x{}", a.num_rows(), a.num_cols(), b.num_rows(), b.num_cols());
    require_same_shape("add", a, b).map(|()| a.zip_map(b, |x, y| x + y)).into()
}

pub fn subtract(a: &Matrix, b: &Matrix) -> Outcome {
    trace!("subtract {}x{} and {}x{}", a.num_rows(), a.num_cols(), b.num_rows(), b.num_cols());
    require_same_shape("subtract", a, b).map(|()| a.zip_map(b, |x, y| x - y)).into()
}

/// Matrix product `a * b`, by the usual triple loop.
pub fn multiply(a: &Matrix, b: &Matrix) -> Outcome {
    trace!("multiply {}x{} by {}x{}", a.num_rows(), a.num_cols(), b.num_rows(), b.num_cols());
    if a.num_cols() != b.num_rows() {
        return Outcome::Error(OpError::ShapeMismatch {
            op: "multiply",
            left: a.dims().into(),
            right: b.dims().into(),
        });
    }

    let inner = a.num_cols();
    Outcome::Matrix(Matrix::from_fn((a.num_rows(), b.num_cols()), |r, c| {
        (0..inner).map(|k| a[(r, k)] * b[(k, c)]).sum()
    }))
}

pub fn scalar_multiply(a: &Matrix, k: f64) -> Outcome {
    trace!("scale {}x{} by {}", a.num_rows(), a.num_cols(), k);
    Outcome::Matrix(a.map(|x| x * k))
}

fn require_same_shape(op: &'static str, a: &Matrix, b: &Matrix) -> Result<(), OpError> {
    match a.dims() == b.dims() {
        true => Ok(()),
        false => Err(OpError::ShapeMismatch { op, left: a.dims().into(), right: b.dims().into() }),
    }
}
