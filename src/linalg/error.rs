use failure::Fail;
use std::fmt;

/// Why an operation could not produce a value for its input.
#[derive(Debug, Fail, Clone, PartialEq)]
pub enum OpError {
    #[fail(display = "{}: incompatible shapes {} and {}", op, left, right)]
    ShapeMismatch { op: &'static str, left: Dims, right: Dims },

    #[fail(display = "{}: requires a square matrix, got {}", op, dims)]
    NotSquare { op: &'static str, dims: Dims },

    #[fail(display = "{}: {} exceeds the maximum supported size of {}x{}", op, dims, max, max)]
    SizeExceeded { op: &'static str, dims: Dims, max: usize },

    #[fail(display = "{}: not supported for a {} matrix", op, dims)]
    UnsupportedSize { op: &'static str, dims: Dims },

    #[fail(display = "Matrix is singular")]
    Singular,

    #[fail(display = "{}: requires a second matrix", op)]
    MissingOperand { op: &'static str },
}

/// `(rows, cols)`, displayed as `RxC`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Dims(pub usize, pub usize);

impl From<(usize, usize)> for Dims {
    fn from((rows, cols): (usize, usize)) -> Self { Dims(rows, cols) }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.0, self.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(OpError::Singular.to_string(), "Matrix is singular");
        assert_eq!(
            OpError::SizeExceeded { op: "inverse", dims: Dims(5, 5), max: 4 }.to_string(),
            "inverse: 5x5 exceeds the maximum supported size of 4x4",
        );
        assert_eq!(
            OpError::ShapeMismatch { op: "add", left: Dims(2, 2), right: Dims(2, 3) }.to_string(),
            "add: incompatible shapes 2x2 and 2x3",
        );
    }
}
