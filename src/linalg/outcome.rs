use crate::{Matrix, OpError};

use std::fmt;

/// The value produced by one operation on one input.
///
/// Failures are ordinary values here: callers are expected to `match` on every
/// variant and show the error message where the number or grid would have gone.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "value", rename_all = "kebab-case"))]
pub enum Outcome {
    Scalar(f64),
    Matrix(Matrix),
    /// A list of numbers with no further structure. (eigenvalues)
    Vector(Vec<f64>),
    Error(#[cfg_attr(feature = "serde", serde(serialize_with = "serialize_display"))] OpError),
}

impl Outcome {
    pub fn as_scalar(&self) -> Option<f64> {
        match *self {
            Outcome::Scalar(x) => Some(x),
            _ => None,
        }
    }

    pub fn as_matrix(&self) -> Option<&Matrix> {
        match self {
            Outcome::Matrix(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Option<&[f64]> {
        match self {
            Outcome::Vector(v) => Some(v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&OpError> {
        match self {
            Outcome::Error(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool { self.error().is_some() }
}

impl From<Result<f64, OpError>> for Outcome {
    fn from(r: Result<f64, OpError>) -> Self { r.map_or_else(Outcome::Error, Outcome::Scalar) }
}

impl From<Result<Matrix, OpError>> for Outcome {
    fn from(r: Result<Matrix, OpError>) -> Self { r.map_or_else(Outcome::Error, Outcome::Matrix) }
}

impl From<Result<Vec<f64>, OpError>> for Outcome {
    fn from(r: Result<Vec<f64>, OpError>) -> Self { r.map_or_else(Outcome::Error, Outcome::Vector) }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Scalar(x) => fmt::Display::fmt(x, f),
            Outcome::Matrix(m) => fmt::Display::fmt(m, f),
            Outcome::Vector(xs) => {
                write!(f, "[")?;
                for (i, x) in xs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    fmt::Display::fmt(x, f)?;
                }
                write!(f, "]")
            },
            Outcome::Error(e) => write!(f, "error: {}", e),
        }
    }
}

#[cfg(feature = "serde")]
fn serialize_display<T: fmt::Display, S: serde::Serializer>(value: &T, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(value)
}
