use crate::ShapeError;

use std::fmt;
use std::ops::Index;
use matops_assert_close::{CheckClose, CheckCloseError, Tolerances};

/// Owned, dense matrix with C layout.
///
/// Cells cannot be changed once a `Matrix` is built; an edit is a new value,
/// and "did anything change?" is a plain `==`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>"))]
pub struct Matrix {
    // row-contiguous data
    data: Vec<f64>,
    // invariant: rows * cols == data.len()
    // invariant: rows > 0 && cols > 0
    rows: usize,
    cols: usize,
}

pub type Rows<'a> = std::slice::Chunks<'a, f64>;

impl Matrix {
    /// An all-zero matrix.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn zeros((rows, cols): (usize, usize)) -> Self {
        Matrix::from_fn((rows, cols), |_, _| 0.0)
    }

    pub fn identity(n: usize) -> Self {
        Matrix::from_fn((n, n), |r, c| if r == c { 1.0 } else { 0.0 })
    }

    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn from_fn(
        (rows, cols): (usize, usize),
        mut f: impl FnMut(usize, usize) -> f64,
    ) -> Self {
        assert!(rows > 0 && cols > 0, "zero-sized matrix: {}x{}", rows, cols);

        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Matrix { data, rows, cols }
    }

    /// # Panics
    ///
    /// Panics if either dimension is zero or if `data` has the wrong length.
    pub fn from_row_major_data((rows, cols): (usize, usize), data: Vec<f64>) -> Self {
        assert!(rows > 0 && cols > 0, "zero-sized matrix: {}x{}", rows, cols);
        assert_eq!(data.len(), rows * cols);
        Matrix { data, rows, cols }
    }

    /// Build from nested rows, as collected from user input.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, ShapeError> {
        let expected = match rows.first() {
            Some(row) if !row.is_empty() => row.len(),
            _ => return Err(ShapeError::Empty),
        };

        let num_rows = rows.len();
        let mut data = Vec::with_capacity(num_rows * expected);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != expected {
                return Err(ShapeError::Ragged { row, len: values.len(), expected });
            }
            data.extend(values);
        }
        Ok(Matrix { data, rows: num_rows, cols: expected })
    }

    pub fn to_nested(&self) -> Vec<Vec<f64>> {
        self.rows().map(|row| row.to_vec()).collect()
    }
}

impl Matrix {
    pub fn dims(&self) -> (usize, usize) { (self.rows, self.cols) }
    pub fn num_rows(&self) -> usize { self.rows }
    pub fn num_cols(&self) -> usize { self.cols }
    pub fn is_square(&self) -> bool { self.rows == self.cols }
    pub fn row_major_data(&self) -> &[f64] { &self.data }
    pub fn rows(&self) -> Rows<'_> { self.data.chunks(self.cols) }

    /// Iterate over the main diagonal.
    pub fn diagonal(&self) -> impl Iterator<Item = f64> + '_ {
        let n = usize::min(self.rows, self.cols);
        (0..n).map(move |i| self[(i, i)])
    }

    /// Change the dimensions, keeping the overlapping top-left block.
    ///
    /// Cells that did not exist before are zero.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn resized(&self, (rows, cols): (usize, usize)) -> Self {
        Matrix::from_fn((rows, cols), |r, c| {
            match r < self.rows && c < self.cols {
                true => self[(r, c)],
                false => 0.0,
            }
        })
    }

    /// The submatrix with one row and one column removed.
    ///
    /// Returns `None` when that would leave nothing behind (a 1xN or Nx1 input).
    pub fn minor(&self, row: usize, col: usize) -> Option<Self> {
        assert!(row < self.rows && col < self.cols);
        if self.rows == 1 || self.cols == 1 {
            return None;
        }

        let data = self.rows().enumerate()
            .filter(|&(r, _)| r != row)
            .flat_map(|(_, values)| {
                values.iter().enumerate()
                    .filter(move |&(c, _)| c != col)
                    .map(|(_, &x)| x)
            })
            .collect();
        Some(Matrix { data, rows: self.rows - 1, cols: self.cols - 1 })
    }

    pub fn to_transpose(&self) -> Self {
        Matrix::from_fn((self.cols, self.rows), |r, c| self[(c, r)])
    }

    /// Apply a function to every element.
    pub fn map(&self, mut f: impl FnMut(f64) -> f64) -> Self {
        Matrix {
            data: self.data.iter().map(|&x| f(x)).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Combine two matrices of identical shape elementwise.
    ///
    /// # Panics
    ///
    /// Panics on a shape mismatch.
    pub fn zip_map(&self, other: &Matrix, mut f: impl FnMut(f64, f64) -> f64) -> Self {
        assert_eq!(self.dims(), other.dims());
        Matrix {
            data: self.data.iter().zip(&other.data).map(|(&a, &b)| f(a, b)).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    #[inline(always)] // inlining should often remove bounds checks
    fn index(&self, (r, c): (usize, usize)) -> &f64 {
        debug_assert!(c < self.cols);
        &self.data[r * self.cols + c]
    }
}

impl std::convert::TryFrom<Vec<Vec<f64>>> for Matrix {
    type Error = ShapeError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, ShapeError> { Matrix::from_rows(rows) }
}

impl From<Matrix> for Vec<Vec<f64>> {
    fn from(m: Matrix) -> Self { m.to_nested() }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "[")?;
            for (j, x) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                match f.precision() {
                    Some(p) => write!(f, "{:.*}", p, x)?,
                    None => write!(f, "{}", x)?,
                }
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

impl CheckClose for Matrix {
    fn check_close(&self, other: &Matrix, tol: Tolerances) -> Result<(), CheckCloseError> {
        if self.dims() != other.dims() {
            return Err(CheckCloseError::Shape {
                left: vec![self.rows, self.cols],
                right: vec![other.rows, other.cols],
            });
        }
        self.to_nested().check_close(&other.to_nested(), tol)
    }
}
