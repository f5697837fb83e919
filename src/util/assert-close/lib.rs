/* ************************************************************************ **
** This file is part of matops, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! `assert_close!`, for comparing floats (and containers of floats) in tests.
//!
//! ```ignore
//! assert_close!(1.0, 1.0 + 1e-12);
//! assert_close!(abs=1e-8, expected, actual);
//! assert_close!(rel=1e-6, abs=1e-12, &expected[..], &actual[..], "at step {}", i);
//! ```

use failure::Fail;

/// Relative tolerance used when none is given.
pub const DEFAULT_REL_TOL: f64 = 1e-9;

#[macro_export]
macro_rules! assert_close {
    ($($t:tt)*) => {
        $crate::__assert_close_parse!{[$crate::Tolerances::default()] $($t)*}
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __assert_close_parse {
    ([$tol:expr] abs=$abs:expr, $($rest:tt)*) => {
        $crate::__assert_close_parse!{[$tol.with_abs($abs)] $($rest)*}
    };
    ([$tol:expr] rel=$rel:expr, $($rest:tt)*) => {
        $crate::__assert_close_parse!{[$tol.with_rel($rel)] $($rest)*}
    };
    ([$tol:expr] $a:expr, $b:expr $(,)?) => {
        $crate::__assert_close_parse!{[$tol] $a, $b, "not nearly equal!"}
    };
    ([$tol:expr] $a:expr, $b:expr, $($fmt:tt)+) => {{
        let tol: $crate::Tolerances = $tol;
        if let Err(e) = $crate::CheckClose::check_close(&$a, &$b, tol) {
            panic!("{} (rel={}, abs={})\n{}", format!($($fmt)+), tol.rel, tol.abs, e);
        }
    }};
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tolerances {
    pub abs: f64,
    pub rel: f64,
}

impl Default for Tolerances {
    fn default() -> Self { Tolerances { abs: 0.0, rel: DEFAULT_REL_TOL } }
}

impl Tolerances {
    pub fn with_abs(self, abs: f64) -> Self { Tolerances { abs, ..self } }
    pub fn with_rel(self, rel: f64) -> Self { Tolerances { rel, ..self } }

    /// Same semantics as Python's `math.isclose`.
    pub fn is_close(&self, a: f64, b: f64) -> bool {
        assert!(self.abs >= 0.0 && self.rel >= 0.0, "negative tolerance");
        if a == b {
            return true; // includes infinities of the same sign
        }
        if a.is_infinite() || b.is_infinite() {
            return false;
        }
        (a - b).abs() < self.abs.max(self.rel * a.abs()).max(self.rel * b.abs())
    }
}

#[derive(Debug, Fail, PartialEq)]
pub enum CheckCloseError {
    #[fail(display = "mismatch at {:?}\n  left: {:?}\n right: {:?}", index, left, right)]
    Value { index: Vec<usize>, left: f64, right: f64 },
    #[fail(display = "shape mismatch\n  left: {:?}\n right: {:?}", left, right)]
    Shape { left: Vec<usize>, right: Vec<usize> },
}

impl CheckCloseError {
    /// Prefix the location of a failure with the index of an enclosing container.
    pub fn at(self, outer: usize) -> Self {
        match self {
            CheckCloseError::Value { mut index, left, right } => {
                index.insert(0, outer);
                CheckCloseError::Value { index, left, right }
            },
            shape => shape,
        }
    }
}

pub trait CheckClose<Rhs: ?Sized = Self> {
    fn check_close(&self, other: &Rhs, tol: Tolerances) -> Result<(), CheckCloseError>;
}

impl CheckClose for f64 {
    fn check_close(&self, other: &f64, tol: Tolerances) -> Result<(), CheckCloseError> {
        match tol.is_close(*self, *other) {
            true => Ok(()),
            false => Err(CheckCloseError::Value { index: vec![], left: *self, right: *other }),
        }
    }
}

impl<'a, T: ?Sized + CheckClose> CheckClose for &'a T {
    fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError>
    { (**self).check_close(*other, tol) }
}

impl<T: CheckClose> CheckClose for [T] {
    fn check_close(&self, other: &[T], tol: Tolerances) -> Result<(), CheckCloseError> {
        if self.len() != other.len() {
            return Err(CheckCloseError::Shape { left: vec![self.len()], right: vec![other.len()] });
        }
        for (i, (a, b)) in self.iter().zip(other).enumerate() {
            a.check_close(b, tol).map_err(|e| e.at(i))?;
        }
        Ok(())
    }
}

impl<T: CheckClose> CheckClose for Vec<T> {
    fn check_close(&self, other: &Vec<T>, tol: Tolerances) -> Result<(), CheckCloseError>
    { self[..].check_close(&other[..], tol) }
}

impl<T: CheckClose> CheckClose<[T]> for Vec<T> {
    fn check_close(&self, other: &[T], tol: Tolerances) -> Result<(), CheckCloseError>
    { self[..].check_close(other, tol) }
}

impl<T: CheckClose, const N: usize> CheckClose for [T; N] {
    fn check_close(&self, other: &[T; N], tol: Tolerances) -> Result<(), CheckCloseError>
    { self[..].check_close(&other[..], tol) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macro_forms() {
        assert_close!(1.0, 1.0);
        assert_close!(abs=1e-8, 1.0, 1.0 + 1e-9);
        assert_close!(rel=1e-8, abs=1e-8, 1.0, 1.0,);
        assert_close!(abs=1e-8, vec![1.0, 2.0], vec![1.0, 2.0], "{}", "nested");
        assert_close!(abs=1e-8, [[1.0, 2.0], [3.0, 4.0]], [[1.0, 2.0], [3.0, 4.0]]);
    }

    #[test]
    #[should_panic(expected = "not nearly equal")]
    fn not_close() {
        assert_close!(abs=0.0, rel=0.0, 1.0, 1.1);
    }

    #[test]
    fn error_location() {
        let left = vec![vec![0.0, 1.0], vec![2.0, 3.0]];
        let right = vec![vec![0.0, 1.0], vec![2.0, 3.5]];
        let err = left.check_close(&right, Tolerances::default()).unwrap_err();
        assert_eq!(err, CheckCloseError::Value { index: vec![1, 1], left: 3.0, right: 3.5 });
    }

    #[test]
    fn length_mismatch() {
        let err = vec![1.0].check_close(&vec![1.0, 2.0], Tolerances::default()).unwrap_err();
        assert_eq!(err, CheckCloseError::Shape { left: vec![1], right: vec![2] });
    }

    #[test]
    fn infinities() {
        let tol = Tolerances::default().with_abs(1.0);
        assert!(tol.is_close(std::f64::INFINITY, std::f64::INFINITY));
        assert!(!tol.is_close(std::f64::INFINITY, std::f64::NEG_INFINITY));
        assert!(!tol.is_close(std::f64::NAN, std::f64::NAN));
    }
}
