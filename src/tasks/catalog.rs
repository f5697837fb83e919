/* ********************************************************************** **
**  This file is part of matops.                                          **
**                                                                        **
**  matops is free software: you can redistribute it and/or modify it     **
**  under the terms of the GNU General Public License as published by the **
**  Free Software Foundation, either version 3 of the License, or (at     **
**  your option) any later version.                                       **
**                                                                        **
**      http://www.gnu.org/licenses/                                      **
** ********************************************************************** */

//! The fixed table of operations, and which of them make sense for a given shape.

use matops_linalg::{self as linalg, Matrix, OpError, Outcome};
use serde::{Deserialize, Serialize};

use std::fmt;

/// Scalar operand used when an edit does not supply one.
pub const DEFAULT_SCALAR: f64 = 2.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperationName {
    Determinant,
    Inverse,
    Eigenvalues,
    Transpose,
    Trace,
    Rank,
    ScalarMultiply,
    Add,
    Subtract,
    Multiply,
}

impl OperationName {
    pub fn as_str(self) -> &'static str {
        match self {
            OperationName::Determinant => "determinant",
            OperationName::Inverse => "inverse",
            OperationName::Eigenvalues => "eigenvalues",
            OperationName::Transpose => "transpose",
            OperationName::Trace => "trace",
            OperationName::Rank => "rank",
            OperationName::ScalarMultiply => "scalar-multiply",
            OperationName::Add => "add",
            OperationName::Subtract => "subtract",
            OperationName::Multiply => "multiply",
        }
    }
}

impl fmt::Display for OperationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Arity {
    Unary,
    /// Needs `Inputs::rhs`. Shapes are only checked when evaluated.
    Binary,
}

/// Static description of one operation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Operation {
    pub name: OperationName,
    pub arity: Arity,
    pub square_only: bool,
    pub max_dim: Option<usize>,
}

/// Everything an operation may read: the edited matrix, plus the operands
/// used by binary operations and scalar multiplication.
#[derive(Debug, Clone, PartialEq)]
#[derive(Serialize)]
pub struct Inputs {
    pub matrix: Matrix,
    pub rhs: Option<Matrix>,
    pub scalar: f64,
}

impl Inputs {
    pub fn new(matrix: Matrix) -> Self {
        Inputs { matrix, rhs: None, scalar: DEFAULT_SCALAR }
    }

    pub fn with_rhs(self, rhs: Matrix) -> Self { Inputs { rhs: Some(rhs), ..self } }
    pub fn with_scalar(self, scalar: f64) -> Self { Inputs { scalar, ..self } }
}

const fn unary(name: OperationName, square_only: bool, max_dim: Option<usize>) -> Operation {
    Operation { name, arity: Arity::Unary, square_only, max_dim }
}

const fn binary(name: OperationName) -> Operation {
    Operation { name, arity: Arity::Binary, square_only: false, max_dim: None }
}

static CATALOG: [Operation; 10] = [
    unary(OperationName::Determinant, true, Some(linalg::MAX_COFACTOR_DIM)),
    unary(OperationName::Inverse, true, Some(linalg::MAX_COFACTOR_DIM)),
    unary(OperationName::Eigenvalues, true, Some(linalg::MAX_EIGEN_DIM)),
    unary(OperationName::Transpose, false, None),
    unary(OperationName::Trace, true, None),
    unary(OperationName::Rank, false, None),
    unary(OperationName::ScalarMultiply, false, None),
    binary(OperationName::Add),
    binary(OperationName::Subtract),
    binary(OperationName::Multiply),
];

/// Every known operation, in display order.
pub fn catalog() -> &'static [Operation] { &CATALOG }

pub fn lookup(name: OperationName) -> &'static Operation {
    // the table is in declaration order of OperationName
    &CATALOG[name as usize]
}

/// Operations whose shape predicate holds for this matrix.
///
/// Binary operations always pass; whether they can run depends on the
/// second operand, see [`Operation::accepts`].
pub fn applicable_operations(matrix: &Matrix) -> Vec<&'static Operation> {
    CATALOG.iter()
        .filter(|op| op.is_applicable(matrix.dims()))
        .collect()
}

impl Operation {
    pub fn is_applicable(&self, (rows, cols): (usize, usize)) -> bool {
        if self.square_only && rows != cols {
            return false;
        }
        match self.max_dim {
            Some(max) => rows <= max && cols <= max,
            None => true,
        }
    }

    /// Whether the scheduler should dispatch this operation for these inputs.
    pub fn accepts(&self, inputs: &Inputs) -> bool {
        self.is_applicable(inputs.matrix.dims()) && match self.arity {
            Arity::Unary => true,
            Arity::Binary => inputs.rhs.is_some(),
        }
    }

    pub fn evaluate(&self, inputs: &Inputs) -> Outcome {
        let a = &inputs.matrix;
        match self.name {
            OperationName::Determinant => linalg::determinant(a),
            OperationName::Inverse => linalg::inverse(a),
            OperationName::Eigenvalues => linalg::eigenvalues(a),
            OperationName::Transpose => linalg::transpose(a),
            OperationName::Trace => linalg::trace(a),
            OperationName::Rank => linalg::rank(a),
            OperationName::ScalarMultiply => linalg::scalar_multiply(a, inputs.scalar),
            OperationName::Add => self.with_rhs(inputs, linalg::add),
            OperationName::Subtract => self.with_rhs(inputs, linalg::subtract),
            OperationName::Multiply => self.with_rhs(inputs, linalg::multiply),
        }
    }

    fn with_rhs(&self, inputs: &Inputs, f: fn(&Matrix, &Matrix) -> Outcome) -> Outcome {
        match &inputs.rhs {
            Some(b) => f(&inputs.matrix, b),
            None => Outcome::Error(OpError::MissingOperand { op: self.name.as_str() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::OperationName::*;

    fn names(ops: &[&Operation]) -> Vec<OperationName> { ops.iter().map(|op| op.name).collect() }

    #[test]
    fn lookup_agrees_with_table() {
        for op in catalog() {
            assert_eq!(lookup(op.name), op);
        }
    }

    #[test]
    fn small_square_gets_everything() {
        for n in 1..=3 {
            assert_eq!(
                names(&applicable_operations(&Matrix::identity(n))),
                vec![Determinant, Inverse, Eigenvalues, Transpose, Trace, Rank, ScalarMultiply, Add, Subtract, Multiply],
            );
        }
    }

    #[test]
    fn four_by_four_loses_eigenvalues() {
        assert_eq!(
            names(&applicable_operations(&Matrix::identity(4))),
            vec![Determinant, Inverse, Transpose, Trace, Rank, ScalarMultiply, Add, Subtract, Multiply],
        );
    }

    #[test]
    fn large_square() {
        assert_eq!(
            names(&applicable_operations(&Matrix::identity(5))),
            vec![Transpose, Trace, Rank, ScalarMultiply, Add, Subtract, Multiply],
        );
    }

    #[test]
    fn rectangular() {
        assert_eq!(
            names(&applicable_operations(&Matrix::zeros((2, 3)))),
            vec![Transpose, Rank, ScalarMultiply, Add, Subtract, Multiply],
        );
    }

    #[test]
    fn binary_needs_rhs() {
        let inputs = Inputs::new(Matrix::identity(2));
        assert!(!lookup(Add).accepts(&inputs));
        assert!(lookup(Rank).accepts(&inputs));
        assert_eq!(
            lookup(Multiply).evaluate(&inputs),
            Outcome::Error(OpError::MissingOperand { op: "multiply" }),
        );

        let inputs = inputs.with_rhs(Matrix::identity(2).map(|x| 3.0 * x));
        assert!(lookup(Add).accepts(&inputs));
        assert_eq!(
            lookup(Add).evaluate(&inputs),
            Outcome::Matrix(Matrix::identity(2).map(|x| 4.0 * x)),
        );
    }

    #[test]
    fn scalar_comes_from_inputs() {
        let inputs = Inputs::new(Matrix::identity(2)).with_scalar(-1.5);
        assert_eq!(
            lookup(ScalarMultiply).evaluate(&inputs),
            Outcome::Matrix(Matrix::identity(2).map(|x| -1.5 * x)),
        );
    }

    #[test]
    fn names_are_kebab_case() {
        for op in catalog() {
            let json = serde_json::to_string(&op.name).unwrap();
            assert_eq!(json, format!("\"{}\"", op.name));
        }
    }
}
