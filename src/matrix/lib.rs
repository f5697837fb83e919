/* ************************************************************************ **
** This file is part of matops, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

#[cfg_attr(test, macro_use)]
extern crate matops_assert_close;

use failure::Fail;

pub use self::matrix::{Matrix, Rows};
mod matrix;

/// Produced when nested row data does not describe a non-empty rectangle.
#[derive(Debug, Fail, Clone, PartialEq)]
pub enum ShapeError {
    #[fail(display = "matrix must have at least one row and one column")]
    Empty,
    #[fail(display = "row {} has {} entries, expected {}", row, len, expected)]
    Ragged { row: usize, len: usize, expected: usize },
}
