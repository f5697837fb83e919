use crate::{Matrix, Outcome, PIVOT_TOL};

/// Number of linearly independent rows (equivalently, columns).
///
/// Classic in-place Gaussian elimination on a private copy: a zero pivot is
/// first swapped with a later row, and if every later row is zero in that
/// column, the column is discarded by moving the last live column into its
/// place.
pub fn rank(a: &Matrix) -> Outcome {
    trace!("rank of {}x{}", a.num_rows(), a.num_cols());
    Outcome::Scalar(eliminate(a) as f64)
}

fn eliminate(a: &Matrix) -> usize {
    // rank(A) == rank(A^T); the working copy is kept at least as tall as it
    // is wide so that every live column has a diagonal element.
    let mut work = match a.num_rows() >= a.num_cols() {
        true => a.to_nested(),
        false => a.to_transpose().to_nested(),
    };
    let height = work.len();
    let mut rank = work[0].len();

    let mut row = 0;
    while row < rank {
        let pivot = work[row][row];
        if pivot.abs() > PIVOT_TOL {
            for other in 0..height {
                if other == row {
                    continue;
                }
                let factor = work[other][row] / pivot;
                for col in 0..rank {
                    let delta = factor * work[row][col];
                    work[other][col] -= delta;
                }
            }
            row += 1;
            continue;
        }

        match (row + 1..height).find(|&r| work[r][row].abs() > PIVOT_TOL) {
            Some(r) => work.swap(row, r),
            None => {
                rank -= 1;
                for values in &mut work {
                    values[row] = values[rank];
                }
            },
        }
        // look at this row again with the new pivot
    }
    rank
}
