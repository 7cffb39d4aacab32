//! Reference kernel: row-wise masked parity.
//!
//! `lane[r] = parity(XOR over c of cell[r][c] & x[c])`, one row at a time.
//! Slow but a literal reading of the definition; other kernels are checked
//! against it.

use crate::types::{InputVector, Lanes};
use crate::unit::matrix::HashMatrix;

/// Evaluate all 64 lanes row by row.
#[must_use]
pub fn evaluate(matrix: &HashMatrix, input: &InputVector) -> Lanes {
    matrix
        .rows()
        .iter()
        .enumerate()
        .fold(0, |lanes, (lane, row)| {
            let selected = row
                .iter()
                .zip(input.words().iter())
                .fold(0, |acc, (&cell, &word)| acc ^ (cell & word));
            lanes | (Lanes::from(selected.count_ones() & 1) << lane)
        })
}
