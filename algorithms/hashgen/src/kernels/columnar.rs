//! Columnar kernel: XOR of precomputed bit columns.
//!
//! Every set bit `b` of slot word `x[c]` flips the lanes in column `(c, b)`.
//! Cost scales with the number of set input bits instead of the matrix size.

use crate::types::{InputVector, Lanes};
use crate::unit::matrix::HashMatrix;

/// Evaluate all 64 lanes from the matrix column view.
#[inline]
#[must_use]
pub fn evaluate(matrix: &HashMatrix, input: &InputVector) -> Lanes {
    let mut lanes: Lanes = 0;
    for (slot, &word) in input.words().iter().enumerate() {
        let mut bits = word;
        while bits != 0 {
            lanes ^= matrix.column(slot, bits.trailing_zeros() as usize);
            bits &= bits - 1;
        }
    }
    lanes
}
