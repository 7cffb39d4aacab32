#![no_main]

use hashgen::kernels::{columnar, reference};
use hashgen::{word_mask, HashMatrix, InputVector};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // =============================================================================
    // PREPARATION
    // =============================================================================

    // Byte 0 picks the width, the next 208 bytes fill the input vector and
    // the rest is read as (lane, slot, mask) cell writes.
    let Some((&w, rest)) = data.split_first() else {
        return;
    };
    let width = u32::from(w % 32) + 1;
    let mask = word_mask(width);
    let Ok(mut matrix) = HashMatrix::new(width) else {
        return;
    };

    let split = rest.len().min(52 * 4);
    let (words, cells) = rest.split_at(split);
    let mut input = InputVector::ZERO;
    for (slot, chunk) in words.chunks_exact(4).enumerate() {
        let word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        input.set(slot, word & mask);
    }
    for cell in cells.chunks_exact(6) {
        let lane = usize::from(cell[0] % 64);
        let slot = usize::from(cell[1] % 52);
        let bits = u32::from_le_bytes([cell[2], cell[3], cell[4], cell[5]]);
        if matrix.set_cell(lane, slot, u64::from(bits & mask)).is_err() {
            return;
        }
    }

    // =============================================================================
    // VERIFICATION
    // =============================================================================

    assert_eq!(
        columnar::evaluate(&matrix, &input),
        reference::evaluate(&matrix, &input),
        "Columnar kernel diverged from row parity"
    );
});
