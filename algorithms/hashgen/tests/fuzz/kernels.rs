use bolero::check;
use hashgen::kernels::{columnar, reference};
use hashgen::{word_mask, HashMatrix, InputVector};

#[test]
fn fuzz_kernel_agreement() {
    check!()
        .with_type::<(u8, Vec<(u8, u8, u32)>, Vec<u32>)>()
        .for_each(|(width, cells, words)| {
            // =============================================================================
            // MATRIX
            // =============================================================================

            let width = u32::from(*width % 32) + 1;
            let Ok(mut matrix) = HashMatrix::new(width) else {
                panic!("width {width} must be accepted");
            };
            for &(lane, slot, mask) in cells {
                let (lane, slot) = (usize::from(lane % 64), usize::from(slot % 52));
                matrix
                    .set_cell(lane, slot, u64::from(mask & word_mask(width)))
                    .unwrap();
            }

            // =============================================================================
            // INPUT
            // =============================================================================

            let mut input = InputVector::ZERO;
            for (slot, &word) in words.iter().take(52).enumerate() {
                input.set(slot, word & word_mask(width));
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
}
