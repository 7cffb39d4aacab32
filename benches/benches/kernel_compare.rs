//! Kernel Comparison Benchmark
//!
//! Row-parity reference vs the columnar kernel, called directly on the
//! matrix (no crossbar, no premix) across matrix densities.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use hashgen::kernels::{columnar, reference};
use hashgen::{HashMatrix, InputVector, LANE_COUNT, SLOT_COUNT};
use rand::prelude::*;
use std::hint::black_box;

fn random_u32s(count: usize) -> Vec<u32> {
    let mut bytes = vec![0u8; count * 4];
    rand::rng().fill(&mut bytes[..]);
    bytes
        .chunks_exact(4)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}

/// Matrix with roughly `percent`% of cells programmed.
fn matrix_with_density(percent: u32) -> HashMatrix {
    let mut matrix = HashMatrix::new(32).unwrap();
    let masks = random_u32s(LANE_COUNT * SLOT_COUNT);
    let picks = random_u32s(LANE_COUNT * SLOT_COUNT);
    for (i, (&mask, &pick)) in masks.iter().zip(&picks).enumerate() {
        if pick % 100 < percent {
            matrix
                .set_cell(i / SLOT_COUNT, i % SLOT_COUNT, u64::from(mask))
                .unwrap();
        }
    }
    matrix
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_kernels(c: &mut Criterion) {
    let mut group = c.benchmark_group("Hashgen Kernels");

    // Scenarios:
    // - Sparse input (2 slots set): columnar skips most columns
    // - Dense input (all slots random): worst case for columnar
    let dense = random_u32s(SLOT_COUNT);
    let mut sparse = InputVector::ZERO;
    sparse.set(0, dense[0]);
    sparse.set(1, dense[1]);
    let dense = InputVector::from_words(dense.try_into().unwrap());

    for percent in [5, 50, 100] {
        let matrix = matrix_with_density(percent);
        for (label, input) in [("sparse", &sparse), ("dense", &dense)] {
            group.bench_with_input(
                BenchmarkId::new(format!("Reference/{label}"), percent),
                input,
                |b, x| b.iter(|| reference::evaluate(black_box(&matrix), black_box(x))),
            );
            group.bench_with_input(
                BenchmarkId::new(format!("Columnar/{label}"), percent),
                input,
                |b, x| b.iter(|| columnar::evaluate(black_box(&matrix), black_box(x))),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_kernels);
criterion_main!(benches);
