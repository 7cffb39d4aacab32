//! Hashgen Criterion Benchmark
//!
//! Evaluation latency, batch throughput and configuration cost.

#![allow(clippy::pedantic, clippy::nursery)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hashgen::{
    evaluate, Consumer, ContainerRef, HashUnitConfig, HashUnitConfigBuilder, KernelKind,
    LogicalSelector, OutputView, PhvBuffer, LANE_COUNT, SLOT_COUNT,
};
use rand::prelude::*;
use std::hint::black_box;

const CONTAINERS: usize = 224;

fn random_words(count: usize) -> Vec<u32> {
    let mut bytes = vec![0u8; count * 4];
    rand::rng().fill(&mut bytes[..]);
    bytes
        .chunks_exact(4)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}

fn random_phvs(count: usize) -> Vec<PhvBuffer> {
    (0..count)
        .map(|_| PhvBuffer::from_values(random_words(CONTAINERS)))
        .collect()
}

/// CRC-32 over 13 full-width slots (typical 5-tuple + VLAN key).
fn crc_builder(kernel: KernelKind) -> HashUnitConfigBuilder {
    let mut builder = HashUnitConfig::builder(32, CONTAINERS)
        .selector(LogicalSelector::Crc {
            polynomial: 0x04C1_1DB7,
            width: 32,
            slots: (0..13).collect(),
            first_lane: 0,
        })
        .seeds(&[0xFF; 4])
        .group(0, 0xFFFF_FFFF)
        .view(OutputView::new("table", Consumer::TableAddress).lanes(0, 20))
        .view(OutputView::new("ecmp", Consumer::PathSelect).lanes(20, 8))
        .kernel(kernel);
    for slot in 0..13 {
        builder = builder.source(slot, ContainerRef(slot as u16 * 7));
    }
    builder
}

/// Every slot enabled, every cell random.
fn dense_builder(kernel: KernelKind) -> HashUnitConfigBuilder {
    let masks = random_words(LANE_COUNT * SLOT_COUNT);
    let mut builder = HashUnitConfig::builder(32, CONTAINERS).kernel(kernel);
    for slot in 0..SLOT_COUNT {
        builder = builder.source(slot, ContainerRef(slot as u16 * 4));
    }
    for (i, &mask) in masks.iter().enumerate() {
        builder = builder.cell(i / SLOT_COUNT, i % SLOT_COUNT, u64::from(mask));
    }
    builder
}

// =============================================================================
// BENCHMARK 1: SINGLE EVALUATION
// =============================================================================

/// Per-packet latency for each kernel.
fn bench_single_eval(c: &mut Criterion) {
    let mut group = c.benchmark_group("1-Single-Eval");
    let phv = PhvBuffer::from_values(random_words(CONTAINERS));
    group.throughput(Throughput::Elements(1));

    for kernel in [KernelKind::Columnar, KernelKind::Reference] {
        let name = match kernel {
            KernelKind::Columnar => "columnar",
            KernelKind::Reference => "reference",
        };
        let crc = crc_builder(kernel).build().unwrap();
        group.bench_with_input(BenchmarkId::new("crc32", name), &crc, |b, config| {
            b.iter(|| evaluate(black_box(config), black_box(&phv)))
        });

        let dense = dense_builder(kernel).build().unwrap();
        group.bench_with_input(BenchmarkId::new("dense", name), &dense, |b, config| {
            b.iter(|| evaluate(black_box(config), black_box(&phv)))
        });
    }
    group.finish();
}

// =============================================================================
// BENCHMARK 2: BATCH
// =============================================================================

/// Serial loop vs the batch engine (Rayon when `multithread` is on).
fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("2-Batch");
    group.sample_size(50);
    let config = dense_builder(KernelKind::Columnar).build().unwrap();

    for count in [64, 1024, 16 * 1024] {
        let phvs = random_phvs(count);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("serial", count), &phvs, |b, phvs| {
            b.iter(|| {
                phvs.iter()
                    .map(|phv| evaluate(&config, black_box(phv)))
                    .collect::<Vec<_>>()
            })
        });

        group.bench_with_input(BenchmarkId::new("batch", count), &phvs, |b, phvs| {
            b.iter(|| hashgen::evaluate_batch(&config, black_box(phvs)))
        });
    }
    group.finish();
}

// =============================================================================
// BENCHMARK 3: THREAD SCALING
// =============================================================================

/// Batch scaling with the Rayon pool size (1 to N threads).
#[cfg(feature = "multithread")]
fn bench_thread_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("3-Thread-Scaling");
    group.sample_size(30);

    let config = dense_builder(KernelKind::Columnar).build().unwrap();
    let phvs = random_phvs(64 * 1024);
    group.throughput(Throughput::Elements(phvs.len() as u64));

    let max_threads = num_cpus::get();
    let thread_counts: Vec<usize> = [1, 2, 4, 8, 16, 32]
        .iter()
        .copied()
        .filter(|&t| t <= max_threads)
        .collect();

    for threads in thread_counts {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}threads", threads)),
            &threads,
            |b, &t| {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(t)
                    .build()
                    .unwrap();
                pool.install(|| b.iter(|| hashgen::evaluate_batch(&config, black_box(&phvs))));
            },
        );
    }
    group.finish();
}

// =============================================================================
// BENCHMARK 4: CONFIGURATION
// =============================================================================

/// Validation + translation + column precomputation cost.
fn bench_config_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("4-Config-Build");

    let crc = crc_builder(KernelKind::Columnar);
    group.bench_function("crc32-13-slots", |b| b.iter(|| black_box(&crc).build()));

    let dense = dense_builder(KernelKind::Columnar);
    group.bench_function("dense-64x52", |b| b.iter(|| black_box(&dense).build()));

    group.finish();
}

// =============================================================================
// MAIN
// =============================================================================

criterion_group!(benches, bench_single_eval, bench_batch, bench_config_build);

#[cfg(feature = "multithread")]
criterion_group!(benches_multithread, bench_thread_scaling);

#[cfg(feature = "multithread")]
criterion_main!(benches, benches_multithread);

#[cfg(not(feature = "multithread"))]
criterion_main!(benches);
