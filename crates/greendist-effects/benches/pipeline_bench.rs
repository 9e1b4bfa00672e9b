//! Criterion benchmarks for the per-block distortion pipeline
//!
//! Run with: cargo bench -p greendist-effects
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use greendist_effects::{BlockPipeline, Param, ParamStore};

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512, 1024];

fn generate_test_signal(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE;
            (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.5
        })
        .collect()
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("BlockPipeline");

    let store = ParamStore::new();
    store.set(Param::Tone, 6000.0);
    store.set(Param::Highpass, 80.0);
    store.set(Param::Mix, 0.75);
    store.set(Param::Output, -6.0);

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);

        group.bench_with_input(
            BenchmarkId::new("stereo", block_size),
            &block_size,
            |b, &size| {
                let mut pipeline = BlockPipeline::new();
                pipeline.prepare(SAMPLE_RATE, size);
                let mut left = input.clone();
                let mut right = input.clone();
                b.iter(|| {
                    left.copy_from_slice(&input);
                    right.copy_from_slice(&input);
                    pipeline.process(&mut [&mut left[..], &mut right[..]], 2, black_box(&store));
                    black_box(left[0])
                });
            },
        );
    }

    // Worst case for the coefficient cache: the tone moves every block.
    group.bench_function("tone_sweep/512", |b| {
        let mut pipeline = BlockPipeline::new();
        pipeline.prepare(SAMPLE_RATE, 512);
        let input = generate_test_signal(512);
        let mut block = input.clone();
        let mut tone = 1000.0;
        b.iter(|| {
            tone = if tone > 8000.0 { 1000.0 } else { tone + 5.0 };
            store.set(Param::Tone, tone);
            block.copy_from_slice(&input);
            pipeline.process(&mut [&mut block[..]], 1, &store);
            black_box(block[0])
        });
    });

    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
