//! Criterion benchmarks for loopsynth-core DSP primitives
//!
//! Run with: cargo bench -p loopsynth-core
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use loopsynth_core::{
    AudioBlock, EchoEffect, Lcg, MixGains, OnePole, config::MAX_ECHO_SAMPLES, mix_blocks,
    sine_table, soft_clip, to_i16,
};

const SAMPLE_RATE: f32 = 44100.0;
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512, 1024];

fn generate_test_signal(size: usize) -> Vec<f32> {
    let table = sine_table();
    (0..size)
        .map(|i| table.lookup(440.0 * i as f32 / SAMPLE_RATE) * 0.5)
        .collect()
}

fn bench_wavetable(c: &mut Criterion) {
    let mut group = c.benchmark_group("SineTable");
    let table = sine_table();

    for &block_size in BLOCK_SIZES {
        group.bench_with_input(
            BenchmarkId::new("lookup", block_size),
            &block_size,
            |b, &n| {
                let inc = 440.0 / SAMPLE_RATE;
                b.iter(|| {
                    let mut phase = 0.0f32;
                    for _ in 0..n {
                        black_box(table.lookup(black_box(phase)));
                        phase += inc;
                        if phase >= 1.0 {
                            phase -= 1.0;
                        }
                    }
                });
            },
        );
    }

    group.finish();
}

fn bench_echo(c: &mut Criterion) {
    let mut group = c.benchmark_group("EchoEffect");

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);

        group.bench_with_input(
            BenchmarkId::new("process", block_size),
            &block_size,
            |b, _| {
                let mut echo: Box<EchoEffect<MAX_ECHO_SAMPLES>> =
                    Box::new(EchoEffect::new(SAMPLE_RATE));
                echo.set_enabled(true);
                b.iter(|| {
                    for &sample in &input {
                        black_box(echo.process(black_box(sample)));
                    }
                });
            },
        );
    }

    group.finish();
}

fn bench_one_pole(c: &mut Criterion) {
    let mut group = c.benchmark_group("OnePole");

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);

        group.bench_with_input(
            BenchmarkId::new("process", block_size),
            &block_size,
            |b, _| {
                let mut lp = OnePole::from_coefficient(0.12);
                b.iter(|| {
                    for &sample in &input {
                        black_box(lp.process(black_box(sample)));
                    }
                });
            },
        );
    }

    group.finish();
}

fn bench_output_stage(c: &mut Criterion) {
    let mut group = c.benchmark_group("OutputStage");

    group.bench_function("lcg_block", |b| {
        let mut rng = Lcg::default();
        b.iter(|| {
            for _ in 0..AudioBlock::FRAMES {
                black_box(rng.next_bipolar());
            }
        });
    });

    group.bench_function("soft_clip_quantize", |b| {
        let input = generate_test_signal(AudioBlock::FRAMES);
        b.iter(|| {
            let mut block = AudioBlock::silent();
            for (i, &x) in input.iter().enumerate() {
                block.set_mono(i, to_i16(soft_clip(black_box(x * 3.0))));
            }
            black_box(block)
        });
    });

    group.bench_function("mix_blocks", |b| {
        let live = AudioBlock::silent();
        let looped = AudioBlock::silent();
        b.iter(|| black_box(mix_blocks(black_box(&live), black_box(&looped), MixGains::default())));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_wavetable,
    bench_echo,
    bench_one_pole,
    bench_output_stage
);
criterion_main!(benches);
