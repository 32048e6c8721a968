//! Criterion benchmarks for loopsynth-synth components
//!
//! Run with: cargo bench -p loopsynth-synth
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use loopsynth_core::AudioBlock;
use loopsynth_synth::{AdsrParams, Envelope, Preset, SharedVoicePool, VoicePool};

const SAMPLE_RATE: f32 = 44100.0;

// ============================================================================
// Envelope benchmarks
// ============================================================================

fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("Envelope");
    let steps = AdsrParams::default().steps(SAMPLE_RATE);

    group.bench_function("advance_block", |b| {
        let mut env = Envelope::new();
        env.trigger();
        b.iter(|| {
            for _ in 0..AudioBlock::FRAMES {
                black_box(env.advance(&steps));
            }
        });
    });

    group.finish();
}

// ============================================================================
// Voice pool benchmarks
// ============================================================================

fn bench_pool_presets(c: &mut Criterion) {
    let mut group = c.benchmark_group("VoicePool");

    for preset in Preset::ALL {
        for &voices in &[1usize, 4, 8] {
            group.bench_with_input(
                BenchmarkId::new(preset.name(), voices),
                &voices,
                |b, &voices| {
                    let mut pool: Box<VoicePool> = Box::new(VoicePool::new());
                    pool.set_preset(preset);
                    pool.set_echo_on(true);
                    for n in 0..voices as u8 {
                        pool.note_on(48 + n * 4, 100);
                    }
                    let mut block = AudioBlock::silent();
                    b.iter(|| {
                        pool.render_block(&mut block);
                        black_box(&block);
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_control(c: &mut Criterion) {
    let mut group = c.benchmark_group("Control");

    group.bench_function("note_on_steal", |b| {
        let mut pool: Box<VoicePool> = Box::new(VoicePool::new());
        let mut note = 0u8;
        b.iter(|| {
            pool.note_on(black_box(note), 100);
            note = (note + 1) % 128;
        });
    });

    group.bench_function("shared_note_on_off", |b| {
        let shared: Box<SharedVoicePool> =
            Box::new(SharedVoicePool::new(VoicePool::new()));
        b.iter(|| {
            shared.with(|p| p.note_on(black_box(60), 100));
            shared.with(|p| p.note_off(black_box(60)));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_envelope, bench_pool_presets, bench_control);
criterion_main!(benches);
