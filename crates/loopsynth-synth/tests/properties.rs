//! Property-based tests for loopsynth-synth.
//!
//! Tests envelope range and per-stage monotonicity, phase normalization,
//! oldest-first stealing, and silencing using proptest for randomized
//! parameters and note sequences.

use loopsynth_core::AudioBlock;
use loopsynth_synth::{AdsrParams, Envelope, EnvelopeStage, Preset, VoicePool};
use proptest::prelude::*;

const SR: f32 = 44100.0;

fn adsr() -> impl Strategy<Value = AdsrParams> {
    (0.0f32..0.05, 0.0f32..0.05, 0.0f32..=1.0, 0.0f32..0.05).prop_map(
        |(attack_s, decay_s, sustain, release_s)| AdsrParams {
            attack_s,
            decay_s,
            sustain,
            release_s,
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The level stays in [0, 1], rises during Attack, and falls during
    /// Decay and Release, for any envelope shape and note-off time.
    #[test]
    fn envelope_monotonic_per_stage(params in adsr(), hold in 0usize..3000) {
        let steps = params.steps(SR);
        let mut env = Envelope::new();
        env.trigger();
        let mut prev = env.level();

        for n in 0..(hold + 6000) {
            if n == hold {
                env.release();
            }
            let stage = env.stage();
            let level = env.advance(&steps);
            prop_assert!((0.0..=1.0).contains(&level), "level {}", level);
            match stage {
                EnvelopeStage::Attack => prop_assert!(level >= prev),
                EnvelopeStage::Decay | EnvelopeStage::Release => prop_assert!(level <= prev),
                EnvelopeStage::Sustain => prop_assert_eq!(level, prev),
                EnvelopeStage::Off => prop_assert_eq!(level, 0.0),
            }
            prev = level;
        }
        prop_assert_eq!(env.stage(), EnvelopeStage::Off);
    }

    /// Every voice phase stays in [0, 1) after every rendered block.
    #[test]
    fn phase_stays_normalized(
        notes in prop::collection::vec((0u8..128, 1u8..128), 1..12),
        preset in 0i32..4,
    ) {
        let mut pool: VoicePool = VoicePool::new();
        pool.set_preset_index(preset);
        for &(note, vel) in &notes {
            pool.note_on(note, vel);
        }
        let mut block = AudioBlock::silent();
        for _ in 0..20 {
            pool.render_block(&mut block);
            for v in pool.voices() {
                prop_assert!((0.0..1.0).contains(&v.phase()), "phase {}", v.phase());
            }
        }
    }

    /// With all voices busy, a note-on replaces the voice holding the
    /// smallest age, and no other voice changes.
    #[test]
    fn oldest_voice_is_stolen(notes in prop::collection::vec(0u8..128, 9..30)) {
        let mut pool: VoicePool = VoicePool::new();
        for &n in &notes[..8] {
            pool.note_on(n, 100);
        }
        for &n in &notes[8..] {
            let before = *pool.voices();
            let oldest = before
                .iter()
                .enumerate()
                .min_by_key(|(_, v)| v.age())
                .map(|(i, _)| i)
                .unwrap();
            pool.note_on(n, 100);
            for (i, (b, a)) in before.iter().zip(pool.voices()).enumerate() {
                if i == oldest {
                    prop_assert_eq!(a.note(), n);
                    prop_assert!(a.age() > b.age());
                } else {
                    prop_assert_eq!(a.age(), b.age());
                }
            }
            prop_assert_eq!(pool.active_voice_count(), 8);
        }
    }

    /// `all_notes_off` leaves zero active voices whatever came before.
    #[test]
    fn all_notes_off_silences(
        events in prop::collection::vec((0u8..128, any::<bool>()), 0..40),
        blocks in 0usize..5,
    ) {
        let mut pool: VoicePool = VoicePool::new();
        pool.set_preset(Preset::Pad);
        let mut block = AudioBlock::silent();
        for &(note, on) in &events {
            if on { pool.note_on(note, 100) } else { pool.note_off(note) }
        }
        for _ in 0..blocks {
            pool.render_block(&mut block);
        }
        pool.all_notes_off();
        prop_assert_eq!(pool.active_voice_count(), 0);
        pool.render_block(&mut block);
        prop_assert!(block.is_silent());
    }
}
