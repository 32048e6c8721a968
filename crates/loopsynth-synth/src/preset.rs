//! Preset waveform synthesis.
//!
//! Every preset is a per-sample function of the voice phase, built from
//! lookups into the shared sine table:
//!
//! | # | Preset | Signal |
//! |---|--------|--------|
//! | 0 | [`Preset::Sine`] | `sin(p)` |
//! | 1 | [`Preset::Additive`] | `sin(p) + .5 sin(2p) + .3 sin(3p) + .2 sin(1.5p)` |
//! | 2 | [`Preset::Electric`] | `sin(p) + .35 sin(2p) + .15 sin(4p)` plus a decaying noise burst |
//! | 3 | [`Preset::Pad`] | two sines detuned by ±0.4 %, one-pole low-passed |
//!
//! Harmonic arguments are taken modulo 1 before lookup. The electric and pad
//! presets carry per-voice state in [`PresetState`].

use loopsynth_core::{Lcg, OnePole, SineTable};

/// Per-sample decay of the electric noise burst.
pub const TRANSIENT_DECAY: f32 = 0.9992;
/// Peak amplitude of the electric noise burst.
pub const TRANSIENT_NOISE_LEVEL: f32 = 0.15;
/// Relative detune of the two pad oscillators.
pub const PAD_DETUNE: f32 = 0.004;
/// Per-oscillator pad weight.
pub const PAD_WEIGHT: f32 = 0.6;
/// Pad low-pass coefficient.
pub const PAD_LOWPASS: f32 = 0.12;

/// Waveform preset of a voice pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Pure sine.
    #[default]
    Sine,
    /// Organ/bell: fundamental plus three harmonics.
    Additive,
    /// Electric piano: harmonics plus a noise transient.
    Electric,
    /// Soft pad: detuned pair through a low-pass.
    Pad,
}

impl Preset {
    /// All presets in index order.
    pub const ALL: [Preset; 4] = [Preset::Sine, Preset::Additive, Preset::Electric, Preset::Pad];

    /// Preset for an index; out-of-range indices clamp to the nearest end.
    pub fn from_index(index: i32) -> Self {
        match index {
            i32::MIN..=0 => Preset::Sine,
            1 => Preset::Additive,
            2 => Preset::Electric,
            _ => Preset::Pad,
        }
    }

    /// Index of this preset (0..=3).
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Short display name.
    pub fn name(self) -> &'static str {
        match self {
            Preset::Sine => "sine",
            Preset::Additive => "additive",
            Preset::Electric => "electric",
            Preset::Pad => "pad",
        }
    }
}

impl From<u8> for Preset {
    fn from(index: u8) -> Self {
        Self::from_index(i32::from(index))
    }
}

/// Per-voice state used by the stateful presets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PresetState {
    /// Noise burst envelope for [`Preset::Electric`], starts at 1.
    pub transient: f32,
    /// Low-pass for [`Preset::Pad`].
    pub lowpass: OnePole,
}

impl Default for PresetState {
    fn default() -> Self {
        Self {
            transient: 1.0,
            lowpass: OnePole::from_coefficient(PAD_LOWPASS),
        }
    }
}

impl PresetState {
    /// Reset to the note-on state: full transient, empty filter.
    pub fn reset(&mut self) {
        self.transient = 1.0;
        self.lowpass.reset();
    }
}

#[inline]
fn harmonic(table: &SineTable, phase: f32, ratio: f32) -> f32 {
    table.lookup(libm::fmodf(phase * ratio, 1.0))
}

/// Synthesize one raw (pre-envelope) sample for `preset` at `phase`.
///
/// `rng` is only consumed by [`Preset::Electric`].
#[inline]
pub fn synthesize(
    preset: Preset,
    phase: f32,
    table: &SineTable,
    state: &mut PresetState,
    rng: &mut Lcg,
) -> f32 {
    match preset {
        Preset::Sine => table.lookup(phase),
        Preset::Additive => {
            table.lookup(phase)
                + 0.5 * harmonic(table, phase, 2.0)
                + 0.3 * harmonic(table, phase, 3.0)
                + 0.2 * harmonic(table, phase, 1.5)
        }
        Preset::Electric => {
            let base = table.lookup(phase)
                + 0.35 * harmonic(table, phase, 2.0)
                + 0.15 * harmonic(table, phase, 4.0);
            state.transient *= TRANSIENT_DECAY;
            base + rng.next_bipolar() * TRANSIENT_NOISE_LEVEL * state.transient
        }
        Preset::Pad => {
            let raw = PAD_WEIGHT * harmonic(table, phase, 1.0 - PAD_DETUNE)
                + PAD_WEIGHT * harmonic(table, phase, 1.0 + PAD_DETUNE);
            state.lowpass.process(raw)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loopsynth_core::sine_table;

    #[test]
    fn test_from_index_clamps() {
        assert_eq!(Preset::from_index(-5), Preset::Sine);
        assert_eq!(Preset::from_index(0), Preset::Sine);
        assert_eq!(Preset::from_index(1), Preset::Additive);
        assert_eq!(Preset::from_index(2), Preset::Electric);
        assert_eq!(Preset::from_index(3), Preset::Pad);
        assert_eq!(Preset::from_index(99), Preset::Pad);
        assert_eq!(Preset::from(200u8), Preset::Pad);
        for p in Preset::ALL {
            assert_eq!(Preset::from_index(i32::from(p.index())), p);
        }
    }

    #[test]
    fn test_sine_matches_table() {
        let table = sine_table();
        let mut state = PresetState::default();
        let mut rng = Lcg::default();
        for i in 0..64 {
            let p = i as f32 / 64.0;
            assert_eq!(
                synthesize(Preset::Sine, p, table, &mut state, &mut rng),
                table.lookup(p)
            );
        }
        assert_eq!(rng, Lcg::default(), "sine must not consume noise");
    }

    #[test]
    fn test_additive_at_quarter_phase() {
        let table = sine_table();
        let mut state = PresetState::default();
        let mut rng = Lcg::default();
        // sin(90°) + .5 sin(180°) + .3 sin(270°) + .2 sin(135°)
        let expected = 1.0 + 0.0 - 0.3 + 0.2 * core::f32::consts::FRAC_1_SQRT_2;
        let got = synthesize(Preset::Additive, 0.25, table, &mut state, &mut rng);
        assert!((got - expected).abs() < 0.01, "got {got}, expected {expected}");
    }

    #[test]
    fn test_electric_transient_decays() {
        let table = sine_table();
        let mut state = PresetState::default();
        let mut rng = Lcg::default();
        synthesize(Preset::Electric, 0.1, table, &mut state, &mut rng);
        assert!((state.transient - TRANSIENT_DECAY).abs() < 1e-7);
        for _ in 0..10_000 {
            synthesize(Preset::Electric, 0.1, table, &mut state, &mut rng);
        }
        assert!(state.transient < 0.001);

        // With the burst gone, only the harmonic part remains.
        let base = table.lookup(0.1) + 0.35 * table.lookup(0.2) + 0.15 * table.lookup(0.4);
        let out = synthesize(Preset::Electric, 0.1, table, &mut state, &mut rng);
        assert!((out - base).abs() < 1e-3);
    }

    #[test]
    fn test_pad_is_smoothed() {
        let table = sine_table();
        let mut state = PresetState::default();
        let mut rng = Lcg::default();
        // First output is a fraction of the raw input.
        let raw = PAD_WEIGHT * table.lookup(0.25 * (1.0 - PAD_DETUNE))
            + PAD_WEIGHT * table.lookup(0.25 * (1.0 + PAD_DETUNE));
        let out = synthesize(Preset::Pad, 0.25, table, &mut state, &mut rng);
        assert!((out - PAD_LOWPASS * raw).abs() < 1e-5);

        state.reset();
        assert_eq!(state.lowpass.state(), 0.0);
        assert_eq!(state.transient, 1.0);
    }

    #[test]
    fn test_outputs_bounded() {
        let table = sine_table();
        let mut rng = Lcg::default();
        for preset in Preset::ALL {
            let mut state = PresetState::default();
            for i in 0..2048 {
                let p = i as f32 / 2048.0;
                let s = synthesize(preset, p, table, &mut state, &mut rng);
                assert!(s.is_finite() && s.abs() <= 2.2, "{preset:?} -> {s}");
            }
        }
    }
}
