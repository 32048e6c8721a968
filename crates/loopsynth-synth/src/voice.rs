//! A single synthesizer voice.
//!
//! A voice is a phase accumulator, an [`Envelope`], a velocity gain, and the
//! per-voice [`PresetState`]. The pool decides which voice plays which note;
//! the voice only knows how to start, release, stop, and render one sample.

use crate::envelope::{Envelope, EnvelopeStage, EnvelopeSteps};
use crate::preset::{Preset, PresetState, synthesize};
use loopsynth_core::{Lcg, SineTable};

/// One voice of a [`VoicePool`](crate::VoicePool).
///
/// # Invariants
///
/// - `phase` is in `[0, 1)` after every rendered sample
/// - `velocity_gain` is in `[0, 1]`
/// - an inactive voice has an `Off` envelope at level 0
#[derive(Debug, Clone, Copy, Default)]
pub struct Voice {
    active: bool,
    note: u8,
    age: u64,
    phase: f32,
    phase_increment: f32,
    velocity_gain: f32,
    envelope: Envelope,
    preset_state: PresetState,
}

impl Voice {
    /// An idle voice.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `note` from phase 0 with a fresh envelope.
    pub fn start(&mut self, note: u8, velocity: u8, age: u64, sample_rate: f32) {
        self.active = true;
        self.note = note;
        self.age = age;
        self.phase = 0.0;
        self.phase_increment = midi_to_freq(note) / sample_rate;
        self.velocity_gain = (f32::from(velocity) / 127.0).clamp(0.0, 1.0);
        self.envelope.trigger();
        self.preset_state.reset();
    }

    /// Enter the release stage. The voice stays audible until the envelope
    /// reaches zero.
    pub fn release(&mut self) {
        if self.active {
            self.envelope.release();
        }
    }

    /// Stop immediately, with no release tail.
    pub fn kill(&mut self) {
        self.active = false;
        self.envelope.kill();
    }

    /// Whether the voice is sounding (including its release tail).
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// MIDI note of the current or last played note.
    pub fn note(&self) -> u8 {
        self.note
    }

    /// Allocation stamp; larger is newer.
    pub fn age(&self) -> u64 {
        self.age
    }

    /// Normalized oscillator phase.
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Per-sample phase increment cached at note on.
    pub fn phase_increment(&self) -> f32 {
        self.phase_increment
    }

    /// Velocity scaled to `[0, 1]`.
    pub fn velocity_gain(&self) -> f32 {
        self.velocity_gain
    }

    /// Current envelope stage.
    pub fn stage(&self) -> EnvelopeStage {
        self.envelope.stage()
    }

    /// Current envelope level.
    pub fn level(&self) -> f32 {
        self.envelope.level()
    }

    /// Render one sample.
    ///
    /// Steps the envelope first; a voice whose release just finished goes
    /// inactive and contributes nothing. Otherwise the phase advances and
    /// the preset output is scaled by envelope level and velocity.
    #[inline]
    pub fn render(
        &mut self,
        steps: &EnvelopeSteps,
        preset: Preset,
        table: &SineTable,
        rng: &mut Lcg,
    ) -> f32 {
        if !self.active {
            return 0.0;
        }
        let level = self.envelope.advance(steps);
        if !self.envelope.is_active() {
            self.active = false;
            return 0.0;
        }

        self.phase += self.phase_increment;
        if self.phase >= 1.0 {
            self.phase -= libm::floorf(self.phase);
        }

        let raw = synthesize(preset, self.phase, table, &mut self.preset_state, rng);
        raw * level * self.velocity_gain
    }
}

/// Convert MIDI note number to frequency in Hz.
///
/// Uses standard tuning: A4 (note 69) = 440 Hz.
#[inline]
pub fn midi_to_freq(note: u8) -> f32 {
    440.0 * libm::powf(2.0, (f32::from(note) - 69.0) / 12.0)
}
