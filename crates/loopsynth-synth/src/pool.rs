//! Polyphonic voice pool with mixer and output limiter.
//!
//! The pool owns `N` voices, the envelope shape, the preset, the master gain,
//! and the global echo. Control calls (note on/off, setters) mutate that
//! state; [`VoicePool::render_block`] reads it and produces one
//! [`AudioBlock`].
//!
//! # Allocation
//!
//! A note on takes the lowest-index inactive voice. With every voice busy,
//! the voice with the smallest age (the oldest allocation) is stolen.
//!
//! # Output stage
//!
//! ```text
//! sum(voices) * 1/sqrt(N) * master_gain -> echo -> tanh -> clamp -> i16
//! ```
//!
//! Both channels receive the same mono sample.
//!
//! # Sample rate
//!
//! Pools always run at [`SAMPLE_RATE`]. The echo ring
//! ([`MAX_ECHO_SAMPLES`]) is sized for the longest echo at that rate, so the
//! rate is a build-time constant rather than a constructor argument.

use crate::envelope::AdsrParams;
use crate::preset::Preset;
use crate::voice::Voice;
use loopsynth_core::config::{MAX_ECHO_SAMPLES, SAMPLE_RATE, VOICES};
use loopsynth_core::{
    AudioBlock, AudioRenderable, EchoEffect, Lcg, SineTable, hard_clip, sine_table, soft_clip,
    to_i16,
};

/// Default master gain.
pub const DEFAULT_MASTER_GAIN: f32 = 0.35;

/// A pool of `N` voices sharing one preset, envelope, and echo.
///
/// # Example
///
/// ```rust
/// use loopsynth_core::AudioBlock;
/// use loopsynth_synth::{Preset, VoicePool};
///
/// let mut pool: VoicePool = VoicePool::new();
/// pool.set_preset(Preset::Electric);
/// pool.note_on(60, 100);
/// pool.note_on(64, 100);
///
/// let mut block = AudioBlock::silent();
/// pool.render_block(&mut block);
/// assert_eq!(pool.active_voice_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct VoicePool<const N: usize = VOICES> {
    voices: [Voice; N],
    age_counter: u64,
    preset: Preset,
    master_gain: f32,
    envelope: AdsrParams,
    echo: EchoEffect<MAX_ECHO_SAMPLES>,
    rng: Lcg,
    table: &'static SineTable,
    voice_norm: f32,
}

impl Default for VoicePool {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> VoicePool<N> {
    /// Create an idle pool with default parameters.
    pub fn new() -> Self {
        Self {
            voices: [Voice::new(); N],
            age_counter: 0,
            preset: Preset::Sine,
            master_gain: DEFAULT_MASTER_GAIN,
            envelope: AdsrParams::default(),
            echo: EchoEffect::new(SAMPLE_RATE),
            rng: Lcg::default(),
            table: sine_table(),
            voice_norm: 1.0 / libm::sqrtf(N.max(1) as f32),
        }
    }

    /// Start a note on a free voice, stealing the oldest if none is free.
    ///
    /// Note and velocity are clamped to `0..=127`.
    pub fn note_on(&mut self, note: u8, velocity: u8) {
        let Some(idx) = self.allocate_voice() else {
            return;
        };
        self.age_counter += 1;
        self.voices[idx].start(note.min(127), velocity.min(127), self.age_counter, SAMPLE_RATE);
    }

    /// Release every active voice playing `note`.
    pub fn note_off(&mut self, note: u8) {
        for voice in &mut self.voices {
            if voice.is_active() && voice.note() == note {
                voice.release();
            }
        }
    }

    /// Stop every voice immediately, with no release tail.
    pub fn all_notes_off(&mut self) {
        for voice in &mut self.voices {
            voice.kill();
        }
    }

    /// Select the waveform preset.
    pub fn set_preset(&mut self, preset: Preset) {
        self.preset = preset;
    }

    /// Select the waveform preset by index; out-of-range indices clamp to `0..=3`.
    pub fn set_preset_index(&mut self, index: i32) {
        self.preset = Preset::from_index(index);
    }

    /// Set the master gain, clamped to `[0, 1]`.
    pub fn set_master_gain(&mut self, gain: f32) {
        self.master_gain = gain.clamp(0.0, 1.0);
    }

    /// Enable or bypass the echo.
    pub fn set_echo_on(&mut self, on: bool) {
        self.echo.set_enabled(on);
    }

    /// Set the echo wet mix, clamped to `[0, 1]`.
    pub fn set_echo_mix(&mut self, mix: f32) {
        self.echo.set_mix(mix);
    }

    /// Set the echo feedback, clamped to `[0, 0.85]`.
    pub fn set_echo_feedback(&mut self, feedback: f32) {
        self.echo.set_feedback(feedback);
    }

    /// Set the echo time, clamped to `[30, 800]` ms.
    pub fn set_echo_time_ms(&mut self, ms: f32) {
        self.echo.set_time_ms(ms);
    }

    /// Replace the envelope shape. Times clamp to `>= 0`, sustain to `[0, 1]`.
    ///
    /// Sounding voices pick up the new shape at the next block.
    pub fn set_envelope(&mut self, params: AdsrParams) {
        self.envelope = params.sanitized();
    }

    /// Zero the echo ring, dropping any pending repeats.
    pub fn clear_echo(&mut self) {
        self.echo.clear();
    }

    /// Current preset.
    pub fn preset(&self) -> Preset {
        self.preset
    }

    /// Current master gain.
    pub fn master_gain(&self) -> f32 {
        self.master_gain
    }

    /// Current envelope shape.
    pub fn envelope(&self) -> AdsrParams {
        self.envelope
    }

    /// The echo stage, for reading its parameters.
    pub fn echo(&self) -> &EchoEffect<MAX_ECHO_SAMPLES> {
        &self.echo
    }

    /// Read access to the voices.
    pub fn voices(&self) -> &[Voice; N] {
        &self.voices
    }

    /// Number of voices in the pool.
    pub const fn voice_count(&self) -> usize {
        N
    }

    /// Number of sounding voices, including release tails.
    pub fn active_voice_count(&self) -> usize {
        self.voices.iter().filter(|v| v.is_active()).count()
    }

    /// Fill `block` with the next `BLOCK_SIZE` frames.
    pub fn render_block(&mut self, block: &mut AudioBlock) {
        let steps = self.envelope.steps(SAMPLE_RATE);
        let gain = self.voice_norm * self.master_gain;

        for i in 0..AudioBlock::FRAMES {
            let mut mix = 0.0;
            for voice in &mut self.voices {
                mix += voice.render(&steps, self.preset, self.table, &mut self.rng);
            }
            let x = self.echo.process(mix * gain);
            block.set_mono(i, to_i16(hard_clip(soft_clip(x), 1.0)));
        }
    }

    fn allocate_voice(&self) -> Option<usize> {
        if let Some(free) = self.voices.iter().position(|v| !v.is_active()) {
            return Some(free);
        }
        let stolen = self
            .voices
            .iter()
            .enumerate()
            .min_by_key(|(_, v)| v.age())
            .map(|(i, _)| i);
        #[cfg(feature = "tracing")]
        if let Some(i) = stolen {
            tracing::trace!(voice = i, note = self.voices[i].note(), "voice stolen");
        }
        stolen
    }
}

impl<const N: usize> AudioRenderable for VoicePool<N> {
    fn render_block(&mut self, block: &mut AudioBlock) {
        VoicePool::render_block(self, block);
    }
}
