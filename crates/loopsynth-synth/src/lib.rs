//! Loopsynth Synth - Polyphonic voice engine
//!
//! This crate provides the synthesizer that both the live keyboard and the
//! looper play: a fixed pool of wavetable voices with linear ADSR envelopes,
//! four waveform presets, oldest-first voice stealing, a global echo, and a
//! soft-clipping 16-bit output stage.
//!
//! # Core Components
//!
//! ## Envelopes
//!
//! - [`AdsrParams`] - Pool-wide envelope shape (seconds + sustain level)
//! - [`Envelope`] / [`EnvelopeStage`] - Per-voice linear envelope state
//!
//! ## Voices
//!
//! - [`Voice`] - Phase accumulator, envelope, velocity, preset state
//! - [`Preset`] - Sine, additive, electric, pad waveforms
//! - [`midi_to_freq`] - Equal-tempered note to Hz
//!
//! ## Voice Pools
//!
//! - [`VoicePool`] - Allocation/stealing, parameters, mixer and limiter
//! - [`SharedVoicePool`] - The pool behind a critical section, for sharing
//!   between an interrupt-driven render and control code
//! - [`voice_channel`] (`std`) - Lock-free command ring between a control
//!   thread ([`SynthSender`]) and an audio thread ([`PoolRenderer`])
//! - [`SynthCommand`] - One control call as a value
//! - [`SynthControl`] - Note and parameter control, implemented by owned,
//!   borrowed, and shared pools
//!
//! # Example
//!
//! ```rust
//! use loopsynth_core::AudioBlock;
//! use loopsynth_synth::{AdsrParams, Preset, VoicePool};
//!
//! let mut synth: VoicePool = VoicePool::new();
//! synth.set_preset(Preset::Additive);
//! synth.set_envelope(AdsrParams { attack_s: 0.005, ..AdsrParams::default() });
//! synth.set_echo_on(true);
//!
//! synth.note_on(60, 100);
//! synth.note_on(64, 90);
//! synth.note_on(67, 80);
//!
//! let mut block = AudioBlock::silent();
//! for _ in 0..10 {
//!     synth.render_block(&mut block);
//! }
//! synth.note_off(60);
//! ```
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature and
//! provide a `critical-section` implementation for the target:
//!
//! ```toml
//! [dependencies]
//! loopsynth-synth = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
pub mod channel;
pub mod command;
pub mod control;
pub mod envelope;
pub mod pool;
pub mod preset;
pub mod shared;
pub mod voice;

#[cfg(feature = "std")]
pub use channel::{DEFAULT_COMMAND_CAPACITY, PoolRenderer, SynthSender, voice_channel};
pub use command::SynthCommand;
pub use control::SynthControl;
pub use envelope::{AdsrParams, Envelope, EnvelopeStage, EnvelopeSteps, INSTANT_STAGE_S};
pub use pool::{DEFAULT_MASTER_GAIN, VoicePool};
pub use preset::{Preset, PresetState, synthesize};
pub use shared::SharedVoicePool;
pub use voice::{Voice, midi_to_freq};
