//! Engine configuration for loopsynth.
//!
//! One TOML file sets the stream, the initial synth parameters, the MIDI
//! controller numbers, the loop button timing, and the bus mix. Every value
//! is checked on load; the same values set at runtime through MIDI are
//! clamped instead.
//!
//! # Example
//!
//! ```rust,no_run
//! use loopsynth_config::EngineConfig;
//! use loopsynth_synth::VoicePool;
//!
//! let config = EngineConfig::load("loopsynth.toml").unwrap();
//!
//! let mut live: VoicePool = VoicePool::new();
//! config.synth.apply(&mut live);
//! let cc_map = config.midi.cc_map();
//! let gains = config.mix.gains();
//! ```

mod engine;
mod error;

/// Range and consistency checks.
pub mod validation;

pub use engine::{
    AudioConfig, ButtonConfig, EngineConfig, MAX_STAGE_SECONDS, MidiConfig, MixConfig,
    SynthConfig,
};
pub use error::ConfigError;
pub use validation::{ValidationError, ValidationResult};
