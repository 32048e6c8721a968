//! Loopsynth Core - DSP primitives for the loopsynth engine
//!
//! This crate provides the foundational building blocks shared by the synth
//! voice engine and the looper, designed for real-time rendering with zero
//! allocation in the audio path.
//!
//! # Core Abstractions
//!
//! ## Rendering
//!
//! - [`AudioBlock`] - One fixed-size block of stereo 16-bit output
//! - [`AudioRenderable`] - Capability: produce one block per render period
//! - [`BlockSink`] - Downstream consumer that may refuse a block
//! - [`render_period`] - Render into a sink, skipping the period when no buffer is free
//!
//! ## Oscillator Support
//!
//! - [`SineTable`] / [`sine_table`] - Process-wide sine wavetable, built once
//! - [`Lcg`] - Deterministic linear-congruential noise source
//!
//! ## Filters & Effects
//!
//! - [`OnePole`] - One-pole low-pass (`z += a·(x - z)`)
//! - [`EchoEffect`] - Mono feedback delay over a fixed ring buffer
//!
//! ## Utilities
//!
//! - Math functions: [`soft_clip`], [`hard_clip`], [`to_i16`], [`wet_dry_mix`]
//! - Build-time constants in [`config`]
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible for embedded audio applications.
//! Disable the default `std` feature in your `Cargo.toml` and provide a
//! `critical-section` implementation for the target (for example cortex-m's
//! `critical-section-single-core`):
//!
//! ```toml
//! [dependencies]
//! loopsynth-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use loopsynth_core::{EchoEffect, sine_table, soft_clip, to_i16};
//!
//! let table = sine_table();
//! let mut echo: EchoEffect<4096> = EchoEffect::new(44100.0);
//! echo.set_enabled(true);
//!
//! let mut phase = 0.0;
//! for _ in 0..64 {
//!     phase = (phase + 0.01) % 1.0;
//!     let x = echo.process(table.lookup(phase) * 0.5);
//!     let _pcm = to_i16(soft_clip(x));
//! }
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: No allocations in audio processing paths
//! - **No dependencies on std**: Pure `no_std` with `libm` for math
//! - **Fixed capacity**: Every buffer is a const-sized array owned by its component

#![cfg_attr(not(feature = "std"), no_std)]

pub mod block;
pub mod config;
pub mod echo;
pub mod math;
pub mod noise;
pub mod one_pole;
pub mod wavetable;

// Re-export main types at crate root
pub use block::{
    AudioBlock, AudioRenderable, BlockSink, BusMix, MixGains, mix_blocks, render_period,
};
pub use echo::{
    DEFAULT_ECHO_FEEDBACK, DEFAULT_ECHO_MIX, DEFAULT_ECHO_TIME_MS, EchoEffect, MAX_ECHO_FEEDBACK,
    MAX_ECHO_TIME_MS, MIN_ECHO_TIME_MS,
};
pub use math::{flush_denormal, hard_clip, soft_clip, to_i16, wet_dry_mix};
pub use noise::Lcg;
pub use one_pole::OnePole;
pub use wavetable::{SineTable, sine_table};
