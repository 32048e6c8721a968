//! Loopsynth Platform - Input layer
//!
//! Everything between the outside world and the synths: MIDI decoding,
//! controller mapping, the debounced loop button, and the [`Controller`]
//! that routes them to the live synth and the looper.
//!
//! # Core Abstractions
//!
//! - [`MidiMessage`] - Note On/Off, Control Change, Program Change
//! - [`CcMap`] / [`CcAction`] - Controller numbers and value scaling
//! - [`DebouncedButton`] / [`ButtonEvent`] - Short and long presses
//! - [`Controller`] - Routing for one control-loop pass
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature in
//! your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! loopsynth-platform = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! loop {
//!     controller.poll_button(loop_pin.is_low());
//!     while let Some(bytes) = usb_midi.read() {
//!         controller.handle_midi_bytes(bytes);
//!     }
//!     controller.tick();
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod button;
pub mod cc;
pub mod controller;
pub mod midi;

pub use button::{ButtonEvent, DEFAULT_DEBOUNCE_MS, DEFAULT_LONG_PRESS_MS, DebouncedButton};
pub use cc::{
    CC_ECHO_FEEDBACK, CC_ECHO_MIX, CC_ECHO_ON, CC_ECHO_TIME, CC_MASTER_VOLUME, CcAction, CcMap,
    cc_to_echo_ms, cc_to_feedback, cc_to_switch, cc_to_unit,
};
pub use controller::Controller;
pub use midi::MidiMessage;
