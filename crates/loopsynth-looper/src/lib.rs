//! Loopsynth Looper - MIDI event looper
//!
//! Records note events played on the keyboard, closes the loop on the next
//! button press, and replays the events against its own synth so the loop
//! and the live keyboard never share voices.
//!
//! # Core Components
//!
//! - [`Looper`] / [`LooperState`] - One-button state machine and playback
//! - [`LoopEvent`] / [`LoopEventKind`] - Timestamped note events
//! - [`EventLog`] - Fixed-capacity append-only event store
//! - [`Clock`] - Wrapping millisecond counter ([`ManualClock`] for offline
//!   use, `SystemClock` with `std`, any `Fn() -> u32` on embedded targets)
//!
//! # Example
//!
//! ```rust
//! use loopsynth_looper::{Looper, ManualClock};
//! use loopsynth_synth::{Preset, VoicePool};
//!
//! let clock = ManualClock::new(0);
//! let mut looper: Looper<VoicePool, &ManualClock> =
//!     Looper::new(VoicePool::new(), &clock);
//!
//! looper.set_live_preset(Preset::Electric);
//! looper.on_short_press();
//! looper.record_note_on(48, 110);
//! clock.advance(250);
//! looper.record_note_off(48);
//! clock.advance(750);
//! looper.on_short_press();
//!
//! // Call once per control-loop iteration.
//! looper.tick();
//! assert_eq!(looper.synth().preset(), Preset::Electric);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod clock;
pub mod event;
pub mod log;
pub mod looper;

#[cfg(feature = "std")]
pub use clock::SystemClock;
pub use clock::{Clock, ManualClock};
pub use event::{LoopEvent, LoopEventKind};
pub use log::EventLog;
pub use looper::{Looper, LooperState};
