//! Build-time configuration constants.
//!
//! These values size every fixed buffer in the engine. They are not
//! runtime-tunable: changing them means rebuilding the firmware/binary.

/// Polyphony of one voice pool.
pub const VOICES: usize = 8;

/// Capacity of the looper event log.
pub const MAX_LOOP_EVENTS: usize = 2048;

/// Capacity of the echo ring buffer in samples (~0.816 s at 44.1 kHz).
pub const MAX_ECHO_SAMPLES: usize = 36_000;

/// Entries in the sine wavetable. Must be a power of two.
pub const SINE_TABLE_SIZE: usize = 2048;

/// Output sample rate in Hz.
pub const SAMPLE_RATE: f32 = 44_100.0;

/// Frames per rendered block.
pub const BLOCK_SIZE: usize = 128;

/// Output channel count. Both channels carry the same mono signal.
pub const CHANNELS: usize = 2;

const _: () = assert!(SINE_TABLE_SIZE.is_power_of_two());
const _: () = assert!(MAX_ECHO_SAMPLES > 1);
