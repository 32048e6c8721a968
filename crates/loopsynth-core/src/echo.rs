//! Mono feedback echo over a fixed ring buffer.
//!
//! ```text
//! delayed   = buf[idx]
//! buf[idx]  = x + feedback * delayed
//! idx       = (idx + 1) mod len
//! out       = (1 - mix) * x + mix * delayed
//! ```
//!
//! The ring holds `CAP` samples inline; the active length `len` is derived
//! from the echo time and clamped to `[1, CAP - 1]`, so changing the time
//! never allocates. With `feedback = 0` and `mix = 1` the output is the input
//! delayed by exactly `len` samples.
//!
//! When disabled the input passes through untouched and the ring index does
//! not advance.
//!
//! The wet tap is the delayed sample alone. The Teensy firmware this engine
//! comes from mixes the fed-back sum `x + feedback * delayed` instead, which
//! keeps a copy of the dry signal in the wet path; at the same settings this
//! echo therefore sounds drier and its repeats stand out more.

use crate::math::{flush_denormal, wet_dry_mix};

/// Shortest echo time in milliseconds.
pub const MIN_ECHO_TIME_MS: f32 = 30.0;
/// Longest echo time in milliseconds.
pub const MAX_ECHO_TIME_MS: f32 = 800.0;
/// Feedback ceiling; keeps the recursion stable.
pub const MAX_ECHO_FEEDBACK: f32 = 0.85;

/// Default wet mix.
pub const DEFAULT_ECHO_MIX: f32 = 0.25;
/// Default feedback.
pub const DEFAULT_ECHO_FEEDBACK: f32 = 0.45;
/// Default echo time in milliseconds.
pub const DEFAULT_ECHO_TIME_MS: f32 = 280.0;

/// Feedback echo with a `CAP`-sample ring buffer.
///
/// # Invariants
///
/// - `1 <= len <= CAP - 1`
/// - `idx < len`
/// - `mix` in `[0, 1]`, `feedback` in `[0, 0.85]`, `time_ms` in `[30, 800]`
///
/// # Example
///
/// ```rust
/// use loopsynth_core::EchoEffect;
///
/// let mut echo: EchoEffect<2048> = EchoEffect::new(1000.0);
/// echo.set_enabled(true);
/// echo.set_mix(1.0);
/// echo.set_feedback(0.0);
/// echo.set_time_ms(30.0); // 30 samples at 1 kHz
///
/// assert_eq!(echo.process(1.0), 0.0);
/// for _ in 0..29 {
///     echo.process(0.0);
/// }
/// assert_eq!(echo.process(0.0), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct EchoEffect<const CAP: usize> {
    buffer: [f32; CAP],
    idx: usize,
    len: usize,
    enabled: bool,
    mix: f32,
    feedback: f32,
    time_ms: f32,
    sample_rate: f32,
}

impl<const CAP: usize> EchoEffect<CAP> {
    /// Create a disabled echo with default mix, feedback and time.
    pub fn new(sample_rate: f32) -> Self {
        let mut echo = Self {
            buffer: [0.0; CAP],
            idx: 0,
            len: 1,
            enabled: false,
            mix: DEFAULT_ECHO_MIX,
            feedback: DEFAULT_ECHO_FEEDBACK,
            time_ms: DEFAULT_ECHO_TIME_MS,
            sample_rate,
        };
        echo.recalculate_length();
        echo
    }

    /// Enable or bypass the echo.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Set the wet mix, clamped to `[0, 1]`.
    pub fn set_mix(&mut self, mix: f32) {
        self.mix = mix.clamp(0.0, 1.0);
    }

    /// Set the feedback, clamped to `[0, MAX_ECHO_FEEDBACK]`.
    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(0.0, MAX_ECHO_FEEDBACK);
    }

    /// Set the echo time, clamped to `[MIN_ECHO_TIME_MS, MAX_ECHO_TIME_MS]`.
    ///
    /// Recomputes the active ring length and resets the index if it now
    /// lies past the end.
    pub fn set_time_ms(&mut self, ms: f32) {
        self.time_ms = ms.clamp(MIN_ECHO_TIME_MS, MAX_ECHO_TIME_MS);
        self.recalculate_length();
    }

    /// Zero the ring buffer. Length and index are kept.
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
    }

    /// Process one sample.
    #[inline]
    pub fn process(&mut self, x: f32) -> f32 {
        if !self.enabled {
            return x;
        }
        let delayed = self.buffer[self.idx];
        self.buffer[self.idx] = flush_denormal(x + self.feedback * delayed);
        self.idx += 1;
        if self.idx >= self.len {
            self.idx = 0;
        }
        wet_dry_mix(x, delayed, self.mix)
    }

    /// Whether the echo is processing.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Wet mix.
    pub fn mix(&self) -> f32 {
        self.mix
    }

    /// Feedback amount.
    pub fn feedback(&self) -> f32 {
        self.feedback
    }

    /// Echo time in milliseconds.
    pub fn time_ms(&self) -> f32 {
        self.time_ms
    }

    /// Active ring length in samples.
    pub fn delay_length(&self) -> usize {
        self.len
    }

    /// Current ring position.
    pub fn index(&self) -> usize {
        self.idx
    }

    /// Ring capacity in samples.
    pub const fn capacity(&self) -> usize {
        CAP
    }

    fn recalculate_length(&mut self) {
        let samples = (self.time_ms * self.sample_rate / 1000.0) as usize;
        self.len = samples.clamp(1, CAP.saturating_sub(1).max(1));
        if self.idx >= self.len {
            self.idx = 0;
        }
    }
}
