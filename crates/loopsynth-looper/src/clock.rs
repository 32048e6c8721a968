//! Millisecond time sources for the looper.
//!
//! The looper only needs "milliseconds since some fixed point" as a wrapping
//! `u32`, like a microcontroller `millis()` counter. All differences are
//! taken with wrapping subtraction, so a counter rollover (after ~49.7
//! days) does not break a running loop.

use core::cell::Cell;

/// A wrapping millisecond counter.
pub trait Clock {
    /// Current time in milliseconds.
    fn now_ms(&self) -> u32;
}

impl<F: Fn() -> u32> Clock for F {
    fn now_ms(&self) -> u32 {
        self()
    }
}

/// A clock that only moves when told to.
///
/// Used for offline rendering and tests. Share it by reference: `&ManualClock`
/// is itself a [`Clock`].
///
/// ```rust
/// use loopsynth_looper::{Clock, ManualClock};
///
/// let clock = ManualClock::new(0);
/// let handle = &clock;
/// clock.advance(250);
/// assert_eq!(handle.now_ms(), 250);
/// ```
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u32>,
}

impl ManualClock {
    /// A clock reading `start_ms`.
    pub const fn new(start_ms: u32) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    /// Jump to `ms`.
    pub fn set(&self, ms: u32) {
        self.now.set(ms);
    }

    /// Move forward by `ms`, wrapping at `u32::MAX`.
    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }
}

impl Clock for &ManualClock {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }
}

/// Wall-clock milliseconds since construction.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl SystemClock {
    /// A clock reading 0 now.
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for SystemClock {
    fn now_ms(&self) -> u32 {
        // Truncation is the wrap of a 32-bit millis counter.
        self.origin.elapsed().as_millis() as u32
    }
}
