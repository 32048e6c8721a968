//! One-pole lowpass smoother.
//!
//! ```text
//! z[n] = z[n-1] + a * (x[n] - z[n-1])
//! ```
//!
//! `a` in `(0, 1]` sets the cutoff directly: `a = 1` passes the input, small
//! `a` smooths heavily. The pad voice uses a fixed `a` rather than a cutoff
//! in Hz, so the coefficient is the only parameter.
//!
//! ```rust
//! use loopsynth_core::OnePole;
//!
//! let mut lp = OnePole::from_coefficient(0.12);
//! let first = lp.process(1.0);
//! assert!((first - 0.12).abs() < 1e-6);
//! ```

use crate::flush_denormal;

/// One-pole (6 dB/oct) lowpass filter with a direct coefficient.
///
/// # Invariants
///
/// - `coeff` is clamped to `[0, 1]`
/// - `state` is flushed to zero when below 1e-20
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OnePole {
    state: f32,
    coeff: f32,
}

impl OnePole {
    /// Create a filter with smoothing coefficient `a`.
    pub fn from_coefficient(a: f32) -> Self {
        Self {
            state: 0.0,
            coeff: a.clamp(0.0, 1.0),
        }
    }

    /// Smoothing coefficient.
    pub fn coefficient(&self) -> f32 {
        self.coeff
    }

    /// Current filter memory.
    pub fn state(&self) -> f32 {
        self.state
    }

    /// Process one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.state = flush_denormal(self.state + self.coeff * (input - self.state));
        self.state
    }

    /// Reset filter memory to zero.
    pub fn reset(&mut self) {
        self.state = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_dc() {
        let mut lp = OnePole::from_coefficient(0.12);
        let mut out = 0.0;
        for _ in 0..2000 {
            out = lp.process(1.0);
        }
        assert!((out - 1.0).abs() < 1e-4, "DC should pass through, got {out}");
    }

    #[test]
    fn attenuates_alternating_input() {
        let mut lp = OnePole::from_coefficient(0.12);
        let mut sum = 0.0f32;
        for i in 0..4800 {
            let input = if i % 2 == 0 { 1.0 } else { -1.0 };
            sum += lp.process(input).abs();
        }
        let avg = sum / 4800.0;
        assert!(avg < 0.1, "Nyquist signal should be attenuated, avg = {avg}");
    }

    #[test]
    fn coefficient_is_clamped() {
        assert_eq!(OnePole::from_coefficient(2.0).coefficient(), 1.0);
        assert_eq!(OnePole::from_coefficient(-1.0).coefficient(), 0.0);
    }

    #[test]
    fn reset_clears_state() {
        let mut lp = OnePole::from_coefficient(0.5);
        lp.process(1.0);
        lp.process(1.0);
        lp.reset();
        assert_eq!(lp.state(), 0.0);
        assert_eq!(lp.process(0.0), 0.0);
    }
}
