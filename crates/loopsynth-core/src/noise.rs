//! Deterministic pseudo-random noise.
//!
//! A 32-bit linear congruential generator:
//!
//! ```text
//! state = 1664525 * state + 1013904223   (mod 2^32)
//! u     = (state >> 8) / 2^24            in [0, 1)
//! ```
//!
//! Only the top 24 bits are used; the low bits of an LCG have short periods.
//! Each owner keeps its own state, so two generators started from the same
//! seed produce identical sequences.

/// Seed used by [`Lcg::default`].
pub const DEFAULT_SEED: u32 = 0x1234_5678;

/// 32-bit linear congruential generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    /// Create a generator from an explicit seed.
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advance and return the raw 32-bit state.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        self.state
    }

    /// Uniform sample in `[0, 1)`.
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / 16_777_216.0
    }

    /// Uniform sample in `[-1, 1)`.
    #[inline]
    pub fn next_bipolar(&mut self) -> f32 {
        self.next_f32() * 2.0 - 1.0
    }
}

impl Default for Lcg {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_step_from_default_seed() {
        let mut rng = Lcg::default();
        let expected = 0x1234_5678u32
            .wrapping_mul(1_664_525)
            .wrapping_add(1_013_904_223);
        assert_eq!(rng.next_u32(), expected);
    }

    #[test]
    fn test_unit_range() {
        let mut rng = Lcg::new(1);
        for _ in 0..10_000 {
            let u = rng.next_f32();
            assert!((0.0..1.0).contains(&u), "out of range: {u}");
            let b = rng.next_bipolar();
            assert!((-1.0..1.0).contains(&b), "out of range: {b}");
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Lcg::new(42);
        let mut b = Lcg::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn test_mean_is_centered() {
        let mut rng = Lcg::default();
        let n = 20_000;
        let sum: f32 = (0..n).map(|_| rng.next_bipolar()).sum();
        let mean = sum / n as f32;
        assert!(mean.abs() < 0.05, "mean = {mean}");
    }
}
