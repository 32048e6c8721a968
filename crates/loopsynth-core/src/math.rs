//! Mathematical utility functions for the output stage.
//!
//! All functions are allocation-free and suitable for `no_std`.
//!
//! # Output Limiting
//!
//! The mixer runs every sample through two limiters in sequence:
//!
//! | Function | Character | Purpose |
//! |----------|-----------|---------|
//! | [`soft_clip`] | Smooth tanh saturation | Tame chord peaks musically |
//! | [`hard_clip`] | Flat clamp | Guarantee the quantizer never overflows |
//!
//! [`to_i16`] then maps `[-1, 1]` onto the signed 16-bit output range.

use libm::tanhf;

/// Soft clip using hyperbolic tangent.
///
/// Smooth saturation that approaches ±1 asymptotically.
#[inline]
pub fn soft_clip(x: f32) -> f32 {
    tanhf(x)
}

/// Hard clip to ±threshold range.
#[inline]
pub fn hard_clip(x: f32, threshold: f32) -> f32 {
    x.clamp(-threshold, threshold)
}

/// Quantize a sample in `[-1, 1]` to signed 16-bit full scale.
///
/// Scales by 32767 and truncates toward zero. Inputs outside `[-1, 1]`
/// saturate at the integer range.
#[inline]
pub fn to_i16(x: f32) -> i16 {
    (x * f32::from(i16::MAX)) as i16
}

/// Flush denormal (subnormal) float values to zero.
///
/// Used in recursive state (filter memory, delay feedback) that can decay
/// indefinitely toward zero.
#[allow(clippy::inline_always)]
#[inline(always)]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

/// Crossfade between dry and wet signals: `dry * (1 - mix) + wet * mix`.
#[inline]
pub fn wet_dry_mix(dry: f32, wet: f32, mix: f32) -> f32 {
    (1.0 - mix) * dry + mix * wet
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soft_clip_bounds() {
        assert!(soft_clip(3.0) < 1.0);
        assert!(soft_clip(3.0) > 0.99);
        assert!(soft_clip(-3.0) > -1.0);
        assert!(soft_clip(-3.0) < -0.99);
        assert_eq!(soft_clip(0.0), 0.0);
    }

    #[test]
    fn test_hard_clip() {
        assert_eq!(hard_clip(1.5, 1.0), 1.0);
        assert_eq!(hard_clip(-1.5, 1.0), -1.0);
        assert_eq!(hard_clip(0.25, 1.0), 0.25);
    }

    #[test]
    fn test_to_i16_full_scale() {
        assert_eq!(to_i16(1.0), 32767);
        assert_eq!(to_i16(-1.0), -32767);
        assert_eq!(to_i16(0.0), 0);
        // Truncation toward zero
        assert_eq!(to_i16(0.5), 16383);
        // Out-of-range input saturates instead of wrapping
        assert_eq!(to_i16(4.0), i16::MAX);
        assert_eq!(to_i16(-4.0), i16::MIN);
    }

    #[test]
    fn test_wet_dry_mix() {
        assert_eq!(wet_dry_mix(1.0, 0.5, 0.0), 1.0);
        assert_eq!(wet_dry_mix(1.0, 0.5, 1.0), 0.5);
        assert!((wet_dry_mix(0.0, 1.0, 0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_flush_denormal() {
        assert_eq!(flush_denormal(1.0), 1.0);
        assert_eq!(flush_denormal(-0.5), -0.5);
        assert_eq!(flush_denormal(1e-10), 1e-10);
        assert_eq!(flush_denormal(1e-21), 0.0);
        assert_eq!(flush_denormal(-1e-38), 0.0);
    }
}
