//! Control Change mapping.
//!
//! Five controllers drive the synth parameters. Values are mapped linearly
//! from 0..=127:
//!
//! | Target | Default CC | Mapping |
//! |--------|------------|---------|
//! | Master volume | 7 | `v / 127` |
//! | Echo on | 80 | `v >= 64` |
//! | Echo mix | 91 | `v / 127` |
//! | Echo feedback | 93 | `0.85 * v / 127` |
//! | Echo time | 94 | `30 + 770 * v / 127` ms |

use loopsynth_core::{MAX_ECHO_FEEDBACK, MAX_ECHO_TIME_MS, MIN_ECHO_TIME_MS};
use loopsynth_synth::SynthControl;

/// Default master volume controller.
pub const CC_MASTER_VOLUME: u8 = 7;
/// Default echo switch controller.
pub const CC_ECHO_ON: u8 = 80;
/// Default echo mix controller.
pub const CC_ECHO_MIX: u8 = 91;
/// Default echo feedback controller.
pub const CC_ECHO_FEEDBACK: u8 = 93;
/// Default echo time controller.
pub const CC_ECHO_TIME: u8 = 94;

/// `v / 127`.
#[inline]
pub fn cc_to_unit(value: u8) -> f32 {
    f32::from(value.min(127)) / 127.0
}

/// `v >= 64`.
#[inline]
pub fn cc_to_switch(value: u8) -> bool {
    value >= 64
}

/// `0.85 * v / 127`.
#[inline]
pub fn cc_to_feedback(value: u8) -> f32 {
    MAX_ECHO_FEEDBACK * cc_to_unit(value)
}

/// `30 + 770 * v / 127` milliseconds.
#[inline]
pub fn cc_to_echo_ms(value: u8) -> f32 {
    MIN_ECHO_TIME_MS + (MAX_ECHO_TIME_MS - MIN_ECHO_TIME_MS) * cc_to_unit(value)
}

/// A decoded parameter change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CcAction {
    /// Master gain, 0-1.
    MasterGain(f32),
    /// Echo enabled.
    EchoOn(bool),
    /// Echo wet mix, 0-1.
    EchoMix(f32),
    /// Echo feedback, 0-0.85.
    EchoFeedback(f32),
    /// Echo time, 30-800 ms.
    EchoTimeMs(f32),
}

impl CcAction {
    /// Apply to a synth.
    pub fn apply<S: SynthControl + ?Sized>(self, synth: &mut S) {
        match self {
            Self::MasterGain(g) => synth.set_master_gain(g),
            Self::EchoOn(on) => synth.set_echo_on(on),
            Self::EchoMix(m) => synth.set_echo_mix(m),
            Self::EchoFeedback(fb) => synth.set_echo_feedback(fb),
            Self::EchoTimeMs(ms) => synth.set_echo_time_ms(ms),
        }
    }
}

/// Controller numbers for the five synth parameters.
///
/// # Example
///
/// ```rust
/// use loopsynth_platform::{CcAction, CcMap};
///
/// let map = CcMap::default();
/// assert_eq!(map.resolve(94, 127), Some(CcAction::EchoTimeMs(800.0)));
/// assert_eq!(map.resolve(1, 64), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CcMap {
    /// Master volume controller.
    pub master_volume: u8,
    /// Echo switch controller.
    pub echo_on: u8,
    /// Echo mix controller.
    pub echo_mix: u8,
    /// Echo feedback controller.
    pub echo_feedback: u8,
    /// Echo time controller.
    pub echo_time: u8,
}

impl Default for CcMap {
    fn default() -> Self {
        Self {
            master_volume: CC_MASTER_VOLUME,
            echo_on: CC_ECHO_ON,
            echo_mix: CC_ECHO_MIX,
            echo_feedback: CC_ECHO_FEEDBACK,
            echo_time: CC_ECHO_TIME,
        }
    }
}

impl CcMap {
    /// Map a controller and value to a parameter change.
    ///
    /// Unassigned controllers yield `None`. If one controller number is
    /// assigned twice, the first match in table order wins.
    pub fn resolve(&self, controller: u8, value: u8) -> Option<CcAction> {
        if controller == self.master_volume {
            Some(CcAction::MasterGain(cc_to_unit(value)))
        } else if controller == self.echo_on {
            Some(CcAction::EchoOn(cc_to_switch(value)))
        } else if controller == self.echo_mix {
            Some(CcAction::EchoMix(cc_to_unit(value)))
        } else if controller == self.echo_feedback {
            Some(CcAction::EchoFeedback(cc_to_feedback(value)))
        } else if controller == self.echo_time {
            Some(CcAction::EchoTimeMs(cc_to_echo_ms(value)))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaling_endpoints() {
        assert_eq!(cc_to_unit(0), 0.0);
        assert_eq!(cc_to_unit(127), 1.0);
        assert_eq!(cc_to_unit(200), 1.0);
        assert_eq!(cc_to_feedback(127), 0.85);
        assert_eq!(cc_to_echo_ms(0), 30.0);
        assert_eq!(cc_to_echo_ms(127), 800.0);
        assert!(!cc_to_switch(63));
        assert!(cc_to_switch(64));
    }

    #[test]
    fn test_default_map() {
        let map = CcMap::default();
        assert_eq!(map.resolve(7, 127), Some(CcAction::MasterGain(1.0)));
        assert_eq!(map.resolve(80, 0), Some(CcAction::EchoOn(false)));
        assert_eq!(map.resolve(91, 0), Some(CcAction::EchoMix(0.0)));
        assert_eq!(map.resolve(93, 0), Some(CcAction::EchoFeedback(0.0)));
        assert_eq!(map.resolve(94, 0), Some(CcAction::EchoTimeMs(30.0)));
        assert_eq!(map.resolve(74, 10), None);
    }

    #[test]
    fn test_custom_map() {
        let map = CcMap {
            echo_time: 21,
            ..CcMap::default()
        };
        assert_eq!(map.resolve(94, 64), None);
        assert!(matches!(map.resolve(21, 64), Some(CcAction::EchoTimeMs(_))));
    }
}
