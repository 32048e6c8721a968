//! The control surface of a synth.
//!
//! [`SynthControl`] is what MIDI routing and the looper drive. It is
//! implemented for an owned [`VoicePool`], for a shared handle
//! (`&SharedVoicePool`), for the sending half of a
//! [`voice_channel`](crate::voice_channel) with `std`, and for any `&mut T`
//! of an implementor, so the looper can own its synth or borrow it.

use crate::pool::VoicePool;
use crate::preset::Preset;
use crate::shared::SharedVoicePool;

/// Note and parameter control of a voice pool.
///
/// Values outside their documented ranges are clamped, never rejected.
pub trait SynthControl {
    /// Start `note` (0-127) at `velocity` (0-127).
    fn note_on(&mut self, note: u8, velocity: u8);

    /// Release every voice playing `note`.
    fn note_off(&mut self, note: u8);

    /// Silence every voice immediately.
    fn all_notes_off(&mut self);

    /// Select the waveform preset.
    fn set_preset(&mut self, preset: Preset);

    /// Master gain (0.0 to 1.0).
    fn set_master_gain(&mut self, gain: f32);

    /// Enable or bypass the echo.
    fn set_echo_on(&mut self, on: bool);

    /// Echo wet mix (0.0 to 1.0).
    fn set_echo_mix(&mut self, mix: f32);

    /// Echo feedback (0.0 to 0.85).
    fn set_echo_feedback(&mut self, feedback: f32);

    /// Echo time in milliseconds (30 to 800).
    fn set_echo_time_ms(&mut self, ms: f32);
}

impl<const N: usize> SynthControl for VoicePool<N> {
    fn note_on(&mut self, note: u8, velocity: u8) {
        VoicePool::note_on(self, note, velocity);
    }

    fn note_off(&mut self, note: u8) {
        VoicePool::note_off(self, note);
    }

    fn all_notes_off(&mut self) {
        VoicePool::all_notes_off(self);
    }

    fn set_preset(&mut self, preset: Preset) {
        VoicePool::set_preset(self, preset);
    }

    fn set_master_gain(&mut self, gain: f32) {
        VoicePool::set_master_gain(self, gain);
    }

    fn set_echo_on(&mut self, on: bool) {
        VoicePool::set_echo_on(self, on);
    }

    fn set_echo_mix(&mut self, mix: f32) {
        VoicePool::set_echo_mix(self, mix);
    }

    fn set_echo_feedback(&mut self, feedback: f32) {
        VoicePool::set_echo_feedback(self, feedback);
    }

    fn set_echo_time_ms(&mut self, ms: f32) {
        VoicePool::set_echo_time_ms(self, ms);
    }
}

impl<const N: usize> SynthControl for &SharedVoicePool<N> {
    fn note_on(&mut self, note: u8, velocity: u8) {
        self.with(|pool| pool.note_on(note, velocity));
    }

    fn note_off(&mut self, note: u8) {
        self.with(|pool| pool.note_off(note));
    }

    fn all_notes_off(&mut self) {
        self.with(VoicePool::all_notes_off);
    }

    fn set_preset(&mut self, preset: Preset) {
        self.with(|pool| pool.set_preset(preset));
    }

    fn set_master_gain(&mut self, gain: f32) {
        self.with(|pool| pool.set_master_gain(gain));
    }

    fn set_echo_on(&mut self, on: bool) {
        self.with(|pool| pool.set_echo_on(on));
    }

    fn set_echo_mix(&mut self, mix: f32) {
        self.with(|pool| pool.set_echo_mix(mix));
    }

    fn set_echo_feedback(&mut self, feedback: f32) {
        self.with(|pool| pool.set_echo_feedback(feedback));
    }

    fn set_echo_time_ms(&mut self, ms: f32) {
        self.with(|pool| pool.set_echo_time_ms(ms));
    }
}

impl<T: SynthControl + ?Sized> SynthControl for &mut T {
    fn note_on(&mut self, note: u8, velocity: u8) {
        (**self).note_on(note, velocity);
    }

    fn note_off(&mut self, note: u8) {
        (**self).note_off(note);
    }

    fn all_notes_off(&mut self) {
        (**self).all_notes_off();
    }

    fn set_preset(&mut self, preset: Preset) {
        (**self).set_preset(preset);
    }

    fn set_master_gain(&mut self, gain: f32) {
        (**self).set_master_gain(gain);
    }

    fn set_echo_on(&mut self, on: bool) {
        (**self).set_echo_on(on);
    }

    fn set_echo_mix(&mut self, mix: f32) {
        (**self).set_echo_mix(mix);
    }

    fn set_echo_feedback(&mut self, feedback: f32) {
        (**self).set_echo_feedback(feedback);
    }

    fn set_echo_time_ms(&mut self, ms: f32) {
        (**self).set_echo_time_ms(ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drive<S: SynthControl>(mut synth: S) {
        synth.set_preset(Preset::Pad);
        synth.set_master_gain(2.0);
        synth.set_echo_on(true);
        synth.set_echo_mix(0.5);
        synth.set_echo_feedback(1.0);
        synth.set_echo_time_ms(10.0);
        synth.note_on(60, 100);
        synth.note_on(67, 100);
        synth.note_off(60);
    }

    #[test]
    fn test_owned_and_borrowed_pool() {
        let mut pool: VoicePool = VoicePool::new();
        drive(&mut pool);
        assert_eq!(pool.preset(), Preset::Pad);
        assert_eq!(pool.master_gain(), 1.0);
        assert!(pool.echo().is_enabled());
        assert_eq!(pool.echo().feedback(), 0.85);
        assert_eq!(pool.echo().time_ms(), 30.0);
        assert_eq!(pool.active_voice_count(), 2);

        SynthControl::all_notes_off(&mut pool);
        assert_eq!(pool.active_voice_count(), 0);
    }

    #[test]
    fn test_shared_handles() {
        let shared: SharedVoicePool = SharedVoicePool::new(VoicePool::new());
        drive(&shared);
        assert_eq!(shared.with(|p| p.preset()), Preset::Pad);

        let mut handle = &shared;
        handle.all_notes_off();
        assert_eq!(shared.with(|p| p.active_voice_count()), 0);
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_channel_sender() {
        let (mut sender, mut renderer) = crate::voice_channel(VoicePool::<8>::new(), 32);
        drive(&mut sender);
        assert_eq!(renderer.apply_pending(), 9);

        let pool = renderer.pool();
        assert_eq!(pool.preset(), Preset::Pad);
        assert_eq!(pool.echo().feedback(), 0.85);
        assert_eq!(pool.active_voice_count(), 2);
    }
}
