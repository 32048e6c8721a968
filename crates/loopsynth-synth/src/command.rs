//! Synth control captured as values.

use crate::control::SynthControl;
use crate::preset::Preset;

/// One [`SynthControl`] call, to be applied later.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SynthCommand {
    /// [`SynthControl::note_on`]
    NoteOn {
        /// Note number.
        note: u8,
        /// Velocity.
        velocity: u8,
    },
    /// [`SynthControl::note_off`]
    NoteOff {
        /// Note number.
        note: u8,
    },
    /// [`SynthControl::all_notes_off`]
    AllNotesOff,
    /// [`SynthControl::set_preset`]
    SetPreset(Preset),
    /// [`SynthControl::set_master_gain`]
    SetMasterGain(f32),
    /// [`SynthControl::set_echo_on`]
    SetEchoOn(bool),
    /// [`SynthControl::set_echo_mix`]
    SetEchoMix(f32),
    /// [`SynthControl::set_echo_feedback`]
    SetEchoFeedback(f32),
    /// [`SynthControl::set_echo_time_ms`]
    SetEchoTimeMs(f32),
}

impl SynthCommand {
    /// Perform the call on `synth`.
    pub fn apply<S: SynthControl + ?Sized>(self, synth: &mut S) {
        match self {
            Self::NoteOn { note, velocity } => synth.note_on(note, velocity),
            Self::NoteOff { note } => synth.note_off(note),
            Self::AllNotesOff => synth.all_notes_off(),
            Self::SetPreset(preset) => synth.set_preset(preset),
            Self::SetMasterGain(gain) => synth.set_master_gain(gain),
            Self::SetEchoOn(on) => synth.set_echo_on(on),
            Self::SetEchoMix(mix) => synth.set_echo_mix(mix),
            Self::SetEchoFeedback(feedback) => synth.set_echo_feedback(feedback),
            Self::SetEchoTimeMs(ms) => synth.set_echo_time_ms(ms),
        }
    }
}
