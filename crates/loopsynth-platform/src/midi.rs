//! Channel voice message decoding.
//!
//! Only the four message types the instrument reacts to are decoded. The
//! channel is kept but never used for routing: every channel plays.

/// Status nibble of a Note Off message.
pub const NOTE_OFF: u8 = 0x80;
/// Status nibble of a Note On message.
pub const NOTE_ON: u8 = 0x90;
/// Status nibble of a Control Change message.
pub const CONTROL_CHANGE: u8 = 0xB0;
/// Status nibble of a Program Change message.
pub const PROGRAM_CHANGE: u8 = 0xC0;

/// A decoded MIDI message.
///
/// # Example
///
/// ```rust
/// use loopsynth_platform::MidiMessage;
///
/// let msg = MidiMessage::parse(&[0x91, 60, 100]);
/// assert_eq!(
///     msg,
///     Some(MidiMessage::NoteOn { channel: 1, note: 60, velocity: 100 })
/// );
/// assert_eq!(MidiMessage::parse(&[0xF8]), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MidiMessage {
    /// Key pressed. Velocity 0 means release.
    NoteOn {
        /// Channel, 0-15.
        channel: u8,
        /// Note number, 0-127.
        note: u8,
        /// Velocity, 0-127.
        velocity: u8,
    },
    /// Key released.
    NoteOff {
        /// Channel, 0-15.
        channel: u8,
        /// Note number, 0-127.
        note: u8,
        /// Release velocity, 0-127. Ignored by the synth.
        velocity: u8,
    },
    /// Controller moved.
    ControlChange {
        /// Channel, 0-15.
        channel: u8,
        /// Controller number, 0-127.
        controller: u8,
        /// Controller value, 0-127.
        value: u8,
    },
    /// Program selected.
    ProgramChange {
        /// Channel, 0-15.
        channel: u8,
        /// Program number, 0-127.
        program: u8,
    },
}

impl MidiMessage {
    /// Decode one message from raw bytes.
    ///
    /// Returns `None` for unsupported status bytes and for messages shorter
    /// than their type requires. Trailing bytes are ignored and data bytes
    /// are masked to 7 bits.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        let (&status, data) = bytes.split_first()?;
        let channel = status & 0x0F;
        let d = |i: usize| data.get(i).map(|b| b & 0x7F);

        match status & 0xF0 {
            NOTE_OFF => Some(Self::NoteOff {
                channel,
                note: d(0)?,
                velocity: d(1)?,
            }),
            NOTE_ON => Some(Self::NoteOn {
                channel,
                note: d(0)?,
                velocity: d(1)?,
            }),
            CONTROL_CHANGE => Some(Self::ControlChange {
                channel,
                controller: d(0)?,
                value: d(1)?,
            }),
            PROGRAM_CHANGE => Some(Self::ProgramChange {
                channel,
                program: d(0)?,
            }),
            _ => None,
        }
    }

    /// Channel the message arrived on.
    pub fn channel(&self) -> u8 {
        match *self {
            Self::NoteOn { channel, .. }
            | Self::NoteOff { channel, .. }
            | Self::ControlChange { channel, .. }
            | Self::ProgramChange { channel, .. } => channel,
        }
    }

    /// True for Note Off and for Note On with velocity 0.
    pub fn is_note_release(&self) -> bool {
        matches!(
            self,
            Self::NoteOff { .. } | Self::NoteOn { velocity: 0, .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_each_type() {
        assert_eq!(
            MidiMessage::parse(&[0x80, 61, 10]),
            Some(MidiMessage::NoteOff {
                channel: 0,
                note: 61,
                velocity: 10
            })
        );
        assert_eq!(
            MidiMessage::parse(&[0xBF, 7, 127]),
            Some(MidiMessage::ControlChange {
                channel: 15,
                controller: 7,
                value: 127
            })
        );
        assert_eq!(
            MidiMessage::parse(&[0xC3, 5]),
            Some(MidiMessage::ProgramChange {
                channel: 3,
                program: 5
            })
        );
    }

    #[test]
    fn test_rejects_short_and_unsupported() {
        assert_eq!(MidiMessage::parse(&[]), None);
        assert_eq!(MidiMessage::parse(&[0x90, 60]), None);
        assert_eq!(MidiMessage::parse(&[0xC0]), None);
        assert_eq!(MidiMessage::parse(&[0xE0, 0, 64]), None, "pitch bend");
        assert_eq!(MidiMessage::parse(&[0xF0, 1, 2]), None, "sysex");
    }

    #[test]
    fn test_masks_data_bytes() {
        assert_eq!(
            MidiMessage::parse(&[0x90, 0xBC, 0xFF, 0x00]),
            Some(MidiMessage::NoteOn {
                channel: 0,
                note: 0x3C,
                velocity: 0x7F
            })
        );
    }

    #[test]
    fn test_note_release() {
        let zero = MidiMessage::NoteOn {
            channel: 0,
            note: 60,
            velocity: 0,
        };
        assert!(zero.is_note_release());
        assert!(!MidiMessage::parse(&[0x90, 60, 1]).is_some_and(|m| m.is_note_release()));
    }
}
