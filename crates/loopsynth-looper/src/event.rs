//! Recorded loop events.

/// What a recorded event does when replayed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LoopEventKind {
    /// Start a note at the given velocity.
    NoteOn {
        /// MIDI velocity (0-127).
        velocity: u8,
    },
    /// Release a note.
    NoteOff,
}

/// One note event, timestamped relative to the start of recording.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LoopEvent {
    /// Milliseconds since recording started.
    pub time_offset_ms: u32,
    /// Event type.
    pub kind: LoopEventKind,
    /// MIDI note (0-127).
    pub note: u8,
}

impl LoopEvent {
    /// A note-on at `time_offset_ms`.
    pub const fn note_on(time_offset_ms: u32, note: u8, velocity: u8) -> Self {
        Self {
            time_offset_ms,
            kind: LoopEventKind::NoteOn { velocity },
            note,
        }
    }

    /// A note-off at `time_offset_ms`.
    pub const fn note_off(time_offset_ms: u32, note: u8) -> Self {
        Self {
            time_offset_ms,
            kind: LoopEventKind::NoteOff,
            note,
        }
    }

    /// True for note-on events.
    pub fn is_note_on(&self) -> bool {
        matches!(self.kind, LoopEventKind::NoteOn { .. })
    }

    /// Velocity of a note-on; 0 for a note-off.
    pub fn velocity(&self) -> u8 {
        match self.kind {
            LoopEventKind::NoteOn { velocity } => velocity,
            LoopEventKind::NoteOff => 0,
        }
    }
}

impl Default for LoopEvent {
    fn default() -> Self {
        Self::note_off(0, 0)
    }
}
