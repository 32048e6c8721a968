//! Performance scripts: timed MIDI-style input and loop-button presses.
//!
//! ```toml
//! length_ms = 8000
//!
//! [[event]]
//! at_ms = 0
//! kind = "short_press"
//!
//! [[event]]
//! at_ms = 10
//! kind = "note_on"
//! note = 60
//! velocity = 100
//!
//! [[event]]
//! at_ms = 400
//! kind = "note_off"
//! note = 60
//! ```

use anyhow::{Context, bail};
use loopsynth_looper::Clock;
use loopsynth_platform::{ButtonEvent, Controller, MidiMessage};
use loopsynth_synth::SynthControl;
use serde::Deserialize;
use std::path::Path;

const fn default_velocity() -> u8 {
    100
}

/// What happens at a script event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    /// Key down.
    NoteOn {
        /// Note number.
        note: u8,
        /// Velocity; 0 releases.
        #[serde(default = "default_velocity")]
        velocity: u8,
    },
    /// Key up.
    NoteOff {
        /// Note number.
        note: u8,
    },
    /// Program change.
    Program {
        /// Program number; preset is `program % 4`.
        program: u8,
    },
    /// Control change.
    Cc {
        /// Controller number.
        controller: u8,
        /// Controller value.
        value: u8,
    },
    /// Loop button, short press.
    ShortPress,
    /// Loop button, long press.
    LongPress,
    /// Silence both synths.
    AllNotesOff,
}

impl Action {
    /// Route this action through `controller`.
    pub fn perform<L, S, C, const E: usize>(self, controller: &mut Controller<L, S, C, E>)
    where
        L: SynthControl,
        S: SynthControl,
        C: Clock,
    {
        match self {
            Action::ShortPress => controller.press(ButtonEvent::ShortPress),
            Action::LongPress => controller.press(ButtonEvent::LongPress),
            Action::AllNotesOff => controller.all_notes_off(),
            action => {
                if let Some(message) = action.as_midi() {
                    controller.handle_midi(message);
                }
            }
        }
    }

    fn as_midi(self) -> Option<MidiMessage> {
        match self {
            Action::NoteOn { note, velocity } => Some(MidiMessage::NoteOn {
                channel: 0,
                note,
                velocity,
            }),
            Action::NoteOff { note } => Some(MidiMessage::NoteOff {
                channel: 0,
                note,
                velocity: 0,
            }),
            Action::Program { program } => Some(MidiMessage::ProgramChange {
                channel: 0,
                program,
            }),
            Action::Cc { controller, value } => Some(MidiMessage::ControlChange {
                channel: 0,
                controller,
                value,
            }),
            Action::ShortPress | Action::LongPress | Action::AllNotesOff => None,
        }
    }

    /// Reject data bytes above 127.
    pub fn check(&self) -> anyhow::Result<()> {
        let data = match *self {
            Action::NoteOn { note, velocity } => [note, velocity],
            Action::NoteOff { note } => [note, 0],
            Action::Program { program } => [program, 0],
            Action::Cc { controller, value } => [controller, value],
            Action::ShortPress | Action::LongPress | Action::AllNotesOff => [0, 0],
        };
        if data.iter().any(|&b| b > 127) {
            bail!("data byte out of range 0-127 in {self:?}");
        }
        Ok(())
    }
}

/// One timed event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ScriptEvent {
    /// Time from the start of the performance.
    pub at_ms: u32,
    /// What happens.
    #[serde(flatten)]
    pub action: Action,
}

/// A whole performance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Script {
    /// Total rendered duration.
    pub length_ms: u32,
    /// Events, in any order; sorted on load.
    #[serde(default, rename = "event")]
    pub events: Vec<ScriptEvent>,
}

impl Script {
    /// Parse and check a script.
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        let mut script: Script = toml::from_str(text)?;
        if script.length_ms == 0 {
            bail!("length_ms must be greater than 0");
        }
        for (i, event) in script.events.iter().enumerate() {
            event
                .action
                .check()
                .with_context(|| format!("event {i} at {} ms", event.at_ms))?;
        }
        script.events.sort_by_key(|e| e.at_ms);
        Ok(script)
    }

    /// Load a script file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read script '{}'", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("invalid script '{}'", path.display()))
    }
}

/// Feeds script events to a controller as time passes.
#[derive(Debug)]
pub struct Performer<'a> {
    events: &'a [ScriptEvent],
    cursor: usize,
}

impl<'a> Performer<'a> {
    /// Start at the first event of `script`.
    pub fn new(script: &'a Script) -> Self {
        Self {
            events: &script.events,
            cursor: 0,
        }
    }

    /// Apply every event due at or before `now_ms`. Returns how many were
    /// applied.
    pub fn dispatch_due<L, S, C, const E: usize>(
        &mut self,
        controller: &mut Controller<L, S, C, E>,
        now_ms: u32,
    ) -> usize
    where
        L: SynthControl,
        S: SynthControl,
        C: Clock,
    {
        let start = self.cursor;
        while let Some(event) = self.events.get(self.cursor) {
            if event.at_ms > now_ms {
                break;
            }
            tracing::debug!(at_ms = event.at_ms, action = ?event.action, "script event");
            event.action.perform(controller);
            self.cursor += 1;
        }
        self.cursor - start
    }

    /// True once every event has been applied.
    pub fn is_done(&self) -> bool {
        self.cursor >= self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loopsynth_looper::{Looper, LooperState, ManualClock};
    use loopsynth_synth::VoicePool;

    const SCRIPT: &str = r#"
        length_ms = 2000

        [[event]]
        at_ms = 500
        kind = "note_off"
        note = 60

        [[event]]
        at_ms = 0
        kind = "short_press"

        [[event]]
        at_ms = 0
        kind = "note_on"
        note = 60

        [[event]]
        at_ms = 1000
        kind = "short_press"

        [[event]]
        at_ms = 1000
        kind = "cc"
        controller = 80
        value = 127
    "#;

    #[test]
    fn parses_and_sorts() {
        let script = Script::from_toml(SCRIPT).unwrap();
        assert_eq!(script.length_ms, 2000);
        assert_eq!(script.events.len(), 5);
        assert_eq!(script.events[0].action, Action::ShortPress);
        assert_eq!(
            script.events[1].action,
            Action::NoteOn {
                note: 60,
                velocity: 100
            }
        );
        assert_eq!(script.events[2].at_ms, 500);
    }

    #[test]
    fn rejects_bad_scripts() {
        assert!(Script::from_toml("length_ms = 0").is_err());
        assert!(
            Script::from_toml(
                "length_ms = 10\n[[event]]\nat_ms = 0\nkind = \"note_on\"\nnote = 200\n"
            )
            .is_err()
        );
        assert!(
            Script::from_toml("length_ms = 10\n[[event]]\nat_ms = 0\nkind = \"sing\"\n").is_err()
        );
    }

    #[test]
    fn performer_drives_controller() {
        let script = Script::from_toml(SCRIPT).unwrap();
        let clock = ManualClock::new(0);
        let looper: Looper<VoicePool, &ManualClock> = Looper::new(VoicePool::new(), &clock);
        let mut controller = Controller::new(VoicePool::<8>::new(), looper);
        let mut performer = Performer::new(&script);

        assert_eq!(performer.dispatch_due(&mut controller, 0), 2);
        assert_eq!(controller.looper().state(), LooperState::Recording);
        assert_eq!(performer.dispatch_due(&mut controller, 499), 0);
        clock.set(500);
        assert_eq!(performer.dispatch_due(&mut controller, 500), 1);
        clock.set(1000);
        assert_eq!(performer.dispatch_due(&mut controller, 1500), 2);
        assert!(performer.is_done());
        assert_eq!(controller.looper().state(), LooperState::Playing);
        assert_eq!(controller.looper().loop_length_ms(), 1000);
        assert!(controller.live().echo().is_enabled());
    }
}
