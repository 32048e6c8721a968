//! Line-oriented live input.
//!
//! Each line is either raw MIDI bytes in hex, as printed by `amidi --dump`
//! or `aseqdump`-style tools, or a keyword command:
//!
//! ```text
//! 90 3C 64        note on, middle C
//! 80 3C 00        note off
//! on 60 100       note on (velocity defaults to 100)
//! off 60
//! program 2
//! cc 80 127
//! press           loop button, short press
//! long            loop button, long press
//! panic           all notes off
//! quit
//! ```
//!
//! Blank lines and `#` comments are ignored.

use crate::script::Action;
use anyhow::{Context, bail};
use loopsynth_looper::Clock;
use loopsynth_platform::Controller;
use loopsynth_synth::SynthControl;

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveInput {
    /// Raw MIDI bytes.
    Midi(Vec<u8>),
    /// A keyword command.
    Action(Action),
    /// Leave the session.
    Quit,
}

impl LiveInput {
    /// Parse one line. `Ok(None)` for blank lines and comments.
    pub fn parse(line: &str) -> anyhow::Result<Option<Self>> {
        let line = line.split('#').next().unwrap_or_default().trim();
        let mut words = line.split_whitespace();
        let Some(first) = words.next() else {
            return Ok(None);
        };
        let rest: Vec<&str> = words.collect();

        let number = |i: usize, what: &str| -> anyhow::Result<u8> {
            let word = rest
                .get(i)
                .with_context(|| format!("'{first}' needs a {what}"))?;
            word.parse::<u8>()
                .with_context(|| format!("bad {what} '{word}'"))
        };

        let action = match first.to_ascii_lowercase().as_str() {
            "quit" | "exit" => return Ok(Some(Self::Quit)),
            "on" => Action::NoteOn {
                note: number(0, "note")?,
                velocity: if rest.len() > 1 {
                    number(1, "velocity")?
                } else {
                    100
                },
            },
            "off" => Action::NoteOff {
                note: number(0, "note")?,
            },
            "program" | "pc" => Action::Program {
                program: number(0, "program")?,
            },
            "cc" => Action::Cc {
                controller: number(0, "controller")?,
                value: number(1, "value")?,
            },
            "press" | "short" => Action::ShortPress,
            "long" => Action::LongPress,
            "panic" => Action::AllNotesOff,
            _ => return parse_hex(line).map(|bytes| Some(Self::Midi(bytes))),
        };
        action.check()?;
        Ok(Some(Self::Action(action)))
    }

    /// Apply to `controller`. Returns `false` for [`LiveInput::Quit`].
    pub fn perform<L, S, C, const E: usize>(&self, controller: &mut Controller<L, S, C, E>) -> bool
    where
        L: SynthControl,
        S: SynthControl,
        C: Clock,
    {
        match self {
            Self::Midi(bytes) => {
                if !controller.handle_midi_bytes(bytes) {
                    tracing::warn!(?bytes, "ignored MIDI message");
                }
            }
            Self::Action(action) => action.perform(controller),
            Self::Quit => return false,
        }
        true
    }
}

fn parse_hex(line: &str) -> anyhow::Result<Vec<u8>> {
    let bytes = line
        .split_whitespace()
        .map(|word| {
            let digits = word.trim_start_matches("0x").trim_start_matches("0X");
            if digits.is_empty() || digits.len() > 2 {
                bail!("'{word}' is neither a command nor a hex byte");
            }
            u8::from_str_radix(digits, 16)
                .map_err(|_| anyhow::anyhow!("'{word}' is neither a command nor a hex byte"))
        })
        .collect::<anyhow::Result<Vec<u8>>>()?;
    if bytes[0] & 0x80 == 0 {
        bail!("MIDI message must start with a status byte, got {:02X}", bytes[0]);
    }
    Ok(bytes)
}
