//! Input routing for the live synth and the looper.
//!
//! One control-loop pass is: [`Controller::poll_button`], then
//! [`Controller::handle_midi`] for every pending message, then
//! [`Controller::tick`].

use crate::button::{ButtonEvent, DebouncedButton};
use crate::cc::CcMap;
use crate::midi::MidiMessage;
use loopsynth_core::config::MAX_LOOP_EVENTS;
use loopsynth_looper::{Clock, Looper};
use loopsynth_synth::{Preset, SynthControl};

/// Routes MIDI and button input to the live synth and the looper.
///
/// - Notes play on the live synth and are captured by the looper
///   (which ignores them unless recording).
/// - Program changes select preset `program % 4` on the live synth and
///   become the looper's live preset.
/// - Mapped controllers are applied to both synths.
///
/// # Example
///
/// ```rust
/// use loopsynth_looper::{Looper, ManualClock};
/// use loopsynth_platform::Controller;
/// use loopsynth_synth::{Preset, VoicePool};
///
/// let clock = ManualClock::new(0);
/// let looper: Looper<VoicePool, &ManualClock> = Looper::new(VoicePool::new(), &clock);
/// let mut controller = Controller::new(VoicePool::<8>::new(), looper);
///
/// controller.handle_midi_bytes(&[0xC0, 6]);
/// controller.handle_midi_bytes(&[0x90, 60, 100]);
/// assert_eq!(controller.live().preset(), Preset::Electric);
/// assert_eq!(controller.live().active_voice_count(), 1);
/// ```
#[derive(Debug)]
pub struct Controller<L, S, C, const E: usize = MAX_LOOP_EVENTS> {
    live: L,
    looper: Looper<S, C, E>,
    cc_map: CcMap,
    button: DebouncedButton,
}

impl<L, S, C, const E: usize> Controller<L, S, C, E>
where
    L: SynthControl,
    S: SynthControl,
    C: Clock,
{
    /// Route to `live` and `looper` with the default CC map and button
    /// timing.
    pub fn new(live: L, looper: Looper<S, C, E>) -> Self {
        Self {
            live,
            looper,
            cc_map: CcMap::default(),
            button: DebouncedButton::new(),
        }
    }

    /// Replace the CC map.
    pub fn with_cc_map(mut self, cc_map: CcMap) -> Self {
        self.cc_map = cc_map;
        self
    }

    /// Replace the button (and its timing).
    pub fn with_button(mut self, button: DebouncedButton) -> Self {
        self.button = button;
        self
    }

    /// Route one decoded message.
    pub fn handle_midi(&mut self, message: MidiMessage) {
        match message {
            MidiMessage::NoteOn { note, velocity, .. } if velocity > 0 => {
                self.live.note_on(note, velocity);
                self.looper.record_note_on(note, velocity);
            }
            MidiMessage::NoteOn { note, .. } | MidiMessage::NoteOff { note, .. } => {
                self.live.note_off(note);
                self.looper.record_note_off(note);
            }
            MidiMessage::ProgramChange { program, .. } => {
                let preset = Preset::from(program % Preset::ALL.len() as u8);
                self.live.set_preset(preset);
                self.looper.set_live_preset(preset);
                #[cfg(feature = "tracing")]
                tracing::debug!(program, preset = preset.name(), "program change");
            }
            MidiMessage::ControlChange {
                controller, value, ..
            } => {
                if let Some(action) = self.cc_map.resolve(controller, value) {
                    action.apply(&mut self.live);
                    action.apply(self.looper.synth_mut());
                    #[cfg(feature = "tracing")]
                    tracing::debug!(controller, value, ?action, "control change");
                }
            }
        }
    }

    /// Decode and route raw bytes. Returns `false` if nothing was decoded.
    pub fn handle_midi_bytes(&mut self, bytes: &[u8]) -> bool {
        match MidiMessage::parse(bytes) {
            Some(message) => {
                self.handle_midi(message);
                true
            }
            None => false,
        }
    }

    /// Sample the loop button at the looper clock's current time and act
    /// on any completed press.
    pub fn poll_button(&mut self, pressed: bool) -> Option<ButtonEvent> {
        let now = self.looper.clock().now_ms();
        let event = self.button.update(pressed, now)?;
        self.press(event);
        Some(event)
    }

    /// Act on a press directly, bypassing the debouncer.
    pub fn press(&mut self, event: ButtonEvent) {
        match event {
            ButtonEvent::ShortPress => self.looper.on_short_press(),
            ButtonEvent::LongPress => self.looper.on_long_press(),
        }
    }

    /// Advance loop playback.
    pub fn tick(&mut self) {
        self.looper.tick();
    }

    /// Silence both synths. The loop itself is kept.
    pub fn all_notes_off(&mut self) {
        self.live.all_notes_off();
        self.looper.all_notes_off();
    }

    /// The live synth.
    pub fn live(&self) -> &L {
        &self.live
    }

    /// The live synth, mutably.
    pub fn live_mut(&mut self) -> &mut L {
        &mut self.live
    }

    /// The looper.
    pub fn looper(&self) -> &Looper<S, C, E> {
        &self.looper
    }

    /// The looper, mutably.
    pub fn looper_mut(&mut self) -> &mut Looper<S, C, E> {
        &mut self.looper
    }

    /// Active CC map.
    pub fn cc_map(&self) -> &CcMap {
        &self.cc_map
    }

    /// The loop button.
    pub fn button(&self) -> &DebouncedButton {
        &self.button
    }

    /// Take the controller apart.
    pub fn into_parts(self) -> (L, Looper<S, C, E>) {
        (self.live, self.looper)
    }
}
