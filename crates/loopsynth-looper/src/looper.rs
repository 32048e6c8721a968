//! The looper state machine.
//!
//! One button drives the whole looper:
//!
//! | State | Short press | Long press |
//! |-------|-------------|------------|
//! | `Empty` | start recording | clear |
//! | `Recording` | stop and play (back to `Empty` if nothing was played) | clear |
//! | `Playing` | stop | clear |
//! | `Stopped` | start a new recording | clear |
//!
//! While recording, note events coming from the keyboard are forwarded to
//! the loop synth and appended to the log with their offset from the start
//! of recording. Playback replays the log against the loop synth, rewinding
//! whenever the elapsed time reaches the loop length.
//!
//! The loop synth plays the preset that was live when recording started
//! (or last changed during recording). Changing the live preset afterwards
//! does not touch the loop.
//!
//! Every state change releases the notes the looper has sounding, so no
//! transition can leave a stuck note on the loop synth.

use crate::clock::Clock;
use crate::event::{LoopEvent, LoopEventKind};
use crate::log::EventLog;
use loopsynth_core::config::MAX_LOOP_EVENTS;
use loopsynth_synth::{Preset, SynthControl};

/// Looper phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LooperState {
    /// Nothing recorded.
    #[default]
    Empty,
    /// Capturing note events.
    Recording,
    /// Replaying the loop.
    Playing,
    /// Loop kept in memory, not playing.
    Stopped,
}

/// MIDI-event looper bound to its own synth.
///
/// `S` is the loop synth, `C` the millisecond clock, `E` the event capacity.
///
/// # Example
///
/// ```rust
/// use loopsynth_looper::{Looper, LooperState, ManualClock};
/// use loopsynth_synth::VoicePool;
///
/// let clock = ManualClock::new(0);
/// let mut looper: Looper<VoicePool, &ManualClock> = Looper::new(VoicePool::new(), &clock);
///
/// looper.on_short_press(); // record
/// looper.record_note_on(60, 100);
/// clock.advance(400);
/// looper.record_note_off(60);
/// clock.advance(100);
/// looper.on_short_press(); // play
///
/// assert_eq!(looper.state(), LooperState::Playing);
/// assert_eq!(looper.loop_length_ms(), 500);
/// looper.tick();
/// assert!(looper.is_sounding(60));
/// ```
#[derive(Debug)]
pub struct Looper<S, C, const E: usize = MAX_LOOP_EVENTS> {
    synth: S,
    clock: C,
    state: LooperState,
    log: EventLog<E>,
    loop_length_ms: u32,
    cursor: usize,
    record_start_ms: u32,
    play_start_ms: u32,
    sounding: u128,
    live_preset: Preset,
    frozen_preset: Preset,
}

impl<S: SynthControl, C: Clock, const E: usize> Looper<S, C, E> {
    /// An empty looper driving `synth`, timed by `clock`.
    pub fn new(synth: S, clock: C) -> Self {
        Self {
            synth,
            clock,
            state: LooperState::Empty,
            log: EventLog::new(),
            loop_length_ms: 0,
            cursor: 0,
            record_start_ms: 0,
            play_start_ms: 0,
            sounding: 0,
            live_preset: Preset::Sine,
            frozen_preset: Preset::Sine,
        }
    }

    /// Handle a short button press.
    pub fn on_short_press(&mut self) {
        match self.state {
            LooperState::Empty | LooperState::Stopped => self.start_recording(),
            LooperState::Recording => self.stop_recording_and_play(),
            LooperState::Playing => self.stop_playback(),
        }
    }

    /// Handle a long button press: clear from any state.
    pub fn on_long_press(&mut self) {
        self.clear();
    }

    /// Capture a note-on from the keyboard. No-op unless recording.
    pub fn record_note_on(&mut self, note: u8, velocity: u8) {
        if self.state != LooperState::Recording {
            return;
        }
        self.synth.note_on(note, velocity);
        self.mark(note, true);
        self.append(LoopEvent::note_on(self.since_record_start(), note, velocity));
    }

    /// Capture a note-off from the keyboard. No-op unless recording.
    pub fn record_note_off(&mut self, note: u8) {
        if self.state != LooperState::Recording {
            return;
        }
        self.synth.note_off(note);
        self.mark(note, false);
        self.append(LoopEvent::note_off(self.since_record_start(), note));
    }

    /// Track the live preset. While recording, the loop follows it;
    /// afterwards the loop keeps the preset it was recorded with.
    pub fn set_live_preset(&mut self, preset: Preset) {
        self.live_preset = preset;
        if self.state == LooperState::Recording {
            self.frozen_preset = preset;
            self.synth.set_preset(preset);
            #[cfg(feature = "tracing")]
            tracing::debug!(preset = preset.name(), "loop preset changed while recording");
        }
    }

    /// Advance playback to the current time.
    ///
    /// Only does anything while playing a non-empty loop. When the loop
    /// length has elapsed, sounding notes are released and playback
    /// restarts from offset 0 before due events are replayed.
    pub fn tick(&mut self) {
        if self.state != LooperState::Playing || self.log.is_empty() {
            return;
        }

        let now = self.clock.now_ms();
        let mut elapsed = now.wrapping_sub(self.play_start_ms);
        if elapsed >= self.loop_length_ms {
            #[cfg(feature = "tracing")]
            tracing::debug!(elapsed, loop_length_ms = self.loop_length_ms, "loop rewind");
            self.release_sounding();
            self.play_start_ms = now;
            self.cursor = 0;
            elapsed = 0;
        }

        while let Some(&event) = self.log.get(self.cursor) {
            if event.time_offset_ms > elapsed {
                break;
            }
            match event.kind {
                LoopEventKind::NoteOn { velocity } => {
                    self.synth.note_on(event.note, velocity);
                    self.mark(event.note, true);
                }
                LoopEventKind::NoteOff => {
                    self.synth.note_off(event.note);
                    self.mark(event.note, false);
                }
            }
            self.cursor += 1;
        }
    }

    /// Silence the loop synth immediately and forget every sounding note.
    /// The looper state is unchanged.
    pub fn all_notes_off(&mut self) {
        self.sounding = 0;
        self.synth.all_notes_off();
    }

    /// Release sounding notes, drop the loop, and return to `Empty`.
    pub fn clear(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::info!(from = ?self.state, events = self.log.len(), "looper clear");
        self.release_sounding();
        self.synth.all_notes_off();
        self.log.clear();
        self.loop_length_ms = 0;
        self.cursor = 0;
        self.state = LooperState::Empty;
    }

    /// Current phase.
    pub fn state(&self) -> LooperState {
        self.state
    }

    /// Number of recorded events.
    pub fn event_count(&self) -> usize {
        self.log.len()
    }

    /// Recorded events, in recording order.
    pub fn events(&self) -> &[LoopEvent] {
        self.log.as_slice()
    }

    /// Event capacity.
    pub const fn capacity(&self) -> usize {
        E
    }

    /// Loop length in milliseconds; 0 until a recording is closed.
    pub fn loop_length_ms(&self) -> u32 {
        self.loop_length_ms
    }

    /// Index of the next event to replay.
    pub fn playback_cursor(&self) -> usize {
        self.cursor
    }

    /// Preset the loop plays with.
    pub fn frozen_preset(&self) -> Preset {
        self.frozen_preset
    }

    /// Most recent live preset.
    pub fn live_preset(&self) -> Preset {
        self.live_preset
    }

    /// Whether the looper currently holds `note` on the loop synth.
    pub fn is_sounding(&self, note: u8) -> bool {
        note < 128 && self.sounding & (1u128 << note) != 0
    }

    /// Number of notes the looper holds on the loop synth.
    pub fn sounding_count(&self) -> u32 {
        self.sounding.count_ones()
    }

    /// The loop synth.
    pub fn synth(&self) -> &S {
        &self.synth
    }

    /// The loop synth, mutably.
    pub fn synth_mut(&mut self) -> &mut S {
        &mut self.synth
    }

    /// The clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Take the looper apart.
    pub fn into_parts(self) -> (S, C) {
        (self.synth, self.clock)
    }

    fn start_recording(&mut self) {
        self.release_sounding();
        self.frozen_preset = self.live_preset;
        self.synth.set_preset(self.frozen_preset);
        self.log.clear();
        self.loop_length_ms = 0;
        self.cursor = 0;
        self.record_start_ms = self.clock.now_ms();
        self.state = LooperState::Recording;
        #[cfg(feature = "tracing")]
        tracing::info!(preset = self.frozen_preset.name(), "looper recording");
    }

    fn stop_recording_and_play(&mut self) {
        if self.log.is_empty() {
            self.state = LooperState::Empty;
            #[cfg(feature = "tracing")]
            tracing::info!("no events recorded, looper empty");
            return;
        }
        let now = self.clock.now_ms();
        // A zero-length loop is raised to 1 ms.
        self.loop_length_ms = now.wrapping_sub(self.record_start_ms).max(1);
        self.release_sounding();
        self.play_start_ms = now;
        self.cursor = 0;
        self.state = LooperState::Playing;
        #[cfg(feature = "tracing")]
        tracing::info!(
            loop_length_ms = self.loop_length_ms,
            events = self.log.len(),
            preset = self.frozen_preset.name(),
            "looper playing"
        );
    }

    fn stop_playback(&mut self) {
        self.release_sounding();
        self.cursor = 0;
        self.state = LooperState::Stopped;
        #[cfg(feature = "tracing")]
        tracing::info!("looper stopped");
    }

    fn append(&mut self, event: LoopEvent) {
        if !self.log.push(event) {
            #[cfg(feature = "tracing")]
            tracing::warn!(capacity = E, note = event.note, "loop buffer full, event dropped");
        }
    }

    fn since_record_start(&self) -> u32 {
        self.clock.now_ms().wrapping_sub(self.record_start_ms)
    }

    fn mark(&mut self, note: u8, on: bool) {
        if note >= 128 {
            return;
        }
        if on {
            self.sounding |= 1u128 << note;
        } else {
            self.sounding &= !(1u128 << note);
        }
    }

    fn release_sounding(&mut self) {
        let mut pending = self.sounding;
        while pending != 0 {
            let note = pending.trailing_zeros() as u8;
            self.synth.note_off(note);
            pending &= pending - 1;
        }
        self.sounding = 0;
    }
}
