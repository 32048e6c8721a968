//! Lock-free control of a pool rendered on another thread.
//!
//! [`voice_channel`] splits a pool into a [`SynthSender`] for the control
//! thread and a [`PoolRenderer`] that owns the pool on the audio thread.
//! Control calls become [`SynthCommand`]s in a single-producer,
//! single-consumer ring; the renderer applies everything queued at the start
//! of each block and then renders. Neither side ever waits on the other, so
//! a preempted control thread cannot stall the audio callback.
//!
//! When the ring is full the command is dropped and counted. At one control
//! pass per millisecond the default capacity covers far more than one
//! device buffer of traffic.
//!
//! ```rust
//! use loopsynth_core::{AudioBlock, AudioRenderable};
//! use loopsynth_synth::{SynthControl, VoicePool, voice_channel};
//!
//! let (mut control, mut render) = voice_channel(VoicePool::<8>::new(), 64);
//! control.note_on(60, 100);
//! assert_eq!(render.pool().active_voice_count(), 0);
//!
//! let mut block = AudioBlock::silent();
//! render.render_block(&mut block);
//! assert_eq!(render.pool().active_voice_count(), 1);
//! ```

use crate::command::SynthCommand;
use crate::control::SynthControl;
use crate::pool::VoicePool;
use crate::preset::Preset;
use loopsynth_core::config::VOICES;
use loopsynth_core::{AudioBlock, AudioRenderable};
use ringbuf::traits::{Consumer, Observer, Producer, Split};
use ringbuf::{HeapCons, HeapProd, HeapRb};

/// Command ring size used by the CLI.
pub const DEFAULT_COMMAND_CAPACITY: usize = 512;

/// Split `pool` into a control handle and a renderer.
///
/// `capacity` is the number of commands that can be pending between two
/// rendered blocks (at least 1).
pub fn voice_channel<const N: usize>(
    pool: VoicePool<N>,
    capacity: usize,
) -> (SynthSender, PoolRenderer<N>) {
    let (producer, consumer) = HeapRb::<SynthCommand>::new(capacity.max(1)).split();
    (
        SynthSender {
            producer,
            dropped: 0,
        },
        PoolRenderer { pool, consumer },
    )
}

/// Control side of a [`voice_channel`].
pub struct SynthSender {
    producer: HeapProd<SynthCommand>,
    dropped: u64,
}

impl SynthSender {
    /// Queue `command`. Returns `false` if the ring was full and it was
    /// dropped.
    pub fn send(&mut self, command: SynthCommand) -> bool {
        if self.producer.try_push(command).is_ok() {
            return true;
        }
        self.dropped += 1;
        #[cfg(feature = "tracing")]
        tracing::warn!(?command, dropped = self.dropped, "synth command ring full");
        false
    }

    /// Commands queued and not yet applied.
    pub fn pending(&self) -> usize {
        self.producer.occupied_len()
    }

    /// Commands lost to a full ring so far.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl core::fmt::Debug for SynthSender {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SynthSender")
            .field("pending", &self.pending())
            .field("dropped", &self.dropped)
            .finish()
    }
}

impl SynthControl for SynthSender {
    fn note_on(&mut self, note: u8, velocity: u8) {
        self.send(SynthCommand::NoteOn { note, velocity });
    }

    fn note_off(&mut self, note: u8) {
        self.send(SynthCommand::NoteOff { note });
    }

    fn all_notes_off(&mut self) {
        self.send(SynthCommand::AllNotesOff);
    }

    fn set_preset(&mut self, preset: Preset) {
        self.send(SynthCommand::SetPreset(preset));
    }

    fn set_master_gain(&mut self, gain: f32) {
        self.send(SynthCommand::SetMasterGain(gain));
    }

    fn set_echo_on(&mut self, on: bool) {
        self.send(SynthCommand::SetEchoOn(on));
    }

    fn set_echo_mix(&mut self, mix: f32) {
        self.send(SynthCommand::SetEchoMix(mix));
    }

    fn set_echo_feedback(&mut self, feedback: f32) {
        self.send(SynthCommand::SetEchoFeedback(feedback));
    }

    fn set_echo_time_ms(&mut self, ms: f32) {
        self.send(SynthCommand::SetEchoTimeMs(ms));
    }
}

/// Render side of a [`voice_channel`]. Owns the pool.
pub struct PoolRenderer<const N: usize = VOICES> {
    pool: VoicePool<N>,
    consumer: HeapCons<SynthCommand>,
}

impl<const N: usize> PoolRenderer<N> {
    /// Apply every queued command. Returns how many were applied.
    pub fn apply_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Some(command) = self.consumer.try_pop() {
            command.apply(&mut self.pool);
            applied += 1;
        }
        applied
    }

    /// The pool as of the last applied command.
    pub fn pool(&self) -> &VoicePool<N> {
        &self.pool
    }

    /// Unwrap the pool, dropping anything still queued.
    pub fn into_pool(self) -> VoicePool<N> {
        self.pool
    }
}

impl<const N: usize> core::fmt::Debug for PoolRenderer<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PoolRenderer")
            .field("voices", &N)
            .field("queued", &self.consumer.occupied_len())
            .finish_non_exhaustive()
    }
}

impl<const N: usize> AudioRenderable for PoolRenderer<N> {
    fn render_block(&mut self, block: &mut AudioBlock) {
        self.apply_pending();
        self.pool.render_block(block);
    }
}
