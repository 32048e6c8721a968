//! Voice pool shared between the render and control contexts.
//!
//! The render context (audio interrupt or device callback) and the control
//! context (MIDI, buttons, main loop) both touch the same pool. Every access
//! goes through a `critical_section` and only lasts for one control call or
//! one block render:
//!
//! - on single-core embedded targets the section masks interrupts
//!   (cortex-m `critical-section-single-core`)
//! - on hosts the `critical-section/std` implementation is a process-wide
//!   lock
//!
//! Control calls are O(voices); nothing inside a section allocates or waits
//! on anything but the section itself.
//!
//! On a host the process-wide lock means a render thread can wait behind a
//! preempted control thread. Threaded hosts drive the pool through
//! [`voice_channel`](crate::voice_channel) instead, which never blocks the
//! renderer. This type stays for interrupt-driven targets and for offline
//! rendering on one thread.

use crate::pool::VoicePool;
use core::cell::RefCell;
use critical_section::Mutex;
use loopsynth_core::config::VOICES;
use loopsynth_core::{AudioBlock, AudioRenderable};

/// A [`VoicePool`] behind a critical-section mutex.
///
/// `&SharedVoicePool` implements both [`AudioRenderable`] and
/// [`SynthControl`](crate::SynthControl), so one handle can be given to the
/// render callback and another to the control code.
///
/// # Example
///
/// ```rust
/// use loopsynth_core::{AudioBlock, AudioRenderable};
/// use loopsynth_synth::{SharedVoicePool, SynthControl, VoicePool};
///
/// let shared: SharedVoicePool = SharedVoicePool::new(VoicePool::new());
///
/// let mut control = &shared;
/// control.note_on(60, 100);
///
/// let mut render = &shared;
/// let mut block = AudioBlock::silent();
/// render.render_block(&mut block);
/// assert_eq!(shared.with(|pool| pool.active_voice_count()), 1);
/// ```
pub struct SharedVoicePool<const N: usize = VOICES> {
    inner: Mutex<RefCell<VoicePool<N>>>,
}

impl<const N: usize> SharedVoicePool<N> {
    /// Wrap a pool for shared access.
    pub const fn new(pool: VoicePool<N>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(pool)),
        }
    }

    /// Run `f` with exclusive access to the pool inside a critical section.
    ///
    /// `f` must not call back into the same handle.
    #[inline]
    pub fn with<R>(&self, f: impl FnOnce(&mut VoicePool<N>) -> R) -> R {
        critical_section::with(|cs| f(&mut self.inner.borrow_ref_mut(cs)))
    }

    /// Unwrap the pool.
    pub fn into_inner(self) -> VoicePool<N> {
        self.inner.into_inner().into_inner()
    }
}

impl<const N: usize> core::fmt::Debug for SharedVoicePool<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SharedVoicePool")
            .field("voices", &N)
            .finish_non_exhaustive()
    }
}

impl<const N: usize> AudioRenderable for &SharedVoicePool<N> {
    fn render_block(&mut self, block: &mut AudioBlock) {
        self.with(|pool| pool.render_block(block));
    }
}
