//! Fixed-size output blocks and the render capability.
//!
//! The engine produces audio one [`AudioBlock`] at a time: `BLOCK_SIZE`
//! frames of signed 16-bit stereo. Anything that can fill a block implements
//! [`AudioRenderable`]; anything that consumes blocks implements
//! [`BlockSink`]. [`render_period`] glues the two for one callback period.
//!
//! A sink may have no free buffer (the downstream queue is full). The period
//! is then skipped: nothing is rendered, nothing is retried.

use crate::config::BLOCK_SIZE;

/// One block of stereo 16-bit audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioBlock {
    /// Left channel samples.
    pub left: [i16; BLOCK_SIZE],
    /// Right channel samples.
    pub right: [i16; BLOCK_SIZE],
}

impl AudioBlock {
    /// Number of frames per block.
    pub const FRAMES: usize = BLOCK_SIZE;

    /// A block of digital silence.
    pub const fn silent() -> Self {
        Self {
            left: [0; BLOCK_SIZE],
            right: [0; BLOCK_SIZE],
        }
    }

    /// Write the same sample to both channels of frame `i`.
    #[inline]
    pub fn set_mono(&mut self, i: usize, sample: i16) {
        self.left[i] = sample;
        self.right[i] = sample;
    }

    /// Zero both channels.
    pub fn clear(&mut self) {
        self.left.fill(0);
        self.right.fill(0);
    }

    /// True when every sample is zero.
    pub fn is_silent(&self) -> bool {
        self.left.iter().chain(self.right.iter()).all(|&s| s == 0)
    }

    /// Largest absolute sample value across both channels.
    pub fn peak(&self) -> u16 {
        self.left
            .iter()
            .chain(self.right.iter())
            .map(|s| s.unsigned_abs())
            .max()
            .unwrap_or(0)
    }

    /// Write interleaved `[L, R, L, R, ...]` floats in `[-1, 1)` into `out`.
    ///
    /// Returns the number of frames written, at most [`Self::FRAMES`].
    pub fn interleave_f32(&self, out: &mut [f32]) -> usize {
        let frames = (out.len() / 2).min(BLOCK_SIZE);
        for (i, frame) in out.chunks_exact_mut(2).take(frames).enumerate() {
            frame[0] = f32::from(self.left[i]) / 32768.0;
            frame[1] = f32::from(self.right[i]) / 32768.0;
        }
        frames
    }

    /// Write interleaved `[L, R, L, R, ...]` samples into `out`.
    ///
    /// Returns the number of frames written, at most [`Self::FRAMES`].
    pub fn interleave_i16(&self, out: &mut [i16]) -> usize {
        let frames = (out.len() / 2).min(BLOCK_SIZE);
        for (i, frame) in out.chunks_exact_mut(2).take(frames).enumerate() {
            frame[0] = self.left[i];
            frame[1] = self.right[i];
        }
        frames
    }
}

impl Default for AudioBlock {
    fn default() -> Self {
        Self::silent()
    }
}

/// Bus gains applied by [`mix_blocks`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixGains {
    /// Gain of the live synth bus.
    pub live: f32,
    /// Gain of the looper synth bus.
    pub looped: f32,
}

impl Default for MixGains {
    fn default() -> Self {
        Self {
            live: 0.5,
            looped: 0.5,
        }
    }
}

/// Sum two rendered blocks at the given bus gains, saturating at the i16 range.
pub fn mix_blocks(live: &AudioBlock, looped: &AudioBlock, gains: MixGains) -> AudioBlock {
    let mut out = AudioBlock::silent();
    let mix = |a: i16, b: i16| (f32::from(a) * gains.live + f32::from(b) * gains.looped) as i16;
    for i in 0..BLOCK_SIZE {
        out.left[i] = mix(live.left[i], looped.left[i]);
        out.right[i] = mix(live.right[i], looped.right[i]);
    }
    out
}

/// Something that produces one block of audio per render period.
///
/// Implementations must not block, allocate, or wait.
pub trait AudioRenderable {
    /// Fill `block` with the next [`BLOCK_SIZE`] frames.
    fn render_block(&mut self, block: &mut AudioBlock);
}

impl<R: AudioRenderable + ?Sized> AudioRenderable for &mut R {
    fn render_block(&mut self, block: &mut AudioBlock) {
        (**self).render_block(block);
    }
}

/// The live and loop buses rendered and summed with [`mix_blocks`].
///
/// This is the two-synth output stage: each bus renders its own block, then
/// the blocks are mixed at `gains`.
#[derive(Debug, Clone, Copy)]
pub struct BusMix<A, B> {
    /// Live bus.
    pub live: A,
    /// Loop bus.
    pub looped: B,
    /// Bus gains.
    pub gains: MixGains,
}

impl<A, B> BusMix<A, B> {
    /// Mix `live` and `looped` at `gains`.
    pub const fn new(live: A, looped: B, gains: MixGains) -> Self {
        Self {
            live,
            looped,
            gains,
        }
    }
}

impl<A: AudioRenderable, B: AudioRenderable> AudioRenderable for BusMix<A, B> {
    fn render_block(&mut self, block: &mut AudioBlock) {
        let mut live = AudioBlock::silent();
        let mut looped = AudioBlock::silent();
        self.live.render_block(&mut live);
        self.looped.render_block(&mut looped);
        *block = mix_blocks(&live, &looped, self.gains);
    }
}

/// Downstream consumer of rendered blocks.
pub trait BlockSink {
    /// Borrow a free block to render into, or `None` if none is available.
    fn allocate(&mut self) -> Option<&mut AudioBlock>;

    /// Hand the most recently allocated block downstream.
    fn transmit(&mut self);
}

/// Render one period into `sink`.
///
/// Returns `false` when the sink had no free block and the period was
/// skipped.
pub fn render_period<R, S>(renderer: &mut R, sink: &mut S) -> bool
where
    R: AudioRenderable + ?Sized,
    S: BlockSink + ?Sized,
{
    let Some(block) = sink.allocate() else {
        #[cfg(feature = "tracing")]
        tracing::trace!("no free output block, period skipped");
        return false;
    };
    renderer.render_block(block);
    sink.transmit();
    true
}
