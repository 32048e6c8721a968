//! Real-time output via cpal.

use crate::device::{device_name, find_output_device};
use crate::{Error, Result};
use cpal::traits::{DeviceTrait, StreamTrait};
use cpal::{BufferSize, Stream};
use loopsynth_core::config::SAMPLE_RATE;
use loopsynth_core::{AudioBlock, AudioRenderable};

/// Output stream configuration.
///
/// There is no sample rate here: streams always run at
/// [`OutputStream::SAMPLE_RATE`], the rate the synth is built for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamConfig {
    /// Buffer size in frames (device default if `None`).
    pub buffer_size: Option<u32>,
    /// Output device name or index (system default if `None`).
    pub device: Option<String>,
}

/// A running cpal output stream. Audio stops when it is dropped.
pub struct OutputStream {
    _stream: Stream,
    device_name: String,
    channels: u16,
}

impl std::fmt::Debug for OutputStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputStream")
            .field("device_name", &self.device_name)
            .field("channels", &self.channels)
            .finish_non_exhaustive()
    }
}

impl OutputStream {
    /// Rate every stream is opened at, in Hz.
    pub const SAMPLE_RATE: u32 = SAMPLE_RATE as u32;

    /// Open the configured device and start playing.
    ///
    /// Fails with [`Error::Stream`] if the device refuses
    /// [`Self::SAMPLE_RATE`]; there is no resampling.
    ///
    /// `callback` receives the interleaved f32 buffer the device wants
    /// filled and the device channel count. It runs on the audio thread.
    pub fn start<F>(config: &StreamConfig, mut callback: F) -> Result<Self>
    where
        F: FnMut(&mut [f32], usize) + Send + 'static,
    {
        let host = cpal::default_host();
        let device = find_output_device(&host, config.device.as_deref())?;
        let device_name = device_name(&device).unwrap_or_else(|_| "<unnamed>".to_string());

        let channels = device
            .default_output_config()
            .map(|c| c.channels())
            .map_err(|e| Error::Stream(e.to_string()))?;

        let stream_config = cpal::StreamConfig {
            channels,
            sample_rate: Self::SAMPLE_RATE,
            buffer_size: config
                .buffer_size
                .map_or(BufferSize::Default, BufferSize::Fixed),
        };

        let frame_channels = usize::from(channels);
        let stream = device
            .build_output_stream(
                &stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    callback(data, frame_channels);
                },
                |err| tracing::error!(error = %err, "output stream error"),
                None,
            )
            .map_err(|e| Error::Stream(e.to_string()))?;

        stream.play().map_err(|e| Error::Stream(e.to_string()))?;
        tracing::info!(
            device = %device_name,
            channels,
            sample_rate = Self::SAMPLE_RATE,
            buffer_size = ?config.buffer_size,
            "output stream started"
        );

        Ok(Self {
            _stream: stream,
            device_name,
            channels,
        })
    }

    /// Name of the device being played.
    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    /// Stream sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        Self::SAMPLE_RATE
    }

    /// Device channel count.
    pub fn channels(&self) -> u16 {
        self.channels
    }
}

impl Drop for OutputStream {
    fn drop(&mut self) {
        tracing::info!(device = %self.device_name, "output stream stopped");
    }
}

/// Serves device buffers of any size from fixed-size blocks.
///
/// Frames left over from a block are carried into the next callback, so
/// the renderer always runs exactly once per [`AudioBlock::FRAMES`] frames.
///
/// Channel mapping: left and right go to the first two channels, a mono
/// device gets their average, extra channels are silent.
#[derive(Debug, Clone)]
pub struct BlockStreamer {
    block: AudioBlock,
    position: usize,
    blocks_rendered: u64,
}

impl Default for BlockStreamer {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockStreamer {
    /// A streamer that renders on first use.
    pub fn new() -> Self {
        Self {
            block: AudioBlock::silent(),
            position: AudioBlock::FRAMES,
            blocks_rendered: 0,
        }
    }

    /// Fill interleaved `out` with `channels` channels from `renderer`.
    pub fn fill<R: AudioRenderable + ?Sized>(
        &mut self,
        renderer: &mut R,
        out: &mut [f32],
        channels: usize,
    ) {
        if channels == 0 {
            return;
        }
        for frame in out.chunks_exact_mut(channels) {
            if self.position == AudioBlock::FRAMES {
                renderer.render_block(&mut self.block);
                self.position = 0;
                self.blocks_rendered += 1;
            }
            let l = f32::from(self.block.left[self.position]) / 32768.0;
            let r = f32::from(self.block.right[self.position]) / 32768.0;
            self.position += 1;

            if let [only] = frame {
                *only = 0.5 * (l + r);
                continue;
            }
            frame[0] = l;
            frame[1] = r;
            frame[2..].fill(0.0);
        }
    }

    /// Number of blocks rendered so far.
    pub fn blocks_rendered(&self) -> u64 {
        self.blocks_rendered
    }

    /// Frames of the current block not yet handed out.
    pub fn pending_frames(&self) -> usize {
        AudioBlock::FRAMES - self.position
    }
}
