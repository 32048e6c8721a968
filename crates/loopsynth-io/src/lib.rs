//! Host audio I/O for loopsynth.
//!
//! This crate provides:
//!
//! - **Devices**: [`list_output_devices`] and [`default_output_device`]
//! - **Real-time output**: [`OutputStream`] drives a cpal output stream, and
//!   [`BlockStreamer`] adapts fixed [`AudioBlock`](loopsynth_core::AudioBlock)
//!   rendering to whatever buffer size the device asks for
//! - **WAV files**: [`WavRecorder`] and [`write_wav_i16`] for 16-bit stereo
//!   output, [`read_wav_i16`] and [`read_wav_info`] for reading it back
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use loopsynth_core::{BusMix, MixGains};
//! use loopsynth_io::{BlockStreamer, OutputStream, StreamConfig};
//!
//! let mut streamer = BlockStreamer::new();
//! let stream = OutputStream::start(&StreamConfig::default(), move |out, channels| {
//!     let mut bus = BusMix::new(&*live, &*looped, MixGains::default());
//!     streamer.fill(&mut bus, out, channels);
//! })?;
//! // Plays until `stream` is dropped.
//! ```

mod device;
mod stream;
mod wav;

pub use device::{OutputDevice, default_output_device, list_output_devices};
pub use stream::{BlockStreamer, OutputStream, StreamConfig};
pub use wav::{WavInfo, WavRecorder, read_wav_i16, read_wav_info, write_wav_i16};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Audio stream setup or runtime error.
    #[error("Audio stream error: {0}")]
    Stream(String),

    /// No audio device available on the system.
    #[error("No audio device available")]
    NoDevice,

    /// The requested audio device was not found.
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    /// The WAV file is not in the format this crate writes.
    #[error("Unsupported WAV format: {0}")]
    UnsupportedFormat(String),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
