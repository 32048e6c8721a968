//! 16-bit stereo WAV files.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use loopsynth_core::AudioBlock;
use loopsynth_core::config::CHANNELS;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

fn spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: CHANNELS as u16,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone, PartialEq)]
pub struct WavInfo {
    /// Number of audio channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    Ok(info(&reader))
}

fn info<R: std::io::Read>(reader: &WavReader<R>) -> WavInfo {
    let spec = reader.spec();
    let num_frames = u64::from(reader.len()) / u64::from(spec.channels.max(1));
    WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs: num_frames as f64 / f64::from(spec.sample_rate),
    }
}

/// Streams rendered blocks into a 16-bit stereo WAV file.
///
/// # Example
///
/// ```rust,no_run
/// use loopsynth_core::AudioBlock;
/// use loopsynth_io::WavRecorder;
///
/// let mut recorder = WavRecorder::create("out.wav", 44100)?;
/// recorder.write_block(&AudioBlock::silent())?;
/// let frames = recorder.finalize()?;
/// assert_eq!(frames, 128);
/// # Ok::<(), loopsynth_io::Error>(())
/// ```
pub struct WavRecorder {
    writer: WavWriter<BufWriter<File>>,
    frames: u64,
}

impl std::fmt::Debug for WavRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WavRecorder")
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}

impl WavRecorder {
    /// Create (or truncate) `path`.
    pub fn create<P: AsRef<Path>>(path: P, sample_rate: u32) -> Result<Self> {
        let writer = WavWriter::create(path, spec(sample_rate))?;
        Ok(Self { writer, frames: 0 })
    }

    /// Append one block.
    pub fn write_block(&mut self, block: &AudioBlock) -> Result<()> {
        let mut interleaved = [0i16; 2 * AudioBlock::FRAMES];
        block.interleave_i16(&mut interleaved);
        for sample in interleaved {
            self.writer.write_sample(sample)?;
        }
        self.frames += AudioBlock::FRAMES as u64;
        Ok(())
    }

    /// Frames written so far.
    pub fn frames_written(&self) -> u64 {
        self.frames
    }

    /// Write the header and close the file. Returns the frame count.
    pub fn finalize(self) -> Result<u64> {
        self.writer.finalize()?;
        tracing::debug!(frames = self.frames, "wav finalized");
        Ok(self.frames)
    }
}

/// Write interleaved stereo samples to a 16-bit WAV file.
pub fn write_wav_i16<P: AsRef<Path>>(path: P, interleaved: &[i16], sample_rate: u32) -> Result<()> {
    let mut writer = WavWriter::create(path, spec(sample_rate))?;
    for &s in interleaved {
        writer.write_sample(s)?;
    }
    writer.finalize()?;
    Ok(())
}

/// Read a 16-bit integer WAV file as interleaved samples.
pub fn read_wav_i16<P: AsRef<Path>>(path: P) -> Result<(Vec<i16>, WavInfo)> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != 16 {
        return Err(Error::UnsupportedFormat(format!(
            "{:?} {}-bit",
            spec.sample_format, spec.bits_per_sample
        )));
    }
    let info = info(&reader);
    let samples = reader
        .into_samples::<i16>()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok((samples, info))
}
