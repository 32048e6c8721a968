//! Engine construction shared by the render, play, and live commands.

use loopsynth_config::EngineConfig;
use loopsynth_core::BusMix;
use loopsynth_core::config::VOICES;
use loopsynth_io::{BlockStreamer, OutputStream, StreamConfig};
use loopsynth_looper::{Clock, Looper};
use loopsynth_platform::Controller;
use loopsynth_synth::{DEFAULT_COMMAND_CAPACITY, SynthControl, SynthSender, VoicePool, voice_channel};
use std::path::Path;

/// Load `path`, or the defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    match path {
        Some(path) => {
            let config = EngineConfig::load(path)?;
            tracing::info!(path = %path.display(), "configuration loaded");
            Ok(config)
        }
        None => Ok(EngineConfig::default()),
    }
}

/// A voice pool with the configured initial parameters.
pub fn configured_pool(config: &EngineConfig) -> VoicePool<VOICES> {
    let mut pool = VoicePool::new();
    config.synth.apply(&mut pool);
    pool
}

/// The live synth handle, the looper, and the configured routing.
pub fn controller<L, S, C>(config: &EngineConfig, live: L, looped: S, clock: C) -> Controller<L, S, C>
where
    L: SynthControl,
    S: SynthControl,
    C: Clock,
{
    let mut looper = Looper::new(looped, clock);
    looper.set_live_preset(config.synth.preset());
    Controller::new(live, looper)
        .with_cc_map(config.midi.cc_map())
        .with_button(config.button.button())
}

/// Both synths rendering on an output device, controlled from this thread.
pub struct OutputEngine {
    pub live: SynthSender,
    pub looped: SynthSender,
    pub stream: OutputStream,
}

/// Open the output device and move both configured pools onto its audio
/// thread. `device` and `buffer_size` override the configuration.
pub fn start_output(
    config: &EngineConfig,
    device: Option<String>,
    buffer_size: Option<u32>,
) -> anyhow::Result<OutputEngine> {
    let (live, live_render) = voice_channel(configured_pool(config), DEFAULT_COMMAND_CAPACITY);
    let (looped, loop_render) = voice_channel(configured_pool(config), DEFAULT_COMMAND_CAPACITY);

    let stream_config = StreamConfig {
        buffer_size: buffer_size.or(config.audio.buffer_size),
        device: device.or_else(|| config.audio.device.clone()),
    };

    let mut bus = BusMix::new(live_render, loop_render, config.mix.gains());
    let mut streamer = BlockStreamer::new();
    let stream = OutputStream::start(&stream_config, move |out, channels| {
        streamer.fill(&mut bus, out, channels);
    })?;

    Ok(OutputEngine {
        live,
        looped,
        stream,
    })
}

/// Log commands lost to full rings during a session.
pub fn report_dropped(live: &SynthSender, looped: &SynthSender) {
    if live.dropped() > 0 || looped.dropped() > 0 {
        tracing::warn!(
            live = live.dropped(),
            looped = looped.dropped(),
            "synth commands dropped"
        );
    }
}
