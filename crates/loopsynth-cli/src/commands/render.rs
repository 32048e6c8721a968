//! Offline rendering of a performance script to WAV.

use crate::script::{Performer, Script};
use crate::session::{configured_pool, controller, load_config};
use clap::Args;
use loopsynth_config::EngineConfig;
use loopsynth_core::{AudioBlock, AudioRenderable, BusMix};
use loopsynth_io::WavRecorder;
use loopsynth_looper::{Clock, ManualClock};
use loopsynth_synth::SharedVoicePool;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct RenderArgs {
    /// Performance script (TOML)
    #[arg(short, long)]
    script: PathBuf,

    /// Output WAV file
    #[arg(short, long)]
    output: PathBuf,

    /// Engine configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let script = Script::load(&args.script)?;

    println!("Rendering {}...", args.script.display());
    let frames = render(&config, &script, &args.output)?;

    let sample_rate = config.audio.sample_rate();
    println!(
        "  {} events, {} frames, {} Hz, {:.2}s",
        script.events.len(),
        frames,
        sample_rate,
        frames as f64 / f64::from(sample_rate)
    );
    println!("Wrote {}", args.output.display());
    Ok(())
}

/// Render `script` into `output`. Returns the number of frames written.
///
/// Between blocks the control context runs once per millisecond of
/// simulated time, exactly as the firmware main loop would, so the result
/// is deterministic.
pub fn render(config: &EngineConfig, script: &Script, output: &Path) -> anyhow::Result<u64> {
    let sample_rate = u64::from(config.audio.sample_rate());
    let total_frames = u64::from(script.length_ms) * sample_rate / 1000;
    let block_frames = AudioBlock::FRAMES as u64;
    let blocks = total_frames.div_ceil(block_frames);

    let live = SharedVoicePool::new(configured_pool(config));
    let looped = SharedVoicePool::new(configured_pool(config));
    let clock = ManualClock::new(0);
    let mut controller = controller(config, &live, &looped, &clock);
    let mut performer = Performer::new(script);
    let mut bus = BusMix::new(&live, &looped, config.mix.gains());

    let mut recorder = WavRecorder::create(output, config.audio.sample_rate())?;
    let mut block = AudioBlock::silent();
    let mut next_ms = 0u32;

    for index in 0..blocks {
        let block_start_ms = (index * block_frames * 1000 / sample_rate) as u32;
        while next_ms <= block_start_ms {
            clock.set(next_ms);
            performer.dispatch_due(&mut controller, next_ms);
            controller.tick();
            next_ms += 1;
        }
        bus.render_block(&mut block);
        recorder.write_block(&block)?;
    }

    tracing::info!(
        blocks,
        script_complete = performer.is_done(),
        loop_state = ?controller.looper().state(),
        loop_events = controller.looper().event_count(),
        clock_ms = clock.now_ms(),
        "render finished"
    );
    Ok(recorder.finalize()?)
}
