//! Real-time playback of a performance script.

use crate::script::{Performer, Script};
use crate::session::{OutputEngine, controller, load_config, report_dropped, start_output};
use clap::Args;
use loopsynth_looper::{Clock, SystemClock};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

/// Time left for releases and echo tails before the stream closes.
const TAIL: Duration = Duration::from_millis(1500);

#[derive(Args)]
pub struct PlayArgs {
    /// Performance script (TOML)
    #[arg(short, long)]
    script: PathBuf,

    /// Engine configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output device (index or name, overrides the configuration)
    #[arg(short = 'o', long)]
    device: Option<String>,

    /// Buffer size in frames (overrides the configuration)
    #[arg(short, long)]
    buffer_size: Option<u32>,
}

pub fn run(args: PlayArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let script = Script::load(&args.script)?;

    let OutputEngine {
        live,
        looped,
        stream,
    } = start_output(&config, args.device, args.buffer_size)?;

    println!("Playing {}", args.script.display());
    println!("  Output: {}", stream.device_name());
    println!("  Sample rate: {} Hz", stream.sample_rate());
    println!("  Length: {:.2}s", f64::from(script.length_ms) / 1000.0);
    println!("\nPress Ctrl+C to stop...\n");

    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        println!("\nStopping...");
        r.store(false, Ordering::SeqCst);
    })?;

    let clock = SystemClock::new();
    let mut controller = controller(&config, live, looped, clock);
    let mut performer = Performer::new(&script);

    while running.load(Ordering::SeqCst) {
        let now = clock.now_ms();
        if now >= script.length_ms {
            break;
        }
        performer.dispatch_due(&mut controller, now);
        controller.tick();
        thread::sleep(Duration::from_millis(1));
    }

    controller.all_notes_off();
    report_dropped(controller.live(), controller.looper().synth());
    tracing::info!(
        loop_state = ?controller.looper().state(),
        loop_events = controller.looper().event_count(),
        "performance finished"
    );
    if running.load(Ordering::SeqCst) {
        thread::sleep(TAIL);
    }
    drop(stream);

    println!("Done!");
    Ok(())
}
