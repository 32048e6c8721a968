//! Real-time play from MIDI input read on stdin.
//!
//! Pipe a MIDI dump into it, e.g. `amidi -p hw:1 -d | loopsynth live`, or
//! type commands by hand. See [`crate::live`] for the line format.

use crate::live::LiveInput;
use crate::session::{OutputEngine, controller, load_config, report_dropped, start_output};
use clap::Args;
use crossbeam_channel::{RecvTimeoutError, bounded};
use loopsynth_looper::SystemClock;
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

/// Control loop period.
const TICK: Duration = Duration::from_millis(1);

/// Input lines buffered between the reader thread and the control loop.
const INPUT_QUEUE: usize = 256;

#[derive(Args)]
pub struct LiveArgs {
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

pub fn run(args: LiveArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;

    let OutputEngine {
        live,
        looped,
        stream,
    } = start_output(&config, args.device, args.buffer_size)?;

    println!("Live input on stdin");
    println!("  Output: {}", stream.device_name());
    println!("  Sample rate: {} Hz", stream.sample_rate());
    println!("\nHex MIDI bytes (90 3C 64) or: on/off/program/cc/press/long/panic/quit");
    println!("Press Ctrl+C or close stdin to stop...\n");

    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        println!("\nStopping...");
        r.store(false, Ordering::SeqCst);
    })?;

    let (line_tx, line_rx) = bounded::<String>(INPUT_QUEUE);
    thread::Builder::new()
        .name("stdin-midi".into())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if line_tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "stdin read failed");
                        break;
                    }
                }
            }
        })?;

    let mut controller = controller(&config, live, looped, SystemClock::new());
    let mut lines = 0u64;

    while running.load(Ordering::SeqCst) {
        match line_rx.recv_timeout(TICK) {
            Ok(line) => match LiveInput::parse(&line) {
                Ok(Some(input)) => {
                    lines += 1;
                    if !input.perform(&mut controller) {
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => eprintln!("{e:#}"),
            },
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                tracing::info!("input closed");
                break;
            }
        }
        controller.tick();
    }

    controller.all_notes_off();
    report_dropped(controller.live(), controller.looper().synth());
    tracing::info!(
        lines,
        loop_state = ?controller.looper().state(),
        loop_events = controller.looper().event_count(),
        "live session finished"
    );
    // Let the final releases reach the device.
    thread::sleep(Duration::from_millis(300));
    drop(stream);

    println!("Done!");
    Ok(())
}
