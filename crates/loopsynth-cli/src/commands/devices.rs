//! Audio device listing command.

use clap::{Args, Subcommand};
use loopsynth_io::{default_output_device, list_output_devices};

#[derive(Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    command: Option<DevicesCommand>,
}

#[derive(Subcommand)]
enum DevicesCommand {
    /// List all output devices
    List,

    /// Show default output device information
    Info,
}

pub fn run(args: DevicesArgs) -> anyhow::Result<()> {
    match args.command.unwrap_or(DevicesCommand::List) {
        DevicesCommand::List => {
            let devices = list_output_devices()?;

            if devices.is_empty() {
                println!("No output devices found.");
                return Ok(());
            }

            println!("Output Devices");
            println!("==============\n");
            for device in &devices {
                let default = if device.is_default { " (default)" } else { "" };
                println!(
                    "  [{}] {} ({} Hz, {} ch){}",
                    device.index,
                    device.name,
                    device.default_sample_rate,
                    device.channels,
                    default
                );
            }
            println!();
            println!("Tip: Use device index or partial name with --device:");
            println!("  loopsynth play --script perf.toml --device 0");
        }

        DevicesCommand::Info => match default_output_device()? {
            Some(device) => {
                println!("Default Output Device");
                println!("=====================\n");
                println!("  Name:        {}", device.name);
                println!("  Sample rate: {} Hz", device.default_sample_rate);
                println!("  Channels:    {}", device.channels);
            }
            None => println!("No default output device."),
        },
    }

    Ok(())
}
