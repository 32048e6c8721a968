//! Loopsynth CLI - Render and play looper performances.

mod commands;
mod live;
mod script;
mod session;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "loopsynth")]
#[command(author, version, about = "Polyphonic synth and MIDI looper", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a performance script to a WAV file
    Render(commands::render::RenderArgs),

    /// Play a performance script on an audio device
    Play(commands::play::PlayArgs),

    /// Play from MIDI bytes or commands typed or piped on stdin
    Live(commands::live::LiveArgs),

    /// List audio output devices
    Devices(commands::devices::DevicesArgs),

    /// Create or check engine configuration files
    Config(commands::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render(args) => commands::render::run(args),
        Commands::Play(args) => commands::play::run(args),
        Commands::Live(args) => commands::live::run(args),
        Commands::Devices(args) => commands::devices::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
