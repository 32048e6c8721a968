//! Engine configuration command.

use crate::session::load_config;
use clap::{Args, Subcommand};
use loopsynth_config::EngineConfig;
use std::path::PathBuf;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the default configuration, or write it to a file
    Init {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a configuration file and print the resolved settings
    Check {
        /// Configuration file
        path: PathBuf,
    },
}

pub fn run(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Init { output } => {
            let config = EngineConfig::default();
            match output {
                Some(path) => {
                    config.save(&path)?;
                    println!("Wrote {}", path.display());
                }
                None => print!("{}", config.to_toml()?),
            }
        }
        ConfigCommand::Check { path } => {
            let config = load_config(Some(&path))?;
            println!("{} is valid\n", path.display());
            print!("{}", config.to_toml()?);
        }
    }
    Ok(())
}
