//! Entrain CLI - Binaural Beat Session Generator
//!
//! Command-line interface for rendering and exporting binaural sessions.

use clap::Parser;
use env_logger::Env;
use log::info;

use entrain::cli::{commands, Cli, Commands};
use entrain::Result;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    info!("Entrain v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(cmd) => handle_command(cmd),
        None => {
            println!("Entrain v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

fn handle_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Presets { json } => commands::list_presets(json),
        Commands::Export {
            preset,
            base,
            beat,
            duration,
            volume,
            sample_rate,
            output_dir,
        } => commands::export(
            preset.as_deref(),
            base,
            beat,
            duration,
            volume,
            sample_rate,
            &output_dir,
        ),
        Commands::ChannelTest {
            side,
            sample_rate,
            output,
        } => commands::channel_test(side, sample_rate, output),
    }
}
