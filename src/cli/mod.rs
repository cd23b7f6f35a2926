//! CLI Module
//!
//! Command-line interface for the Entrain session engine.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::engine::renderer::StereoSide;

/// Entrain - binaural beat session generator
#[derive(Parser, Debug)]
#[command(name = "entrain")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the built-in presets
    #[command(name = "presets")]
    Presets {
        /// Emit the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render a session and export it as a WAV file
    #[command(name = "export")]
    Export {
        /// Preset id to export (see `presets`)
        #[arg(short, long, conflicts_with_all = ["base", "beat", "duration"])]
        preset: Option<String>,

        /// Base frequency in Hz (custom session)
        #[arg(long)]
        base: Option<f64>,

        /// Beat frequency in Hz (custom session)
        #[arg(long)]
        beat: Option<f64>,

        /// Session duration in minutes (custom session)
        #[arg(long)]
        duration: Option<f64>,

        /// Output volume, 0.0 to 1.0
        #[arg(long, default_value_t = 1.0)]
        volume: f32,

        /// Output sample rate in Hz
        #[arg(long, default_value_t = 44100)]
        sample_rate: u32,

        /// Directory to write the WAV file into
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Export a short one-sided test tone to verify channel routing
    #[command(name = "channel-test")]
    ChannelTest {
        /// Which ear the tone should play in
        side: SideArg,

        /// Output sample rate in Hz
        #[arg(long, default_value_t = 44100)]
        sample_rate: u32,

        /// Output file path (defaults to channel_test_<side>.wav)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Stereo side as a CLI argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SideArg {
    Left,
    Right,
}

impl SideArg {
    /// Map the CLI argument onto the renderer's side type
    pub fn to_side(self) -> StereoSide {
        match self {
            SideArg::Left => StereoSide::Left,
            SideArg::Right => StereoSide::Right,
        }
    }

    /// Lowercase name used in default file names
    pub fn name(self) -> &'static str {
        match self {
            SideArg::Left => "left",
            SideArg::Right => "right",
        }
    }
}
