use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vidsplit")]
#[command(author, version, about = "Split large media files into fixed-duration segments")]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split a media file into fixed-duration segments
    Split {
        /// Input media file
        #[arg(required = true)]
        input: PathBuf,

        /// Duration of each segment in seconds (e.g. 1800 for 30 minutes)
        #[arg(short, long)]
        duration: u64,

        /// Show the computed plan without invoking ffmpeg
        #[arg(long)]
        dry_run: bool,

        /// Print the dry-run plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Probe a media file and display its duration
    Probe {
        /// File to probe
        #[arg(required = true)]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that required external tools are available
    CheckTools,

    /// Display version information
    Version,
}
