use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "playshell")]
#[command(author, version, about = "Engine-driving core of a desktop media player shell")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Play a media file, resuming and saving its per-file settings
    Play {
        /// File to play
        #[arg(required = true)]
        file: PathBuf,

        /// Do not load or save per-file settings
        #[arg(long)]
        fresh: bool,
    },

    /// Show the saved settings for a media file
    Info {
        /// File to look up
        #[arg(required = true)]
        file: PathBuf,
    },

    /// Print the content hash used as a file's settings identity
    Hash {
        /// File to hash
        #[arg(required = true)]
        file: PathBuf,
    },

    /// Check that the playback engine is available
    CheckTools,
}
