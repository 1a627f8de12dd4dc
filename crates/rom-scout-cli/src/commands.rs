use clap::{Parser, Subcommand};
use rom_scout_core::Platform;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "rom-scout")]
#[command(about = "Identify ROM and disc images and recommend emulator settings", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scan a directory tree and identify every media file in it
    Scan {
        /// Root directory to scan
        path: PathBuf,
    },
    /// Analyze a single media file and show everything known about it
    Inspect {
        /// Media file to analyze
        file: PathBuf,
    },
    /// Cache an analysis summary for a media file
    Annotate {
        /// Media file the summary belongs to
        file: PathBuf,
        /// Summary text to store
        #[arg(required = true)]
        summary: Vec<String>,
    },
    /// Show the identity of the attached device
    Device,
    /// Print recommended emulator settings for a platform
    Recommend {
        /// Platform tag (PS2, PS1, GAMECUBE, WII, DREAMCAST, SATURN, PSP)
        platform: Platform,
        /// CPU descriptor; probed from the device when omitted
        #[arg(long)]
        cpu: Option<String>,
    },
    /// Print configuration values
    PrintConfig,
}
