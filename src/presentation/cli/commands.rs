//! CLI commands using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// A forensic file carving and recovery tool.
#[derive(Parser)]
#[command(name = "filerescue")]
#[command(version = "0.1.0")]
#[command(about = "Recover deleted files from raw disk images and block devices", long_about = None)]
pub struct Cli {
    /// Enable verbose (info-level) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug-level logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a device or image and recover every file signature found
    Scan {
        /// Path to device or image file (e.g. /dev/sdb, disk.img)
        #[arg(short = 'D', long)]
        device: String,

        /// Output directory for recovered files
        #[arg(short, long, default_value = "./recovered")]
        output: PathBuf,

        /// Restrict recovery to these extensions (e.g. jpg,png,pdf)
        #[arg(short = 't', long = "types", value_delimiter = ',')]
        types: Option<Vec<String>>,

        /// Window size in MiB read per pass
        #[arg(long = "window-size-mb", default_value_t = crate::application::dto::DEFAULT_WINDOW_SIZE_MB)]
        window_size_mb: u64,

        /// Maximum size in MiB a single recovered file may reach
        #[arg(long = "max-file-size-mb", default_value_t = crate::application::dto::DEFAULT_MAX_FILE_SIZE_MB)]
        max_file_size_mb: u64,

        /// Use a memory-mapped reader instead of buffered reads
        #[arg(long)]
        mmap: bool,

        /// Write `scan_summary.json` alongside the plain-text summary
        #[arg(long = "json-summary")]
        json_summary: bool,
    },

    /// List every signature this tool recognises
    ListSignatures,

    /// Show device size and filesystem information without carving
    Info {
        /// Path to device or image file
        #[arg(short = 'D', long)]
        device: String,
    },

    /// Reprint the summary of a previous scan without rescanning
    Review {
        /// Output directory produced by a previous `scan`
        #[arg(short, long)]
        output: PathBuf,
    },
}
