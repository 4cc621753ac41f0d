// ABOUTME: Command-line interface definitions using clap
// ABOUTME: One-shot export run with a few override flags

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "granary")]
#[command(about = "Export Granola meeting notes and transcripts to markdown", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Custom output directory (default: ~/.local/share/granola-transcripts)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Use a specific cache file instead of locating the newest one
    #[arg(long)]
    pub cache_file: Option<PathBuf>,

    /// Print a line per exported file instead of a progress bar
    #[arg(short, long)]
    pub verbose: bool,
}
