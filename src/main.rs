// ABOUTME: CLI entrypoint for the granary command
// ABOUTME: Handles error exit codes and the one-shot export run

use clap::Parser;
use granary::{cache, cli::Cli, export, Error, Exporter, Result};
use std::path::PathBuf;

fn main() {
    if let Err(e) = run() {
        eprintln!("granary: [E{}] {}", e.exit_code(), e);
        std::process::exit(e.exit_code());
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let cache_path = match cli.cache_file {
        Some(path) => path,
        None => cache::find_cache_file()?,
    };

    println!("Loading cache from: {}", cache_path.display());

    let size_mb = cache::cache_size(&cache_path)? as f64 / 1024.0 / 1024.0;
    println!("Cache size: {:.1} MB\n", size_mb);

    println!("Parsing cache...");
    let state = cache::load_cache(&cache_path)?;

    println!("Found {} documents", state.documents.len());
    println!("Found {} transcripts\n", state.transcripts.len());

    let output_dir = resolve_output_dir(cli.output_dir)?;
    let exporter = Exporter::new(&output_dir);
    let result = exporter.export(&state, cli.verbose)?;

    result.print_summary(&output_dir);

    Ok(())
}

fn resolve_output_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    export::default_output_dir().ok_or_else(|| {
        Error::Filesystem(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "could not determine home directory; pass --output-dir",
        ))
    })
}
