// ABOUTME: Error types with structured exit codes for CLI
// ABOUTME: Maps fatal run errors to specific exit codes for shell scripting

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no Granola cache files found in {}\nExpected to find cache-v*.json files", .0.display())]
    CacheNotFound(PathBuf),

    #[error("Cache decode error: {0}")]
    Decode(String),

    #[error("failed to create output directory {}: {source}", .path.display())]
    Directory {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Filesystem error: {0}")]
    Filesystem(#[from] std::io::Error),
}

impl Error {
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::CacheNotFound(_) => 2,
            Error::Decode(_) => 3,
            Error::Directory { .. } => 4,
            Error::Filesystem(_) => 5,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
