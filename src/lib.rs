// ABOUTME: Public library API for the granary exporter
// ABOUTME: Re-exports core modules for external use

pub mod cache;
pub mod cli;
pub mod convert;
pub mod error;
pub mod export;
pub mod extract;
pub mod model;
pub mod storage;
pub mod util;

pub use error::{Error, Result};
pub use export::{ExportError, ExportResult, Exporter};
pub use model::{CacheState, Document, TranscriptEntry};
