// ABOUTME: Granola cache locator and two-layer JSON decoder
// ABOUTME: The cache nests a JSON string inside a JSON wrapper object

use crate::{CacheState, Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Extracts the version number from cache-vN.json filenames.
static CACHE_VERSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^cache-v(\d+)\.json$").unwrap());

/// Outer wrapper: the whole application state is serialized as a JSON
/// string under the "cache" key.
#[derive(Deserialize)]
struct OuterCache {
    #[serde(default)]
    cache: String,
}

#[derive(Deserialize)]
struct InnerCache {
    #[serde(default)]
    state: CacheState,
}

/// Returns the directory Granola keeps its cache files in.
pub fn default_cache_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join("Library").join("Application Support").join("Granola"))
}

/// Finds the latest Granola cache file in the default directory.
pub fn find_cache_file() -> Result<PathBuf> {
    let dir = default_cache_dir().ok_or_else(|| {
        Error::Filesystem(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "could not determine home directory",
        ))
    })?;
    find_cache_file_in(&dir)
}

/// Finds the cache-vN.json file with the highest version number in `dir`.
pub fn find_cache_file_in(dir: &Path) -> Result<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::CacheNotFound(dir.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    let mut best: Option<(u64, PathBuf)> = None;
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        let Some(caps) = CACHE_VERSION_RE.captures(name) else {
            continue;
        };
        // Versions too large for u64 would be malformed anyway.
        let Ok(version) = caps[1].parse::<u64>() else {
            continue;
        };
        if best.as_ref().map_or(true, |(v, _)| version > *v) {
            best = Some((version, entry.path()));
        }
    }

    best.map(|(_, path)| path)
        .ok_or_else(|| Error::CacheNotFound(dir.to_path_buf()))
}

/// Returns the size of the cache file in bytes, for reporting.
pub fn cache_size(path: &Path) -> Result<u64> {
    Ok(fs::metadata(path)?.len())
}

/// Loads and decodes the Granola cache from a file path.
pub fn load_cache(path: &Path) -> Result<CacheState> {
    let data = fs::read(path)?;
    parse_cache(&data)
}

/// Decodes the Granola cache from raw bytes.
///
/// The outer JSON object carries a "cache" field whose string value is
/// itself a JSON document with the actual state. Both layers must parse;
/// a missing "documents" or "transcripts" key inside the state decodes
/// as an empty map rather than an error.
pub fn parse_cache(data: &[u8]) -> Result<CacheState> {
    let outer: OuterCache = serde_json::from_slice(data)
        .map_err(|e| Error::Decode(format!("failed to parse outer cache JSON: {}", e)))?;

    if outer.cache.is_empty() {
        return Err(Error::Decode("cache field is empty".into()));
    }

    let inner: InnerCache = serde_json::from_str(&outer.cache)
        .map_err(|e| Error::Decode(format!("failed to parse inner cache JSON: {}", e)))?;

    Ok(inner.state)
}
