// ABOUTME: Output directory handling and atomic file writes
// ABOUTME: Writes go through a temp file + rename so exports are never torn

use crate::{Error, Result};
use std::fs;
use std::path::Path;

/// Creates the output directory, the one fatal precondition of an
/// export run.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| Error::Directory {
        path: dir.to_path_buf(),
        source,
    })
}

/// Writes `content` to `path` through a temp file in the same
/// directory, then renames into place.
pub fn write_atomic(path: &Path, content: &[u8]) -> std::io::Result<()> {
    use rand::Rng;

    let random: u32 = rand::thread_rng().gen();
    let mut tmp_name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    tmp_name.push(format!(".{:x}.part", random));
    let tmp_path = path.with_file_name(tmp_name);

    fs::write(&tmp_path, content)?;
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_dir_creates_nested() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("nested").join("output").join("dir");
        ensure_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_ensure_dir_existing_is_ok() {
        let temp = TempDir::new().unwrap();
        ensure_dir(temp.path()).unwrap();
    }

    #[test]
    fn test_write_atomic_creates_file() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("test.md");
        write_atomic(&target, b"hello").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "hello");
    }

    #[test]
    fn test_write_atomic_overwrites() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("test.md");
        write_atomic(&target, b"first").unwrap();
        write_atomic(&target, b"second").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "second");
    }

    #[test]
    fn test_write_atomic_leaves_no_temp_files() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("test.md");
        write_atomic(&target, b"hello").unwrap();

        let names: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("test.md")]);
    }
}
