//! Byte-level storage primitives used by the plan store.
//!
//! The planner never calls `std::fs` directly; it goes through
//! [`PlanStorage`] so the read/write/delete primitive can be swapped, e.g. for
//! a backend whose deletes fail.

use std::{fs, io, path::Path};

/// What currently sits at a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Nothing exists at the path
    Missing,
    /// A regular file (or a symlink to one)
    File,
    /// A directory
    Directory,
    /// Something else, such as a socket or a FIFO
    Other,
}

/// Read/write/delete primitive consumed by the plan store.
pub trait PlanStorage: Send + Sync {
    /// Classifies the entry at `path`.
    fn kind(&self, path: &Path) -> EntryKind;

    /// Reads the whole file as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Replaces the file contents, creating parent directories as needed.
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Deletes the file. A missing file is not an error.
    fn remove(&self, path: &Path) -> io::Result<()>;
}

/// [`PlanStorage`] backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStorage;

impl PlanStorage for FsStorage {
    fn kind(&self, path: &Path) -> EntryKind {
        match fs::metadata(path) {
            Ok(meta) if meta.is_file() => EntryKind::File,
            Ok(meta) if meta.is_dir() => EntryKind::Directory,
            Ok(_) => EntryKind::Other,
            Err(e) if e.kind() == io::ErrorKind::NotFound => EntryKind::Missing,
            Err(_) => EntryKind::Other,
        }
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        match fs::remove_file(path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_write_creates_parents_and_reads_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("plan.md");

        FsStorage.write(&path, "hello").unwrap();

        assert_eq!(FsStorage.kind(&path), EntryKind::File);
        assert_eq!(FsStorage.read_to_string(&path).unwrap(), "hello");
        assert_eq!(
            FsStorage.kind(&temp_dir.path().join("nested")),
            EntryKind::Directory
        );
    }

    #[test]
    fn test_remove_missing_is_ok() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.md");
        assert_eq!(FsStorage.kind(&path), EntryKind::Missing);
        FsStorage.remove(&path).unwrap();
    }

    #[test]
    fn test_remove_deletes_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("plan.md");
        FsStorage.write(&path, "x").unwrap();
        FsStorage.remove(&path).unwrap();
        assert_eq!(FsStorage.kind(&path), EntryKind::Missing);
    }
}
