//! Filesystem access used by the walker and the output stage
//!
//! Everything that touches the disk goes through [`FileSystem`] so the
//! traversal can be exercised against injected failures in tests.

use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// What kind of item a path points at (after following symlinks).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    Other,
}

/// The subset of file metadata the scanner needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryMeta {
    pub kind: EntryKind,
    pub size: u64,
    pub modified: SystemTime,
    /// The path itself is a symlink; `kind` describes its target.
    pub is_symlink: bool,
}

impl EntryMeta {
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }
}

/// Filesystem provider.
///
/// Implementations must be `Sync`: stat calls for one directory are issued
/// concurrently.
pub trait FileSystem: Sync {
    /// List the names of the entries in a directory, in no particular order.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<OsString>>;

    /// Metadata for a path, following symlinks.
    fn stat(&self, path: &Path) -> io::Result<EntryMeta>;

    /// Create a directory and all of its missing parents.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Write a UTF-8 document, replacing any existing file.
    fn write_file(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<OsString>> {
        std::fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.file_name()))
            .collect()
    }

    fn stat(&self, path: &Path) -> io::Result<EntryMeta> {
        let is_symlink = std::fs::symlink_metadata(path)?.file_type().is_symlink();
        // Broken symlinks fail here and are skipped by the caller
        let meta = std::fs::metadata(path)?;

        let kind = if meta.is_dir() {
            EntryKind::Dir
        } else if meta.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        };

        Ok(EntryMeta {
            kind,
            size: meta.len(),
            modified: meta.modified().unwrap_or(UNIX_EPOCH),
            is_symlink,
        })
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn write_file(&self, path: &Path, contents: &str) -> io::Result<()> {
        std::fs::write(path, contents)
    }
}
