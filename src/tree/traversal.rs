//! Reading and filtering the entries of a single directory.

use std::io;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::fs::{EntryMeta, FileSystem};

use super::config::ScanConfig;
use super::filter::EntryFilter;
use super::sort::sort_entries;

/// A directory item that survived filtering.
#[derive(Debug, Clone)]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
    pub meta: EntryMeta,
}

/// List, filter, stat and sort the entries of one directory.
///
/// Stat calls for the directory run concurrently; the results are collected
/// in listing order before sorting. Items whose stat fails are dropped.
pub fn read_entries(
    fs: &dyn FileSystem,
    path: &Path,
    config: &ScanConfig,
) -> io::Result<Vec<Entry>> {
    let filter = EntryFilter::new(config);

    let candidates: Vec<(String, PathBuf)> = fs
        .read_dir(path)?
        .into_iter()
        .map(|name| {
            let full_path = path.join(&name);
            (name.to_string_lossy().to_string(), full_path)
        })
        .filter(|(name, _)| filter.keep_name(name))
        .collect();

    let mut entries: Vec<Entry> = candidates
        .into_par_iter()
        .filter_map(|(name, path)| match fs.stat(&path) {
            Ok(meta) => Some(Entry { name, path, meta }),
            Err(e) => {
                log::debug!("skipping '{}': {}", path.display(), e);
                None
            }
        })
        .collect();

    entries.retain(|entry| filter.keep_entry(&entry.name, &entry.meta));
    sort_entries(&mut entries, config.sort_by);

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::OsFileSystem;
    use std::fs;
    use tempfile::TempDir;

    fn names(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_read_entries_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.txt"), "bb").unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join(".env"), "SECRET=1").unwrap();
        fs::create_dir(dir.path().join("node_modules")).unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();

        let config = ScanConfig::default();
        let entries = read_entries(&OsFileSystem, dir.path(), &config).unwrap();
        assert_eq!(names(&entries), vec!["a.txt", "b.txt", "src"]);
        assert_eq!(entries[1].meta.size, 2);
        assert!(entries[2].meta.is_dir());
    }

    #[test]
    fn test_read_entries_min_size_and_extension() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("tiny.rs"), "x").unwrap();
        fs::write(dir.path().join("big.rs"), "x".repeat(64)).unwrap();
        fs::write(dir.path().join("big.txt"), "x".repeat(64)).unwrap();

        let config = ScanConfig {
            min_file_size: 10,
            file_ext_filter: vec![".rs".to_string()],
            ..Default::default()
        };
        let entries = read_entries(&OsFileSystem, dir.path(), &config).unwrap();
        assert_eq!(names(&entries), vec!["big.rs"]);
    }

    #[test]
    fn test_read_entries_missing_directory() {
        let config = ScanConfig::default();
        assert!(read_entries(&OsFileSystem, Path::new("/nonexistent/dir"), &config).is_err());
    }
}
