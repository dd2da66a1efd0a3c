//! Entry filtering for tree walking

use std::path::Path;

use crate::fs::EntryMeta;

use super::config::ScanConfig;
use super::utils::glob_match;

/// Decides which directory entries take part in a scan.
///
/// Name checks run before any metadata is fetched; size and extension
/// checks need the entry's metadata and apply to files only.
pub struct EntryFilter<'a> {
    config: &'a ScanConfig,
}

impl<'a> EntryFilter<'a> {
    pub fn new(config: &'a ScanConfig) -> Self {
        Self { config }
    }

    /// Check a name against the exclusion list and the hidden-file policy.
    pub fn keep_name(&self, name: &str) -> bool {
        if self.is_excluded(name) {
            return false;
        }
        if !self.config.show_hidden && name.starts_with('.') {
            return false;
        }
        true
    }

    /// Exact name match, or a glob match for caller-supplied patterns.
    pub fn is_excluded(&self, name: &str) -> bool {
        self.config
            .exclude_names
            .iter()
            .any(|pattern| name == pattern || glob_match(pattern, name))
    }

    /// Check a stat'ed entry. Directories always pass.
    pub fn keep_entry(&self, name: &str, meta: &EntryMeta) -> bool {
        if !meta.is_file() {
            return true;
        }
        if meta.size < self.config.min_file_size {
            return false;
        }
        self.extension_allowed(name)
    }

    /// Whether a file name passes the extension allow-list.
    ///
    /// List entries match with or without the leading dot. A file with no
    /// extension (including dotfiles like `.env`) only passes an empty list.
    pub fn extension_allowed(&self, name: &str) -> bool {
        if self.config.file_ext_filter.is_empty() {
            return true;
        }
        let Some(ext) = Path::new(name).extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.config
            .file_ext_filter
            .iter()
            .any(|allowed| allowed.trim_start_matches('.') == ext)
    }
}
