//! GraphWalker - walks a directory tree into a flowchart and totals

use std::path::Path;

use serde::Serialize;

use crate::error::ScanError;
use crate::fs::FileSystem;
use crate::graph::{
    CLASS_COLLAPSE, CLASS_FILE, CLASS_FOLDER, CLASS_HIGHLIGHT, CLASS_LARGE_FILE, GraphDocument,
    NodeIds,
};
use crate::stats::{ScanStats, SubtreeStats};

use super::config::ScanConfig;
use super::traversal::{Entry, read_entries};
use super::utils::{LARGE_FILE_THRESHOLD, format_date, format_size, matches_keyword, safe_name};

/// Rendered chart plus the root's totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    pub chart: String,
    pub stats: ScanStats,
}

/// Walks a directory tree depth-first, emitting one node per folder and file.
///
/// Subdirectories are walked one after another in sorted order, so the same
/// tree always produces the same chart.
pub struct GraphWalker<'a> {
    config: ScanConfig,
    fs: &'a dyn FileSystem,
}

impl<'a> GraphWalker<'a> {
    pub fn new(config: ScanConfig, fs: &'a dyn FileSystem) -> Self {
        Self { config, fs }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan `dir` and render the complete chart.
    ///
    /// Fails only if `dir` itself cannot be listed.
    pub fn scan(&self, dir: &Path) -> Result<ScanResult, ScanError> {
        let mut ids = NodeIds::new();
        let root_id = match safe_name(&self.config.base_name) {
            id if id.is_empty() => ids.claim("root".to_string()),
            id => ids.claim(id),
        };

        let entries =
            read_entries(self.fs, dir, &self.config).map_err(|source| ScanError::ReadRoot {
                path: dir.to_path_buf(),
                source,
            })?;
        let (body, totals) = self.walk_entries(entries, &root_id, 0, &mut ids);

        // The root line is written last so it can carry the final totals
        let stats = ScanStats::new(totals, self.config.human_readable_size);
        let root_label = format!(
            "📁 {} ({} folders, {} files, {})",
            self.config.base_name, stats.folder_count, stats.file_count, stats.formatted_size
        );

        Ok(ScanResult {
            chart: body.into_chart(&root_id, &root_label, &self.config),
            stats,
        })
    }

    /// Walk one directory at `depth`, attaching its items to `parent_id`.
    ///
    /// Directories past the depth limit, and directories that cannot be
    /// listed, yield an empty fragment and zero totals.
    pub fn walk(
        &self,
        path: &Path,
        parent_id: &str,
        depth: usize,
        ids: &mut NodeIds,
    ) -> (GraphDocument, SubtreeStats) {
        if !self.config.within_depth(depth) {
            return (GraphDocument::new(), SubtreeStats::default());
        }

        match read_entries(self.fs, path, &self.config) {
            Ok(entries) => self.walk_entries(entries, parent_id, depth, ids),
            Err(e) => {
                log::debug!("treating '{}' as empty: {}", path.display(), e);
                (GraphDocument::new(), SubtreeStats::default())
            }
        }
    }

    fn walk_entries(
        &self,
        entries: Vec<Entry>,
        parent_id: &str,
        depth: usize,
        ids: &mut NodeIds,
    ) -> (GraphDocument, SubtreeStats) {
        let mut doc = GraphDocument::new();
        let mut stats = SubtreeStats::default();

        for entry in entries {
            let id = ids.claim(safe_name(&format!("{}_{}_{}", parent_id, entry.name, depth)));
            let modified = format_date(entry.meta.modified);
            let highlight = matches_keyword(&entry.name, &self.config.highlight_keywords);

            if entry.meta.is_dir() {
                // Symlinked directories are listed but never entered
                let (child_doc, child_stats) = if entry.meta.is_symlink {
                    (GraphDocument::new(), SubtreeStats::default())
                } else {
                    self.walk(&entry.path, &id, depth + 1, ids)
                };
                stats.record_dir(child_stats);

                // A hidden folder hides everything drawn below it
                if self.config.node_type.shows_folders() {
                    let label = format!(
                        "📁 {} ({} folders, {} files, {}, modified: {})",
                        entry.name,
                        child_stats.folders,
                        child_stats.files,
                        self.size(child_stats.total_size),
                        modified
                    );
                    let mut classes = vec![CLASS_FOLDER];
                    if self.config.collapse_folders {
                        classes.push(CLASS_COLLAPSE);
                    }
                    if highlight {
                        classes.push(CLASS_HIGHLIGHT);
                    }
                    doc.edge(parent_id, &id);
                    doc.node(&id, &label, &classes);
                    doc.append(child_doc);
                }
            } else if entry.meta.is_file() {
                let size = entry.meta.size;
                stats.record_file(size);

                if self.config.node_type.shows_files() {
                    let label = format!(
                        "📄 {} ({}, modified: {})",
                        entry.name,
                        self.size(size),
                        modified
                    );
                    let mut classes = vec![if size > LARGE_FILE_THRESHOLD {
                        CLASS_LARGE_FILE
                    } else {
                        CLASS_FILE
                    }];
                    if highlight {
                        classes.push(CLASS_HIGHLIGHT);
                    }
                    doc.edge(parent_id, &id);
                    doc.node(&id, &label, &classes);
                }
            }
        }

        (doc, stats)
    }

    fn size(&self, bytes: u64) -> String {
        format_size(bytes, self.config.human_readable_size)
    }
}
