//! Scan configuration: caller options and their resolved form

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Names that are always excluded from a scan.
pub const DEFAULT_EXCLUDES: [&str; 2] = ["node_modules", ".git"];

pub const DEFAULT_FOLDER_COLOR: &str = "#f9f";
pub const DEFAULT_FILE_COLOR: &str = "#bbf";
pub const DEFAULT_LARGE_FILE_COLOR: &str = "#f99";

/// Order in which the items of one directory are emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Ascending by name
    #[default]
    Name,
    /// Largest first
    Size,
    /// Most recently modified first
    Date,
}

/// Which kinds of nodes appear in the chart.
///
/// Only emission is affected. Counts and sizes always cover both kinds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Folder,
    File,
    #[default]
    Both,
}

impl NodeType {
    pub fn shows_folders(self) -> bool {
        matches!(self, NodeType::Folder | NodeType::Both)
    }

    pub fn shows_files(self) -> bool {
        matches!(self, NodeType::File | NodeType::Both)
    }
}

/// Caller-supplied scan options. Every field is optional; unset fields take
/// their defaults in [`ScanConfig::resolve`].
///
/// Deserializes from the camelCase keys used by JSON option files.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScanOptions {
    pub base_name: Option<String>,
    pub file_ext_filter: Vec<String>,
    pub exclude_names: Vec<String>,
    /// `None` means unbounded.
    pub max_depth: Option<usize>,
    pub folder_color: Option<String>,
    pub file_color: Option<String>,
    pub large_file_color: Option<String>,
    pub show_hidden: Option<bool>,
    pub sort_by: Option<SortBy>,
    pub node_type: Option<NodeType>,
    pub human_readable_size: Option<bool>,
    pub highlight_keywords: Vec<String>,
    pub min_file_size: Option<u64>,
    pub collapse_folders: Option<bool>,
}

impl ScanOptions {
    /// Layer `other` on top of `self`: set fields and non-empty lists in
    /// `other` win.
    pub fn overlay(self, other: ScanOptions) -> ScanOptions {
        fn list(base: Vec<String>, top: Vec<String>) -> Vec<String> {
            if top.is_empty() { base } else { top }
        }

        ScanOptions {
            base_name: other.base_name.or(self.base_name),
            file_ext_filter: list(self.file_ext_filter, other.file_ext_filter),
            exclude_names: list(self.exclude_names, other.exclude_names),
            max_depth: other.max_depth.or(self.max_depth),
            folder_color: other.folder_color.or(self.folder_color),
            file_color: other.file_color.or(self.file_color),
            large_file_color: other.large_file_color.or(self.large_file_color),
            show_hidden: other.show_hidden.or(self.show_hidden),
            sort_by: other.sort_by.or(self.sort_by),
            node_type: other.node_type.or(self.node_type),
            human_readable_size: other.human_readable_size.or(self.human_readable_size),
            highlight_keywords: list(self.highlight_keywords, other.highlight_keywords),
            min_file_size: other.min_file_size.or(self.min_file_size),
            collapse_folders: other.collapse_folders.or(self.collapse_folders),
        }
    }
}

/// Fully resolved, immutable scan configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Label of the root node
    pub base_name: String,
    /// Allowed file extensions; empty allows everything
    pub file_ext_filter: Vec<String>,
    /// Default exclusions followed by caller exclusions
    pub exclude_names: Vec<String>,
    pub max_depth: Option<usize>,
    pub folder_color: String,
    pub file_color: String,
    pub large_file_color: String,
    pub show_hidden: bool,
    pub sort_by: SortBy,
    pub node_type: NodeType,
    pub human_readable_size: bool,
    pub highlight_keywords: Vec<String>,
    /// Files strictly smaller than this are skipped entirely
    pub min_file_size: u64,
    pub collapse_folders: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            base_name: ".".to_string(),
            file_ext_filter: Vec::new(),
            exclude_names: DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
            max_depth: None,
            folder_color: DEFAULT_FOLDER_COLOR.to_string(),
            file_color: DEFAULT_FILE_COLOR.to_string(),
            large_file_color: DEFAULT_LARGE_FILE_COLOR.to_string(),
            show_hidden: false,
            sort_by: SortBy::Name,
            node_type: NodeType::Both,
            human_readable_size: true,
            highlight_keywords: Vec::new(),
            min_file_size: 0,
            collapse_folders: false,
        }
    }
}

impl ScanConfig {
    /// Merge caller options over the defaults for a scan of `dir`.
    pub fn resolve(dir: &Path, options: ScanOptions) -> Self {
        let defaults = ScanConfig::default();

        let mut exclude_names = defaults.exclude_names;
        for name in options.exclude_names {
            if !exclude_names.contains(&name) {
                exclude_names.push(name);
            }
        }

        Self {
            base_name: options
                .base_name
                .unwrap_or_else(|| default_base_name(dir)),
            file_ext_filter: options.file_ext_filter,
            exclude_names,
            max_depth: options.max_depth,
            folder_color: options.folder_color.unwrap_or(defaults.folder_color),
            file_color: options.file_color.unwrap_or(defaults.file_color),
            large_file_color: options
                .large_file_color
                .unwrap_or(defaults.large_file_color),
            show_hidden: options.show_hidden.unwrap_or(defaults.show_hidden),
            sort_by: options.sort_by.unwrap_or(defaults.sort_by),
            node_type: options.node_type.unwrap_or(defaults.node_type),
            human_readable_size: options
                .human_readable_size
                .unwrap_or(defaults.human_readable_size),
            highlight_keywords: options.highlight_keywords,
            min_file_size: options.min_file_size.unwrap_or(defaults.min_file_size),
            collapse_folders: options.collapse_folders.unwrap_or(defaults.collapse_folders),
        }
    }

    /// Whether directories at `depth` are still descended into.
    pub fn within_depth(&self, depth: usize) -> bool {
        self.max_depth.is_none_or(|max| depth <= max)
    }
}

/// Name of the last component of `dir` once made absolute.
fn default_base_name(dir: &Path) -> String {
    let absolute = std::fs::canonicalize(dir).unwrap_or_else(|_| {
        if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(dir)
        }
    });

    absolute
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| absolute.display().to_string())
}
