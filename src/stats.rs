//! Aggregate folder/file statistics and their display
//!
//! Every recursive walk returns a [`SubtreeStats`] that its parent folds in.
//! The root's totals become the [`ScanStats`] summary returned to callers.

use serde::Serialize;
use std::io::{self, Write};
use std::ops::AddAssign;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::tree::format_size;

/// Totals for everything below one directory (the directory itself excluded).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubtreeStats {
    pub folders: usize,
    pub files: usize,
    pub total_size: u64,
}

impl SubtreeStats {
    /// Count one file of `size` bytes.
    pub fn record_file(&mut self, size: u64) {
        self.files += 1;
        self.total_size += size;
    }

    /// Count one directory together with everything below it.
    pub fn record_dir(&mut self, child: SubtreeStats) {
        self.folders += 1;
        *self += child;
    }
}

impl AddAssign for SubtreeStats {
    fn add_assign(&mut self, other: SubtreeStats) {
        self.folders += other.folders;
        self.files += other.files;
        self.total_size += other.total_size;
    }
}

/// Summary of a complete scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanStats {
    pub folder_count: usize,
    pub file_count: usize,
    pub total_size: u64,
    pub formatted_size: String,
}

impl ScanStats {
    pub fn new(totals: SubtreeStats, human_readable: bool) -> Self {
        Self {
            folder_count: totals.folders,
            file_count: totals.files,
            total_size: totals.total_size,
            formatted_size: format_size(totals.total_size, human_readable),
        }
    }
}

/// Print the summary to stderr with optional color.
pub fn print_summary(name: &str, stats: &ScanStats, use_color: bool) -> io::Result<()> {
    let color_choice = if use_color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stderr = StandardStream::stderr(color_choice);

    let mut bold = ColorSpec::new();
    bold.set_bold(true);
    stderr.set_color(&bold)?;
    writeln!(stderr, "{}", name)?;
    stderr.reset()?;

    let mut value = ColorSpec::new();
    value.set_fg(Some(Color::Cyan));

    for (label, text) in [
        ("Folders:", stats.folder_count.to_string()),
        ("Files:", stats.file_count.to_string()),
        ("Size:", stats.formatted_size.clone()),
    ] {
        write!(stderr, "  {:<10}", label)?;
        stderr.set_color(&value)?;
        writeln!(stderr, "{}", text)?;
        stderr.reset()?;
    }

    Ok(())
}

/// Write the summary as pretty-printed JSON to `out`.
pub fn print_summary_json(stats: &ScanStats, out: &mut impl Write) -> io::Result<()> {
    let json = serde_json::to_string_pretty(stats).map_err(io::Error::other)?;
    writeln!(out, "{}", json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_file_and_dir() {
        let mut child = SubtreeStats::default();
        child.record_file(100);

        let mut root = SubtreeStats::default();
        root.record_file(50);
        root.record_dir(child);

        assert_eq!(
            root,
            SubtreeStats {
                folders: 1,
                files: 2,
                total_size: 150,
            }
        );
    }

    #[test]
    fn test_nested_dirs_accumulate() {
        let mut leaf = SubtreeStats::default();
        leaf.record_file(10);
        let mut middle = SubtreeStats::default();
        middle.record_dir(leaf);
        let mut root = SubtreeStats::default();
        root.record_dir(middle);

        assert_eq!(root.folders, 2);
        assert_eq!(root.files, 1);
        assert_eq!(root.total_size, 10);
    }

    #[test]
    fn test_scan_stats_formatting() {
        let totals = SubtreeStats {
            folders: 1,
            files: 2,
            total_size: 2048,
        };
        assert_eq!(ScanStats::new(totals, true).formatted_size, "2.0 KB");
        assert_eq!(ScanStats::new(totals, false).formatted_size, "2048 B");
    }

    #[test]
    fn test_scan_stats_json_keys() {
        let stats = ScanStats::new(
            SubtreeStats {
                folders: 1,
                files: 2,
                total_size: 150,
            },
            true,
        );
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["folderCount"], 1);
        assert_eq!(json["fileCount"], 2);
        assert_eq!(json["totalSize"], 150);
        assert_eq!(json["formattedSize"], "150 B");
    }

    #[test]
    fn test_print_summary_json_to_writer() {
        let stats = ScanStats::new(
            SubtreeStats {
                folders: 0,
                files: 1,
                total_size: 1280,
            },
            true,
        );
        let mut out = Vec::new();
        print_summary_json(&stats, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\"fileCount\": 1"));
        assert!(text.contains("\"formattedSize\": \"1.3 KB\""));
        assert!(text.ends_with("}\n"));
    }
}
