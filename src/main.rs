//! CLI entry point for dirgraph

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use dirgraph::{
    NodeType, OsFileSystem, RunOptions, ScanOptions, SortBy, SystemRunner, init, print_summary,
    print_summary_json,
};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            // The summary goes to stderr
            std::io::stderr().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "dirgraph")]
#[command(about = "Render a directory tree as a Mermaid flowchart with counts and sizes")]
#[command(version)]
struct Args {
    /// Directory to scan
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Load options from a JSON file (flags given here take precedence)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Label of the root node (default: directory name)
    #[arg(long = "base-name")]
    base_name: Option<String>,

    /// Only include files with this extension (can be used multiple times)
    #[arg(short = 'e', long = "ext", value_name = "EXT")]
    ext: Vec<String>,

    /// Exclude entries with this name or glob (can be used multiple times)
    #[arg(short = 'I', long = "exclude", value_name = "NAME")]
    exclude: Vec<String>,

    /// Do not descend into directories deeper than N
    #[arg(short = 'L', long = "max-depth", value_name = "N")]
    max_depth: Option<usize>,

    /// Fill color for folder nodes
    #[arg(long = "folder-color", value_name = "COLOR")]
    folder_color: Option<String>,

    /// Fill color for file nodes
    #[arg(long = "file-color", value_name = "COLOR")]
    file_color: Option<String>,

    /// Fill color for files over 1 MB
    #[arg(long = "large-file-color", value_name = "COLOR")]
    large_file_color: Option<String>,

    /// Include dotfiles and dot-directories
    #[arg(short = 'a', long = "show-hidden")]
    show_hidden: bool,

    /// Order of entries within each directory
    #[arg(long = "sort", value_name = "KEY")]
    sort: Option<SortBy>,

    /// Which nodes to draw (counts always include both)
    #[arg(long = "node-type", value_name = "TYPE")]
    node_type: Option<NodeType>,

    /// Show sizes in raw bytes instead of KB/MB
    #[arg(long = "bytes")]
    bytes: bool,

    /// Highlight entries whose name contains KEYWORD (case-insensitive)
    #[arg(short = 'k', long = "highlight", value_name = "KEYWORD")]
    highlight: Vec<String>,

    /// Skip files smaller than SIZE. Use suffixes: K, M, G (e.g., 10K)
    #[arg(long = "min-size", value_name = "SIZE", value_parser = parse_file_size)]
    min_size: Option<u64>,

    /// Style folders with the dashed `collapse` class
    #[arg(long = "collapse")]
    collapse: bool,

    /// Write the chart to this file instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<String>,

    /// Directory for --output (created if missing)
    #[arg(long = "output-dir", value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Render the written chart to an image with mmdc (png, svg, pdf)
    #[arg(long = "export", value_name = "FORMAT")]
    export: Option<String>,

    /// Print the summary as JSON (on stderr when the chart goes to stdout)
    #[arg(long = "json")]
    json: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Log written files and exported images
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

impl Args {
    fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            base_name: self.base_name.clone(),
            file_ext_filter: self.ext.clone(),
            exclude_names: self.exclude.clone(),
            max_depth: self.max_depth,
            folder_color: self.folder_color.clone(),
            file_color: self.file_color.clone(),
            large_file_color: self.large_file_color.clone(),
            show_hidden: self.show_hidden.then_some(true),
            sort_by: self.sort,
            node_type: self.node_type,
            human_readable_size: self.bytes.then_some(false),
            highlight_keywords: self.highlight.clone(),
            min_file_size: self.min_size,
            collapse_folders: self.collapse.then_some(true),
        }
    }
}

/// Parse a file size string like "5M", "100K", "1G" into bytes.
/// Supports suffixes: K/KB (1024), M/MB (1024^2), G/GB (1024^3)
/// Without suffix, interprets as bytes.
fn parse_file_size(s: &str) -> Result<u64, String> {
    let s = s.trim().to_uppercase();
    let (num_str, multiplier) = if let Some(n) = s.strip_suffix("GB") {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = s.strip_suffix('G') {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("MB") {
        (n, 1024 * 1024)
    } else if let Some(n) = s.strip_suffix('M') {
        (n, 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("KB") {
        (n, 1024)
    } else if let Some(n) = s.strip_suffix('K') {
        (n, 1024)
    } else if let Some(n) = s.strip_suffix('B') {
        (n, 1)
    } else {
        (s.as_str(), 1)
    };

    let num: u64 = num_str
        .trim()
        .parse()
        .map_err(|_| format!("invalid number: {}", num_str))?;

    num.checked_mul(multiplier)
        .ok_or_else(|| format!("size too large: {}", s))
}

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let file_options = match args.config {
        Some(ref path) => RunOptions::from_file(path).unwrap_or_else(|e| {
            eprintln!("dirgraph: {}", e);
            process::exit(1);
        }),
        None => RunOptions::default(),
    };

    let options = RunOptions {
        scan: file_options.scan.overlay(args.scan_options()),
        output_file: args.output.clone().or(file_options.output_file),
        output_dir: args.output_dir.clone().or(file_options.output_dir),
        export_image_format: args.export.clone().or(file_options.export_image_format),
    };
    let writes_file = options.output_file.is_some();

    let result = match init(Some(args.path.as_path()), options, &OsFileSystem, &SystemRunner) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("dirgraph: {}", e);
            process::exit(1);
        }
    };

    if !writes_file {
        print!("{}", result.chart);
    }

    // The chart owns stdout unless it went to a file
    let printed = if args.json && writes_file {
        print_summary_json(&result.stats, &mut io::stdout().lock())
    } else if args.json {
        print_summary_json(&result.stats, &mut io::stderr().lock())
    } else {
        let name = args.path.display().to_string();
        print_summary(&name, &result.stats, should_use_color(args.color))
    };

    if let Err(e) = printed {
        eprintln!("dirgraph: error writing output: {}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_file_size() {
        assert_eq!(parse_file_size("100"), Ok(100));
        assert_eq!(parse_file_size("100B"), Ok(100));
        assert_eq!(parse_file_size("10K"), Ok(10 * 1024));
        assert_eq!(parse_file_size("10kb"), Ok(10 * 1024));
        assert_eq!(parse_file_size("5M"), Ok(5 * 1024 * 1024));
        assert_eq!(parse_file_size("1G"), Ok(1024 * 1024 * 1024));
        assert!(parse_file_size("abc").is_err());
        assert!(parse_file_size("-5K").is_err());
    }

    #[test]
    fn test_flags_map_to_options() {
        let args = Args::parse_from([
            "dirgraph", "src", "-a", "--bytes", "--sort", "size", "--node-type", "folder", "-L",
            "2", "-k", "main", "--min-size", "1K",
        ]);
        let options = args.scan_options();
        assert_eq!(options.show_hidden, Some(true));
        assert_eq!(options.human_readable_size, Some(false));
        assert_eq!(options.sort_by, Some(SortBy::Size));
        assert_eq!(options.node_type, Some(NodeType::Folder));
        assert_eq!(options.max_depth, Some(2));
        assert_eq!(options.highlight_keywords, vec!["main"]);
        assert_eq!(options.min_file_size, Some(1024));
        assert_eq!(options.collapse_folders, None);
    }
}
