//! Directory tree walking logic
//!
//! `GraphWalker` lists each directory once, filters and stats its entries,
//! sorts them, and recurses into subdirectories in order. Each level hands
//! back its chart fragment together with the totals for everything below it.

mod config;
mod filter;
mod sort;
mod traversal;
pub mod utils;
mod walker;

// Re-export public types
pub use config::{
    DEFAULT_EXCLUDES, DEFAULT_FILE_COLOR, DEFAULT_FOLDER_COLOR, DEFAULT_LARGE_FILE_COLOR,
    NodeType, ScanConfig, ScanOptions, SortBy,
};
pub use filter::EntryFilter;
pub use sort::{compare_names, sort_entries};
pub use traversal::{Entry, read_entries};
pub use utils::{format_date, format_size, safe_name};
pub use walker::{GraphWalker, ScanResult};
