//! dirgraph - render a directory tree as a Mermaid flowchart annotated with
//! folder/file counts, sizes and modification dates

pub mod app;
pub mod error;
pub mod export;
pub mod fs;
pub mod graph;
pub mod stats;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use app::{RunOptions, init, save_chart};
pub use error::{ConfigError, Error, ExportError, ScanError};
pub use export::{CommandOutput, CommandRunner, SystemRunner, export_image};
pub use fs::{EntryKind, EntryMeta, FileSystem, OsFileSystem};
pub use graph::{GraphDocument, NodeIds};
pub use stats::{ScanStats, SubtreeStats, print_summary, print_summary_json};
pub use tree::{GraphWalker, NodeType, ScanConfig, ScanOptions, ScanResult, SortBy};
