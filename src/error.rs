//! Error types for scanning and image export

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure of the scan as a whole.
///
/// Only the top-level directory listing can fail a scan. Unreadable
/// subdirectories and items that cannot be stat'ed are skipped.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("cannot read directory '{}': {source}", .path.display())]
    ReadRoot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failure of the external diagram renderer.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The renderer could not be started at all (usually not installed).
    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The renderer ran but exited unsuccessfully.
    #[error(
        "'{program}' exited with code {}: {stderr}",
        .code.map_or_else(|| "none".to_string(), |c| c.to_string())
    )]
    Failed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
}

/// Errors surfaced by [`crate::init`].
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("image export failed: {0}")]
    Export(#[from] ExportError),
}

/// Failure to load a JSON options file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
