//! Scan entry point: scan, save the chart, optionally export an image

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ConfigError, Error};
use crate::export::{CommandRunner, export_image};
use crate::fs::FileSystem;
use crate::tree::{GraphWalker, ScanConfig, ScanOptions, ScanResult};

/// Scan options plus what to do with the rendered chart.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RunOptions {
    #[serde(flatten)]
    pub scan: ScanOptions,
    /// File name for the chart; nothing is written when unset
    pub output_file: Option<String>,
    /// Directory for `output_file`, created if missing. Defaults to `.`
    pub output_dir: Option<PathBuf>,
    /// Image format (`png`, `svg`, `pdf`) to render the saved chart to
    pub export_image_format: Option<String>,
}

impl RunOptions {
    /// Load options from a JSON file using the camelCase option names.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Where the chart is written, if anywhere.
    pub fn output_path(&self) -> Option<PathBuf> {
        self.output_file.as_ref().map(|file| {
            self.output_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(file)
        })
    }
}

/// Scan `dir` (the current directory when `None`) and handle the output.
///
/// A chart that cannot be written is logged and the scan result is still
/// returned; image export is then skipped. A failed export is returned as
/// [`Error::Export`].
pub fn init(
    dir: Option<&Path>,
    options: RunOptions,
    fs: &dyn FileSystem,
    runner: &dyn CommandRunner,
) -> Result<ScanResult, Error> {
    let dir = match dir {
        Some(d) => d.to_path_buf(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };

    let output_path = options.output_path();
    let config = ScanConfig::resolve(&dir, options.scan);
    let result = GraphWalker::new(config, fs).scan(&dir)?;

    if let Some(path) = output_path {
        if save_chart(fs, &path, &result.chart) {
            if let Some(format) = options.export_image_format.as_deref() {
                export_image(runner, &path, format).inspect_err(|e| {
                    log::error!("error exporting image: {}", e);
                })?;
            }
        }
    }

    Ok(result)
}

/// Write the chart, creating its directory first. Failures are logged.
pub fn save_chart(fs: &dyn FileSystem, path: &Path, chart: &str) -> bool {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = fs.create_dir_all(parent) {
            log::error!("failed to create directory {}: {}", parent.display(), e);
            return false;
        }
    }

    match fs.write_file(path, chart) {
        Ok(()) => {
            log::info!("chart saved to {}", path.display());
            true
        }
        Err(e) => {
            log::error!("failed to save file {}: {}", path.display(), e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::CommandOutput;
    use crate::fs::OsFileSystem;
    use crate::tree::NodeType;
    use std::cell::RefCell;
    use std::io;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingRunner {
        calls: RefCell<Vec<Vec<String>>>,
        fail: bool,
    }

    impl CommandRunner for RecordingRunner {
        fn run(&self, _program: &str, args: &[String]) -> io::Result<CommandOutput> {
            self.calls.borrow_mut().push(args.to_vec());
            Ok(CommandOutput {
                success: !self.fail,
                code: Some(if self.fail { 1 } else { 0 }),
                stdout: String::new(),
                stderr: String::new(),
            })
        }
    }

    #[test]
    fn test_output_path() {
        let options = RunOptions {
            output_file: Some("chart.mmd".to_string()),
            output_dir: Some(PathBuf::from("out")),
            ..Default::default()
        };
        assert_eq!(options.output_path(), Some(PathBuf::from("out/chart.mmd")));

        let options = RunOptions {
            output_file: Some("chart.mmd".to_string()),
            ..Default::default()
        };
        assert_eq!(options.output_path(), Some(PathBuf::from("./chart.mmd")));
        assert_eq!(RunOptions::default().output_path(), None);
    }

    #[test]
    fn test_options_json_flattens_scan_options() {
        let json = r#"{
            "baseName": "Project",
            "nodeType": "folder",
            "outputFile": "Project.mmd",
            "outputDir": "charts",
            "exportImageFormat": "svg"
        }"#;
        let options: RunOptions = serde_json::from_str(json).unwrap();
        assert_eq!(options.scan.base_name.as_deref(), Some("Project"));
        assert_eq!(options.scan.node_type, Some(NodeType::Folder));
        assert_eq!(options.output_file.as_deref(), Some("Project.mmd"));
        assert_eq!(options.output_dir, Some(PathBuf::from("charts")));
        assert_eq!(options.export_image_format.as_deref(), Some("svg"));
    }

    #[test]
    fn test_from_file_errors() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(
            RunOptions::from_file(&missing),
            Err(ConfigError::Read { .. })
        ));

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{ not json").unwrap();
        assert!(matches!(
            RunOptions::from_file(&bad),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_init_writes_chart_and_exports() {
        let tree = TempDir::new().unwrap();
        std::fs::write(tree.path().join("a.txt"), "hello").unwrap();
        let out = TempDir::new().unwrap();
        let out_dir = out.path().join("nested").join("charts");

        let options = RunOptions {
            output_file: Some("tree.mmd".to_string()),
            output_dir: Some(out_dir.clone()),
            export_image_format: Some("png".to_string()),
            ..Default::default()
        };
        let runner = RecordingRunner::default();
        let result = init(Some(tree.path()), options, &OsFileSystem, &runner).unwrap();

        let written = std::fs::read_to_string(out_dir.join("tree.mmd")).unwrap();
        assert_eq!(written, result.chart);
        assert_eq!(result.stats.file_count, 1);

        let calls = runner.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].contains(&out_dir.join("tree.png").display().to_string()));
    }

    #[test]
    fn test_init_without_output_file_touches_nothing() {
        let tree = TempDir::new().unwrap();
        let options = RunOptions {
            export_image_format: Some("png".to_string()),
            ..Default::default()
        };
        let runner = RecordingRunner::default();
        let result = init(Some(tree.path()), options, &OsFileSystem, &runner).unwrap();
        assert!(result.chart.starts_with("graph TD\n"));
        assert!(runner.calls.borrow().is_empty());
    }

    #[test]
    fn test_init_export_failure_is_reported() {
        let tree = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let options = RunOptions {
            output_file: Some("tree.mmd".to_string()),
            output_dir: Some(out.path().to_path_buf()),
            export_image_format: Some("png".to_string()),
            ..Default::default()
        };
        let runner = RecordingRunner {
            fail: true,
            ..Default::default()
        };
        let err = init(Some(tree.path()), options, &OsFileSystem, &runner).unwrap_err();
        assert!(matches!(err, Error::Export(_)));
        // The chart was still written before the export ran
        assert!(out.path().join("tree.mmd").exists());
    }

    #[test]
    fn test_init_missing_dir_fails() {
        let runner = RecordingRunner::default();
        let err = init(
            Some(Path::new("/nonexistent/dir")),
            RunOptions::default(),
            &OsFileSystem,
            &runner,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Scan(_)));
    }
}
