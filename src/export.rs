//! Rasterizing a chart document with the Mermaid CLI (`mmdc`)

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::ExportError;

/// Renderer executable.
pub const RENDERER: &str = "mmdc";

pub const EXPORT_WIDTH: u32 = 3840;
pub const EXPORT_HEIGHT: u32 = 2160;
pub const EXPORT_SCALE: u32 = 3;

/// Captured result of a finished subprocess.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Runs external programs to completion.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<CommandOutput>;
}

/// [`CommandRunner`] backed by `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<CommandOutput> {
        let output = Command::new(program).args(args).output()?;
        Ok(CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// The image path for a document: same base name, `format` as extension.
pub fn image_path(document: &Path, format: &str) -> PathBuf {
    document.with_extension(format.trim_start_matches('.'))
}

/// Arguments passed to the renderer.
pub fn render_args(document: &Path, image: &Path) -> Vec<String> {
    vec![
        "-i".to_string(),
        document.display().to_string(),
        "-o".to_string(),
        image.display().to_string(),
        "--width".to_string(),
        EXPORT_WIDTH.to_string(),
        "--height".to_string(),
        EXPORT_HEIGHT.to_string(),
        "--scale".to_string(),
        EXPORT_SCALE.to_string(),
    ]
}

/// Render `document` to an image in `format` next to it.
///
/// Renderer stderr on success is logged as a warning; a non-zero exit is an
/// error.
pub fn export_image(
    runner: &dyn CommandRunner,
    document: &Path,
    format: &str,
) -> Result<PathBuf, ExportError> {
    let image = image_path(document, format);
    let args = render_args(document, &image);

    let output = runner
        .run(RENDERER, &args)
        .map_err(|source| ExportError::Spawn {
            program: RENDERER.to_string(),
            source,
        })?;

    if !output.success {
        return Err(ExportError::Failed {
            program: RENDERER.to_string(),
            code: output.code,
            stderr: output.stderr.trim().to_string(),
        });
    }

    if !output.stderr.trim().is_empty() {
        log::warn!("{} stderr: {}", RENDERER, output.stderr.trim());
    }
    log::info!("image exported to {}", image.display());
    Ok(image)
}
