//! FFprobe-based duration probing.

use crate::{Error, Result};
use std::path::Path;
use std::process::Command;
use std::time::Duration;

/// Probe a media file's total duration using ffprobe.
///
/// Spawns a single ffprobe process asking for the container duration as
/// plain decimal seconds on stdout. No retries: a probe failure is fatal to
/// the caller's run and the tool's diagnostic output is surfaced verbatim.
///
/// # Errors
///
/// - [`Error::FileNotFound`] if `path` does not exist.
/// - [`Error::ToolNotFound`] if ffprobe is not installed.
/// - [`Error::ToolFailed`] if ffprobe exits with a non-zero status.
/// - [`Error::ParseError`] if stdout is not a non-negative finite number.
pub fn probe_duration(path: &Path) -> Result<Duration> {
    if !path.exists() {
        return Err(Error::file_not_found(path));
    }

    #[cfg(feature = "tracing")]
    tracing::debug!("Probing duration of {:?}", path);

    let output = Command::new("ffprobe")
        .args([
            "-v",
            "quiet",
            "-show_entries",
            "format=duration",
            "-of",
            "csv=p=0",
        ])
        .arg(path)
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::tool_not_found("ffprobe")
            } else {
                Error::Io(e)
            }
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::tool_failed("ffprobe", stderr.to_string()));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_duration_output(&stdout)
}

/// Parse ffprobe's duration output (decimal seconds, one line).
fn parse_duration_output(stdout: &str) -> Result<Duration> {
    let text = stdout.trim();
    let secs: f64 = text
        .parse()
        .map_err(|_| Error::parse_error("ffprobe", format!("invalid duration: {:?}", text)))?;

    if !secs.is_finite() || secs < 0.0 {
        return Err(Error::parse_error(
            "ffprobe",
            format!("invalid duration: {:?}", text),
        ));
    }

    Ok(Duration::from_secs_f64(secs))
}
