//! FFmpeg-based segment extraction.

use crate::{Error, Result};
use std::path::Path;
use std::process::Command;

/// Extract the time range `[start, end)` from `input` into `output` using
/// ffmpeg stream copy.
///
/// `start` and `end` are `HH:MM:SS` timestamps. The copy runs without
/// re-encoding, normalizes negative timestamps at the output boundary, and
/// overwrites `output` if it already exists. The call blocks until ffmpeg
/// exits; no timeout is imposed.
///
/// # Errors
///
/// - [`Error::ToolNotFound`] if ffmpeg is not installed.
/// - [`Error::ToolFailed`] if ffmpeg exits with a non-zero status, carrying
///   its stderr output.
pub fn extract_segment(input: &Path, output: &Path, start: &str, end: &str) -> Result<()> {
    #[cfg(feature = "tracing")]
    tracing::debug!("Extracting {} - {} from {:?} to {:?}", start, end, input, output);

    let result = Command::new("ffmpeg")
        .arg("-i")
        .arg(input)
        .args(["-ss", start, "-to", end])
        // Stream copy for speed; no re-encoding happens here.
        .args(["-c", "copy"])
        .args(["-avoid_negative_ts", "make_zero"])
        .arg("-y")
        .arg(output)
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::tool_not_found("ffmpeg")
            } else {
                Error::Io(e)
            }
        })?;

    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr);
        return Err(Error::tool_failed("ffmpeg", stderr.to_string()));
    }

    Ok(())
}
