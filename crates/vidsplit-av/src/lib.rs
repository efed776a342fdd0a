//! # vidsplit-av
//!
//! External tool wrappers for probing and splitting media files.
//!
//! This crate provides the two narrow I/O boundaries vidsplit relies on:
//! - Probing a media file's total duration via ffprobe
//! - Extracting a time range into a new file via ffmpeg stream copy
//!
//! Both are blocking, spawn exactly one process per call, and surface the
//! underlying tool's diagnostics verbatim on failure.
//!
//! ## Example
//!
//! ```no_run
//! use vidsplit_av::probe_duration;
//! use std::path::Path;
//!
//! let duration = probe_duration(Path::new("/path/to/video.mp4"))?;
//! println!("Duration: {:.1}s", duration.as_secs_f64());
//! # Ok::<(), vidsplit_av::Error>(())
//! ```

mod error;
pub mod extract;
pub mod probe;
pub mod tools;

// Re-exports
pub use error::{Error, Result};
pub use extract::extract_segment;
pub use probe::probe_duration;
pub use tools::{check_tool, check_tools, require_tool, ToolInfo};
