//! Segment planning.
//!
//! Computes a deterministic partition of a media timeline into
//! fixed-duration segments. The plan exactly tiles `[0, total]`: consecutive
//! segments share a boundary, the last segment ends at the total duration,
//! and only the last segment may be shorter than the target length.
//!
//! All offsets are `std::time::Duration` values, so boundary arithmetic is
//! exact integer nanoseconds and never drifts across many segments.

use serde::{Serialize, Serializer};
use std::time::Duration;
use vidsplit_av::{Error, Result};

fn serialize_secs<S: Serializer>(d: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(d.as_secs_f64())
}

/// One contiguous time slice of the input, materialized as a standalone
/// output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentSpec {
    /// Sequence number (1-based, dense).
    pub sequence: u32,
    /// Start offset from the beginning of the timeline.
    #[serde(rename = "start_secs", serialize_with = "serialize_secs")]
    pub start: Duration,
    /// End offset (exclusive at the extraction boundary).
    #[serde(rename = "end_secs", serialize_with = "serialize_secs")]
    pub end: Duration,
    /// Output file name, derived from the input's base name and sequence.
    pub output_name: String,
}

impl SegmentSpec {
    /// Length of this segment.
    pub fn length(&self) -> Duration {
        self.end - self.start
    }

    /// Start offset rendered as `HH:MM:SS`.
    pub fn start_timestamp(&self) -> String {
        format_timestamp(self.start)
    }

    /// End offset rendered as `HH:MM:SS`.
    pub fn end_timestamp(&self) -> String {
        format_timestamp(self.end)
    }
}

/// Ordered segment plan for one input file.
///
/// Computed fresh per run; nothing is cached or persisted.
#[derive(Debug, Clone, Serialize)]
pub struct SegmentPlan {
    /// Total timeline length of the input.
    #[serde(rename = "total_duration_secs", serialize_with = "serialize_secs")]
    pub total_duration: Duration,
    /// Target segment length.
    #[serde(rename = "segment_length_secs", serialize_with = "serialize_secs")]
    pub segment_length: Duration,
    /// All segments, in extraction order.
    pub segments: Vec<SegmentSpec>,
}

impl SegmentPlan {
    /// Get segment count.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Whether the plan contains no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Compute the segment plan for a timeline of `total` length.
///
/// Walks a cursor from zero, emitting one segment of at most
/// `segment_length_secs` per step, so the final segment covers whatever
/// remains. A zero total duration yields an empty plan.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if `segment_length_secs` is zero. The
/// length is never silently clamped.
pub fn plan_segments(
    total: Duration,
    segment_length_secs: u64,
    base_name: &str,
) -> Result<SegmentPlan> {
    if segment_length_secs == 0 {
        return Err(Error::invalid_input("segment duration must be positive"));
    }

    let segment_length = Duration::from_secs(segment_length_secs);
    let mut segments = Vec::new();

    let mut cursor = Duration::ZERO;
    let mut sequence = 1u32;

    while cursor < total {
        let end = (cursor + segment_length).min(total);

        segments.push(SegmentSpec {
            sequence,
            start: cursor,
            end,
            output_name: segment_file_name(base_name, sequence),
        });

        cursor = end;
        sequence += 1;
    }

    Ok(SegmentPlan {
        total_duration: total,
        segment_length,
        segments,
    })
}

/// Deterministic output file name for a segment.
///
/// Zero-padding the sequence to three digits keeps the names sorting
/// lexicographically in plan order.
pub fn segment_file_name(base_name: &str, sequence: u32) -> String {
    format!("{}_segment_{:03}.mp4", base_name, sequence)
}

/// Render an offset as `HH:MM:SS`, truncating sub-second remainders.
///
/// Each field is zero-padded to two digits. Past 99 hours the hours field
/// simply grows wider; that is the defined overflow behavior.
pub fn format_timestamp(t: Duration) -> String {
    let total_secs = t.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}
