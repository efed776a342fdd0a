//! Split orchestration.
//!
//! Wires the duration probe, the segment planner, and the ffmpeg extraction
//! boundary together. The two external tools are reached through narrow
//! capability traits so the orchestration can be exercised with fakes and no
//! real process is spawned in unit tests.

use crate::plan::{self, SegmentPlan};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use vidsplit_av::Error;

/// Capability to resolve a media file's total duration.
pub trait DurationProber {
    fn probe_duration(&self, path: &Path) -> vidsplit_av::Result<Duration>;
}

/// Capability to extract one `[start, end)` time range into an output file.
///
/// `start` and `end` are `HH:MM:SS` timestamps.
pub trait SegmentExtractor {
    fn extract(&self, input: &Path, output: &Path, start: &str, end: &str)
        -> vidsplit_av::Result<()>;
}

/// Production prober backed by ffprobe.
pub struct FfprobeDurationProber;

impl DurationProber for FfprobeDurationProber {
    fn probe_duration(&self, path: &Path) -> vidsplit_av::Result<Duration> {
        vidsplit_av::probe_duration(path)
    }
}

/// Production extractor backed by ffmpeg stream copy.
pub struct FfmpegSegmentExtractor;

impl SegmentExtractor for FfmpegSegmentExtractor {
    fn extract(
        &self,
        input: &Path,
        output: &Path,
        start: &str,
        end: &str,
    ) -> vidsplit_av::Result<()> {
        vidsplit_av::extract_segment(input, output, start, end)
    }
}

/// Directory the segment files are written into: `<stem>_segments`, next to
/// the input file.
pub fn output_dir_for(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let dir_name = format!("{}_segments", stem);

    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(dir_name),
        _ => PathBuf::from(dir_name),
    }
}

/// Validate inputs, probe the file's duration, and compute the segment plan.
///
/// Validation happens strictly before the probe, so a bad segment length
/// never spawns an external process. Probing happens exactly once per run.
pub fn plan_for_file<P: DurationProber>(
    prober: &P,
    input: &Path,
    segment_length_secs: u64,
) -> Result<SegmentPlan> {
    if segment_length_secs == 0 {
        return Err(Error::invalid_input("segment duration must be positive").into());
    }

    if !input.exists() {
        return Err(Error::file_not_found(input).into());
    }

    let base_name = input
        .file_stem()
        .ok_or_else(|| Error::invalid_input(format!("input has no file name: {:?}", input)))?
        .to_string_lossy()
        .into_owned();

    let total_duration = prober
        .probe_duration(input)
        .context("failed to probe media duration")?;

    tracing::debug!(
        "Probed {:?}: {:.3}s total",
        input,
        total_duration.as_secs_f64()
    );

    Ok(plan::plan_segments(total_duration, segment_length_secs, &base_name)?)
}

/// Execute the plan: one blocking ffmpeg invocation per segment, in order.
///
/// Stops at the first failed extraction. Segment files already produced are
/// left in place; nothing is rolled back or retried.
pub fn run_plan<E: SegmentExtractor>(
    extractor: &E,
    input: &Path,
    output_dir: &Path,
    plan: &SegmentPlan,
) -> Result<()> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory {:?}", output_dir))?;

    let total = plan.segment_count();

    for spec in &plan.segments {
        let start = spec.start_timestamp();
        let end = spec.end_timestamp();
        let output = output_dir.join(&spec.output_name);

        println!(
            "Processing segment {}/{}: {} - {}",
            spec.sequence, total, start, end
        );

        extractor
            .extract(input, &output, &start, &end)
            .with_context(|| format!("failed to extract segment {}/{}", spec.sequence, total))?;

        println!("✓ Segment {} completed: {}", spec.sequence, spec.output_name);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::fs;

    struct FakeProber {
        duration: Duration,
        calls: Cell<u32>,
    }

    impl FakeProber {
        fn new(duration: Duration) -> Self {
            Self {
                duration,
                calls: Cell::new(0),
            }
        }
    }

    impl DurationProber for FakeProber {
        fn probe_duration(&self, _path: &Path) -> vidsplit_av::Result<Duration> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.duration)
        }
    }

    /// Records every extraction attempt; writes an empty output file on
    /// success, fails the attempt at `fail_at` (1-based) if set.
    struct FakeExtractor {
        attempts: RefCell<Vec<String>>,
        fail_at: Option<usize>,
    }

    impl FakeExtractor {
        fn new() -> Self {
            Self {
                attempts: RefCell::new(Vec::new()),
                fail_at: None,
            }
        }

        fn failing_at(n: usize) -> Self {
            Self {
                attempts: RefCell::new(Vec::new()),
                fail_at: Some(n),
            }
        }

        fn attempt_count(&self) -> usize {
            self.attempts.borrow().len()
        }
    }

    impl SegmentExtractor for FakeExtractor {
        fn extract(
            &self,
            _input: &Path,
            output: &Path,
            start: &str,
            end: &str,
        ) -> vidsplit_av::Result<()> {
            self.attempts.borrow_mut().push(format!("{} - {}", start, end));
            let attempt = self.attempts.borrow().len();

            if self.fail_at == Some(attempt) {
                return Err(Error::tool_failed("ffmpeg", "injected failure"));
            }

            fs::write(output, b"").map_err(Error::Io)
        }
    }

    fn touch_input(dir: &Path) -> PathBuf {
        let input = dir.join("video.mp4");
        fs::write(&input, b"not really media").unwrap();
        input
    }

    #[test]
    fn test_plan_for_file_probes_once() {
        let dir = tempfile::tempdir().unwrap();
        let input = touch_input(dir.path());
        let prober = FakeProber::new(Duration::from_secs(100));

        let plan = plan_for_file(&prober, &input, 30).unwrap();

        assert_eq!(prober.calls.get(), 1);
        assert_eq!(plan.segment_count(), 4);
        assert_eq!(plan.segments[0].output_name, "video_segment_001.mp4");
    }

    #[test]
    fn test_zero_segment_length_rejected_before_probe() {
        let dir = tempfile::tempdir().unwrap();
        let input = touch_input(dir.path());
        let prober = FakeProber::new(Duration::from_secs(100));

        let err = plan_for_file(&prober, &input, 0).unwrap_err();

        assert_eq!(prober.calls.get(), 0);
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_missing_input_rejected_before_probe() {
        let prober = FakeProber::new(Duration::from_secs(100));

        let err = plan_for_file(&prober, Path::new("/nonexistent/video.mp4"), 30).unwrap_err();

        assert_eq!(prober.calls.get(), 0);
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_run_plan_extracts_every_segment_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let input = touch_input(dir.path());
        let output_dir = output_dir_for(&input);
        let plan = plan::plan_segments(Duration::from_secs(100), 30, "video").unwrap();
        let extractor = FakeExtractor::new();

        run_plan(&extractor, &input, &output_dir, &plan).unwrap();

        assert_eq!(extractor.attempt_count(), 4);
        assert_eq!(
            *extractor.attempts.borrow(),
            vec![
                "00:00:00 - 00:00:30",
                "00:00:30 - 00:01:00",
                "00:01:00 - 00:01:30",
                "00:01:30 - 00:01:40",
            ]
        );
        for seq in 1..=4 {
            assert!(output_dir
                .join(plan::segment_file_name("video", seq))
                .exists());
        }
    }

    #[test]
    fn test_run_plan_stops_at_first_failure() {
        let dir = tempfile::tempdir().unwrap();
        let input = touch_input(dir.path());
        let output_dir = output_dir_for(&input);
        let plan = plan::plan_segments(Duration::from_secs(150), 30, "video").unwrap();
        assert_eq!(plan.segment_count(), 5);

        let extractor = FakeExtractor::failing_at(2);
        let err = run_plan(&extractor, &input, &output_dir, &plan).unwrap_err();

        // Segments 3-5 were never attempted.
        assert_eq!(extractor.attempt_count(), 2);
        assert!(err.to_string().contains("segment 2/5"));

        // Segment 1's file survives the failure.
        assert!(output_dir.join("video_segment_001.mp4").exists());
        assert!(!output_dir.join("video_segment_002.mp4").exists());
        assert!(!output_dir.join("video_segment_003.mp4").exists());
    }

    #[test]
    fn test_run_plan_empty_plan_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let input = touch_input(dir.path());
        let output_dir = output_dir_for(&input);
        let plan = plan::plan_segments(Duration::ZERO, 30, "video").unwrap();
        let extractor = FakeExtractor::new();

        run_plan(&extractor, &input, &output_dir, &plan).unwrap();

        assert_eq!(extractor.attempt_count(), 0);
        assert!(output_dir.exists());
    }

    #[test]
    fn test_output_dir_next_to_input() {
        assert_eq!(
            output_dir_for(Path::new("/data/recordings/video.mp4")),
            PathBuf::from("/data/recordings/video_segments")
        );
        assert_eq!(
            output_dir_for(Path::new("video.mkv")),
            PathBuf::from("video_segments")
        );
    }
}
