//! Keyframe scan results.

use ffmpeg_next::Rational;

use crate::configuration::ScanOptions;

/// Keyframe start times of the primary video stream.
///
/// `start_times_seconds` is the probe's answer; `stream` carries diagnostics
/// about how it was obtained.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct KeyFrameReport {
    /// Presentation times, in seconds, at which keyframes start. In demux
    /// order unless sorting was requested.
    pub start_times_seconds: Vec<f64>,
    /// Diagnostics about the scanned stream.
    pub stream: StreamSummary,
}

/// Diagnostics about the scanned video stream.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamSummary {
    /// Index of the scanned stream in the container's stream table.
    pub stream_index: usize,
    /// Codec name of the scanned stream.
    pub codec: String,
    /// Time base of the stream's packet timestamps.
    pub time_base: Rational,
    /// Average frame rate reported by the container.
    pub average_frame_rate: Rational,
    /// Frame count declared by the container (0 when absent).
    pub declared_frame_count: i64,
    /// Declared frame count, or an estimate from duration and frame rate.
    pub estimated_frame_count: u64,
    /// Number of frames decoded (and charged against the budget).
    pub frames_decoded: usize,
    /// Whether the scan stopped because the packet budget ran out rather
    /// than because the input ended.
    pub budget_exhausted: bool,
}

impl KeyFrameReport {
    /// Number of keyframes found.
    pub fn len(&self) -> usize {
        self.start_times_seconds.len()
    }

    /// Returns `true` if no keyframe was found.
    pub fn is_empty(&self) -> bool {
        self.start_times_seconds.is_empty()
    }

    /// Whether the timestamps may be incomplete because of the packet budget.
    pub fn is_truncated(&self) -> bool {
        self.stream.budget_exhausted
    }
}

/// Wrap accumulated timestamps into a report.
///
/// Demux order is kept unless the options ask for sorting.
pub(crate) fn assemble(
    mut start_times_seconds: Vec<f64>,
    stream: StreamSummary,
    options: &ScanOptions,
) -> KeyFrameReport {
    if options.sorted_output {
        start_times_seconds.sort_by(f64::total_cmp);
    }

    KeyFrameReport {
        start_times_seconds,
        stream,
    }
}
