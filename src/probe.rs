//! One-call keyframe probing of media files.
//!
//! [`probe_key_frames`] opens a file, scans its first video stream and closes
//! the demuxer again before returning. Nothing is cached between calls, so
//! probing many files (or the same file repeatedly) costs one independent
//! demux/decode pass each.

use std::path::Path;

use crate::{
    configuration::ScanOptions, demuxer::FfmpegSource, error::ProbeError,
    report::KeyFrameReport, scanner::scan_key_frames,
};

/// Probe the keyframe start times of a media file's first video stream.
///
/// Uses the default [`ScanOptions`] (1000-packet budget, demux order).
///
/// # Errors
///
/// Returns the open errors of [`FfmpegSource::open`] and the scan errors of
/// [`scan_key_frames`].
///
/// # Example
///
/// ```no_run
/// let report = keyprobe::probe_key_frames("input.mp4")?;
/// println!("Keyframes at: {:?}", report.start_times_seconds);
/// # Ok::<(), keyprobe::ProbeError>(())
/// ```
pub fn probe_key_frames<P: AsRef<Path>>(path: P) -> Result<KeyFrameReport, ProbeError> {
    probe_key_frames_with_options(path, &ScanOptions::new())
}

/// Probe keyframe start times with custom [`ScanOptions`].
pub fn probe_key_frames_with_options<P: AsRef<Path>>(
    path: P,
    options: &ScanOptions,
) -> Result<KeyFrameReport, ProbeError> {
    let mut source = FfmpegSource::open(path)?;
    scan_key_frames(&mut source, options)
}

/// Keyframe prober with fixed options, convenient for batches.
///
/// # Example
///
/// ```no_run
/// use keyprobe::{KeyFrameProbe, ScanOptions};
///
/// let probe = KeyFrameProbe::new(ScanOptions::new().with_sorted_output(true));
/// for result in probe.probe_many(&["a.mp4", "b.mkv", "c.webm"]) {
///     match result {
///         Ok(report) => println!("{} keyframes", report.len()),
///         Err(error) => eprintln!("Error: {error}"),
///     }
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct KeyFrameProbe {
    options: ScanOptions,
}

impl KeyFrameProbe {
    /// Create a prober using `options` for every file.
    pub fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    /// The options applied to every probe.
    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Probe a single file.
    pub fn probe<P: AsRef<Path>>(&self, path: P) -> Result<KeyFrameReport, ProbeError> {
        probe_key_frames_with_options(path, &self.options)
    }

    /// Probe several files one after another.
    ///
    /// Files that cannot be probed produce an `Err` entry in the result
    /// vector rather than aborting the entire batch. Results are in input
    /// order.
    pub fn probe_many<P: AsRef<Path>>(
        &self,
        paths: &[P],
    ) -> Vec<Result<KeyFrameReport, ProbeError>> {
        paths.iter().map(|path| self.probe(path)).collect()
    }

    /// Probe several files across rayon worker threads.
    ///
    /// Each worker opens its own demuxer and decoder. Results are in input
    /// order.
    #[cfg(feature = "rayon")]
    pub fn probe_many_parallel<P: AsRef<Path> + Sync>(
        &self,
        paths: &[P],
    ) -> Vec<Result<KeyFrameReport, ProbeError>> {
        crate::rayon::probe_many_parallel(paths, &self.options)
    }
}
