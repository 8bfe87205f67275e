//! Parallel batch probing.
//!
//! The public API is exposed through
//! [`KeyFrameProbe::probe_many_parallel`](crate::KeyFrameProbe::probe_many_parallel);
//! this module contains only the implementation. Every file gets its own
//! demuxer and decoder, so workers share no mutable state.

use std::path::Path;

use ::rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::configuration::ScanOptions;
use crate::error::ProbeError;
use crate::probe::probe_key_frames_with_options;
use crate::report::KeyFrameReport;

/// Probe `paths` across rayon threads, returning results in input order.
pub(crate) fn probe_many_parallel<P: AsRef<Path> + Sync>(
    paths: &[P],
    options: &ScanOptions,
) -> Vec<Result<KeyFrameReport, ProbeError>> {
    log::debug!("Probing {} files in parallel", paths.len());

    paths
        .par_iter()
        .map(|path| probe_key_frames_with_options(path, options))
        .collect()
}
