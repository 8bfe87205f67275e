//! Async keyframe probing.
//!
//! A probe blocks on file I/O and decoding, so [`probe_key_frames_async`]
//! runs it on `tokio::task::spawn_blocking` and hands back a
//! [`KeyFrameFuture`]. This keeps FFmpeg work off the runtime's cooperative
//! worker threads.
//!
//! # Example
//!
//! ```no_run
//! use keyprobe::{ProbeError, ScanOptions};
//!
//! # async fn example() -> Result<(), ProbeError> {
//! let report = keyprobe::probe_key_frames_async("input.mp4", ScanOptions::new()).await?;
//! println!("{} keyframes", report.len());
//! # Ok(())
//! # }
//! ```

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::task::JoinHandle;

use crate::configuration::ScanOptions;
use crate::error::ProbeError;
use crate::probe::probe_key_frames_with_options;
use crate::report::KeyFrameReport;

/// A keyframe probe running on a blocking thread.
///
/// Resolves to the probe's result. If the background task panics or is
/// aborted the future resolves to [`ProbeError::Cancelled`].
pub struct KeyFrameFuture {
    handle: JoinHandle<Result<KeyFrameReport, ProbeError>>,
}

impl Future for KeyFrameFuture {
    type Output = Result<KeyFrameReport, ProbeError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.handle)
            .poll(cx)
            .map(|result| result.unwrap_or_else(|_| Err(ProbeError::Cancelled)))
    }
}

/// Probe `path` on a blocking thread of the current Tokio runtime.
///
/// Must be called from within a Tokio runtime.
pub fn probe_key_frames_async<P: Into<PathBuf>>(path: P, options: ScanOptions) -> KeyFrameFuture {
    let path = path.into();
    let handle =
        tokio::task::spawn_blocking(move || probe_key_frames_with_options(&path, &options));

    KeyFrameFuture { handle }
}
