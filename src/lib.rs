//! # keyprobe
//!
//! Probe the keyframe (GOP boundary) start times of a media file's primary
//! video stream: "where can I seek to and get a clean decode start?"
//!
//! `keyprobe` opens a container with FFmpeg via the
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next) crate, picks the
//! first video stream, and decodes forward from the start, classifying each
//! decoded frame. The timestamps of keyframe-bearing packets are returned in
//! seconds. The scan is bounded by a packet budget (1000 decoded frames by
//! default), so results for long files are truncated rather than exhaustive.
//!
//! ## Quick Start
//!
//! ```no_run
//! use keyprobe::FfmpegLogLevel;
//!
//! keyprobe::initialize(FfmpegLogLevel::Quiet)?;
//!
//! let report = keyprobe::probe_key_frames("input.mp4")?;
//! for start in &report.start_times_seconds {
//!     println!("keyframe at {start:.3}s");
//! }
//! if report.is_truncated() {
//!     println!("(stopped after {} frames)", report.stream.frames_decoded);
//! }
//! # Ok::<(), keyprobe::ProbeError>(())
//! ```
//!
//! ## Custom sources
//!
//! The scan is written against the [`MediaSource`] and [`FrameDecoder`]
//! traits. [`FfmpegSource`] is the production implementation; any other
//! demuxer can be scanned with [`scan_key_frames`].
//!
//! ## Optional Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `async` | [`probe_key_frames_async`] runs a probe on Tokio's blocking pool |
//! | `rayon` | `KeyFrameProbe::probe_many_parallel` spreads a batch across rayon threads |
//! | `full` | Enables all of the above |
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on your system.

pub mod configuration;
mod conversion;
pub mod demuxer;
pub mod error;
pub mod estimate;
pub mod ffmpeg;
#[cfg(feature = "async")]
pub mod future;
pub mod probe;
#[cfg(feature = "rayon")]
mod rayon;
pub mod report;
pub mod scanner;
pub mod selector;
pub mod source;
pub mod version;

pub use configuration::{DEFAULT_PACKET_BUDGET, ScanOptions};
pub use demuxer::{FfmpegDecoder, FfmpegSource};
pub use error::ProbeError;
pub use estimate::estimate_frame_count;
pub use ffmpeg::{FfmpegLogLevel, get_ffmpeg_log_level, initialize, set_ffmpeg_log_level};
#[cfg(feature = "async")]
pub use future::{KeyFrameFuture, probe_key_frames_async};
pub use probe::{KeyFrameProbe, probe_key_frames, probe_key_frames_with_options};
pub use report::{KeyFrameReport, StreamSummary};
pub use scanner::scan_key_frames;
pub use selector::{SelectedStream, first_video_stream, select_video_stream};
pub use source::{
    DemuxedPacket, FrameDecoder, FrameOutcome, MediaSource, StreamDescriptor, StreamKind,
};
pub use version::{LibraryVersions, avcodec_version, avformat_version, avutil_version};
