//! Error types for the `keyprobe` crate.
//!
//! This module defines [`ProbeError`], the unified error type returned by all
//! fallible operations in the crate. Every variant is terminal for the call
//! that produced it and is raised before any keyframe scanning happens;
//! per-packet decode hiccups inside the scan loop are never surfaced as
//! errors.

use std::path::PathBuf;

use ffmpeg_next::Error as FfmpegError;
use thiserror::Error;

/// The unified error type for all `keyprobe` operations.
///
/// Every public function that can fail returns `Result<T, ProbeError>`.
/// Variants carry enough context to diagnose the problem without needing
/// additional logging at the call site.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProbeError {
    /// The media file could not be accessed.
    #[error("Failed to open media file at {path}: {reason}")]
    FileOpen {
        /// Path that was passed to the probe.
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// FFmpeg could not allocate a format context.
    #[error("Failed to allocate format context for {path}")]
    FormatAllocation {
        /// Path being probed.
        path: PathBuf,
    },

    /// The container header could not be parsed.
    #[error("Failed to parse container header of {path}: {reason}")]
    HeaderParse {
        /// Path being probed.
        path: PathBuf,
        /// Upstream FFmpeg message.
        reason: String,
    },

    /// Per-stream metadata could not be resolved.
    #[error("Failed to read stream info of {path}: {reason}")]
    StreamInfo {
        /// Path being probed.
        path: PathBuf,
        /// Upstream FFmpeg message.
        reason: String,
    },

    /// The file does not contain a video stream.
    #[error("No video stream found in file")]
    NoVideoStream,

    /// No decoder is available for the selected stream's codec.
    #[error("No decoder available for codec {codec}")]
    UnsupportedCodec {
        /// Codec name as reported by the container.
        codec: String,
    },

    /// The decoder for the selected stream could not be initialised.
    #[error("Failed to open {codec} decoder: {reason}")]
    DecoderOpen {
        /// Codec name as reported by the container.
        codec: String,
        /// Underlying reason the decoder failed to open.
        reason: String,
    },

    /// A packet budget of zero was requested.
    #[error("Packet budget must be greater than zero")]
    InvalidBudget,

    /// An error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    FfmpegError(String),

    /// A background probe task was aborted before it produced a result.
    #[error("Operation cancelled")]
    Cancelled,
}

impl From<FfmpegError> for ProbeError {
    fn from(error: FfmpegError) -> Self {
        ProbeError::FfmpegError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure() {
        let error = ProbeError::FileOpen {
            path: PathBuf::from("missing.mp4"),
            reason: "No such file or directory".to_string(),
        };
        assert!(error.to_string().contains("Failed to open media file"));
        assert!(error.to_string().contains("missing.mp4"));

        let error = ProbeError::UnsupportedCodec {
            codec: "prores".to_string(),
        };
        assert_eq!(error.to_string(), "No decoder available for codec prores");

        assert_eq!(
            ProbeError::NoVideoStream.to_string(),
            "No video stream found in file"
        );
    }

    #[test]
    fn ffmpeg_errors_convert() {
        let error = ProbeError::from(FfmpegError::Eof);
        assert!(matches!(error, ProbeError::FfmpegError(_)));
    }
}
