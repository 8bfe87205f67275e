//! Primary video stream selection.
//!
//! Unlike FFmpeg's "best stream" heuristic, the keyframe probe always uses
//! the *first* video stream in table order. Cover-art attachments that
//! containers expose as video streams therefore win if they come first,
//! matching what `ffprobe -select_streams v:0` reports.

use crate::{
    error::ProbeError,
    source::{MediaSource, StreamDescriptor, StreamKind},
};

/// The stream chosen for scanning together with its resolved decoder.
#[derive(Debug, Clone)]
pub struct SelectedStream<C> {
    /// Snapshot of the selected stream's table entry.
    pub descriptor: StreamDescriptor,
    /// Decoder implementation resolved for the stream's codec.
    pub codec: C,
}

/// First video stream of `streams`, in table order.
pub fn first_video_stream(streams: &[StreamDescriptor]) -> Option<&StreamDescriptor> {
    streams
        .iter()
        .find(|stream| stream.kind == StreamKind::Video)
}

/// Select the first video stream of `source` and resolve its decoder.
///
/// # Errors
///
/// - [`ProbeError::NoVideoStream`] if the stream table has no video stream.
/// - [`ProbeError::UnsupportedCodec`] if no decoder exists for its codec.
pub fn select_video_stream<S: MediaSource>(
    source: &S,
) -> Result<SelectedStream<S::Codec>, ProbeError> {
    let descriptor = first_video_stream(source.streams())
        .cloned()
        .ok_or(ProbeError::NoVideoStream)?;

    let codec = source.find_decoder(&descriptor)?;

    log::debug!(
        "Selected video stream {} (codec={}, time_base={}/{}, avg_frame_rate={}/{}, nb_frames={})",
        descriptor.index,
        descriptor.codec,
        descriptor.time_base.numerator(),
        descriptor.time_base.denominator(),
        descriptor.average_frame_rate.numerator(),
        descriptor.average_frame_rate.denominator(),
        descriptor.declared_frame_count,
    );

    Ok(SelectedStream { descriptor, codec })
}
