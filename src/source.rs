//! The demux/decode capability the keyframe scanner is written against.
//!
//! The scanner never talks to FFmpeg directly. It drives a [`MediaSource`]
//! (container + demux cursor) and the [`FrameDecoder`] that source opens for
//! the selected stream. [`FfmpegSource`](crate::FfmpegSource) is the
//! production implementation; anything else that can hand out packets and
//! classify decoded frames (an in-memory script in tests, a different demuxer)
//! can be scanned the same way through
//! [`scan_key_frames`](crate::scan_key_frames).

use ffmpeg_next::{Rational, media::Type};

use crate::error::ProbeError;

/// Kind of elementary stream stored in a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKind {
    /// Video pictures.
    Video,
    /// Audio samples.
    Audio,
    /// Subtitle events.
    Subtitle,
    /// Opaque data (timecode tracks, metadata).
    Data,
    /// Attached files (fonts, cover art in some containers).
    Attachment,
    /// Anything FFmpeg could not classify.
    Unknown,
}

impl From<Type> for StreamKind {
    fn from(medium: Type) -> Self {
        match medium {
            Type::Video => StreamKind::Video,
            Type::Audio => StreamKind::Audio,
            Type::Subtitle => StreamKind::Subtitle,
            Type::Data => StreamKind::Data,
            Type::Attachment => StreamKind::Attachment,
            Type::Unknown => StreamKind::Unknown,
        }
    }
}

/// One entry of a container's stream table.
///
/// A read-only snapshot taken when the source was opened.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamDescriptor {
    /// Position of the stream in the container's stream table.
    pub index: usize,
    /// What the stream carries.
    pub kind: StreamKind,
    /// Codec name (e.g. `"h264"`, `"vp9"`).
    pub codec: String,
    /// Unit of this stream's packet timestamps.
    pub time_base: Rational,
    /// Average frame rate; `0/0` or `0/1` when the container does not know it.
    pub average_frame_rate: Rational,
    /// Frame count declared by the container. Zero when absent, which is
    /// typical for Matroska/WebM.
    pub declared_frame_count: i64,
    /// Container-level duration in microsecond ticks. Zero or negative when
    /// unknown.
    pub duration_micros: i64,
}

/// A compressed packet handed out by a [`MediaSource`].
pub trait DemuxedPacket {
    /// Index of the stream the packet belongs to.
    fn stream_index(&self) -> usize;

    /// Presentation timestamp in the stream's time base.
    fn pts(&self) -> Option<i64>;

    /// Decoding timestamp in the stream's time base.
    fn dts(&self) -> Option<i64>;
}

/// Result of asking a decoder for its next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// A frame was decoded.
    Frame {
        /// Whether the frame is decodable without reference to prior frames.
        key_frame: bool,
    },
    /// The decoder needs more packets before it can emit a frame.
    NeedMoreInput,
    /// The decoder has been fully drained.
    EndOfStream,
}

/// A stateful decoder bound to one stream.
///
/// Packets must be submitted in the order the source produced them.
pub trait FrameDecoder {
    /// Packet type accepted by this decoder.
    type Packet: DemuxedPacket;

    /// Submit one packet for decoding.
    fn send_packet(&mut self, packet: &Self::Packet) -> Result<(), ProbeError>;

    /// Retrieve the next decoded frame, if one is ready.
    fn receive_frame(&mut self) -> Result<FrameOutcome, ProbeError>;
}

/// An open container: stream table plus a sequential demux cursor.
pub trait MediaSource {
    /// Packet type produced by the demux cursor.
    type Packet: DemuxedPacket;
    /// Handle to a decoder implementation that can be opened for a stream.
    type Codec;
    /// Decoder type produced by [`open_decoder`](MediaSource::open_decoder).
    type Decoder: FrameDecoder<Packet = Self::Packet>;

    /// The stream table, in container order.
    fn streams(&self) -> &[StreamDescriptor];

    /// Resolve a decoder implementation for `stream`'s codec.
    ///
    /// Fails with [`ProbeError::UnsupportedCodec`] when none exists.
    fn find_decoder(&self, stream: &StreamDescriptor) -> Result<Self::Codec, ProbeError>;

    /// Move the demux cursor to the earliest position of `stream_index`.
    ///
    /// The seek is approximate: it may land on any packet near the start.
    fn seek_to_start(&mut self, stream_index: usize) -> Result<(), ProbeError>;

    /// Open a decoder for `stream` using `codec`.
    ///
    /// Fails with [`ProbeError::DecoderOpen`] when initialisation fails.
    fn open_decoder(
        &self,
        stream: &StreamDescriptor,
        codec: Self::Codec,
    ) -> Result<Self::Decoder, ProbeError>;

    /// Read the next packet from any stream.
    ///
    /// Returns `None` once the input is exhausted or can no longer be read.
    fn read_packet(&mut self) -> Option<Self::Packet>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_kind_from_media_type() {
        assert_eq!(StreamKind::from(Type::Video), StreamKind::Video);
        assert_eq!(StreamKind::from(Type::Audio), StreamKind::Audio);
        assert_eq!(StreamKind::from(Type::Subtitle), StreamKind::Subtitle);
        assert_eq!(StreamKind::from(Type::Unknown), StreamKind::Unknown);
    }
}
