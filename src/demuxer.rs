//! FFmpeg-backed [`MediaSource`] implementation.
//!
//! [`FfmpegSource`] owns the demuxer (format) context of one opened file and
//! a snapshot of its stream table. [`FfmpegDecoder`] wraps a video decoder
//! together with its reusable frame buffer. Both release their FFmpeg
//! resources on drop, so every exit path of a scan cleans up.

use std::{
    ffi::CString,
    fmt::{Debug, Formatter, Result as FmtResult},
    fs::File,
    os::raw::c_int,
    path::{Path, PathBuf},
    ptr,
};

use ffmpeg_next::{
    Codec, Error as FfmpegError, Packet,
    codec::context::Context as CodecContext,
    decoder::Video as VideoDecoder,
    format::context::Input,
    frame::Video as VideoFrame,
    util::error::EAGAIN,
};
use ffmpeg_sys_next::{
    AVFormatContext, AVSEEK_FLAG_ANY, av_seek_frame, avformat_alloc_context,
    avformat_close_input, avformat_find_stream_info, avformat_open_input,
};

use crate::{
    error::ProbeError,
    source::{
        DemuxedPacket, FrameDecoder, FrameOutcome, MediaSource, StreamDescriptor, StreamKind,
    },
};

/// An opened media file, ready to be scanned.
///
/// # Example
///
/// ```no_run
/// use keyprobe::{FfmpegSource, ScanOptions};
///
/// let mut source = FfmpegSource::open("input.mkv")?;
/// let report = keyprobe::scan_key_frames(&mut source, &ScanOptions::new())?;
/// println!("{:?}", report.start_times_seconds);
/// # Ok::<(), keyprobe::ProbeError>(())
/// ```
pub struct FfmpegSource {
    input_context: Input,
    streams: Vec<StreamDescriptor>,
    file_path: PathBuf,
}

impl Debug for FfmpegSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("FfmpegSource")
            .field("streams", &self.streams)
            .field("file_path", &self.file_path)
            .finish_non_exhaustive()
    }
}

impl FfmpegSource {
    /// Open a media file and read its stream table.
    ///
    /// Initialises FFmpeg (idempotent), checks the file is readable, then
    /// allocates a format context, parses the container header and resolves
    /// per-stream information.
    ///
    /// # Errors
    ///
    /// - [`ProbeError::FileOpen`] if the file cannot be accessed.
    /// - [`ProbeError::FormatAllocation`] if the format context cannot be
    ///   allocated.
    /// - [`ProbeError::HeaderParse`] if the container header is unreadable.
    /// - [`ProbeError::StreamInfo`] if stream metadata cannot be resolved.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ProbeError> {
        let path = path.as_ref();
        let file_path = path.to_path_buf();

        log::debug!("Opening media file: {}", file_path.display());

        ffmpeg_next::init()?;

        // Only the accessibility check; FFmpeg reopens the path itself.
        File::open(path).map_err(|error| ProbeError::FileOpen {
            path: file_path.clone(),
            reason: error.to_string(),
        })?;

        let url = path
            .to_str()
            .and_then(|value| CString::new(value).ok())
            .ok_or_else(|| ProbeError::FileOpen {
                path: file_path.clone(),
                reason: "path is not valid UTF-8 or contains a NUL byte".to_string(),
            })?;

        let input_context = open_input_context(&file_path, &url)?;

        let duration_micros = input_context.duration();
        let streams: Vec<StreamDescriptor> = input_context
            .streams()
            .map(|stream| {
                let parameters = stream.parameters();
                StreamDescriptor {
                    index: stream.index(),
                    kind: StreamKind::from(parameters.medium()),
                    codec: parameters.id().name().to_string(),
                    time_base: stream.time_base(),
                    average_frame_rate: stream.avg_frame_rate(),
                    declared_frame_count: stream.frames(),
                    duration_micros,
                }
            })
            .collect();

        log::info!(
            "Opened media file: {} (format={}, duration={}us, streams={})",
            file_path.display(),
            input_context.format().name(),
            duration_micros,
            streams.len(),
        );

        Ok(Self {
            input_context,
            streams,
            file_path,
        })
    }

    /// Path this source was opened from.
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Container format name (e.g. `"mov,mp4,m4a,3gp,3g2,mj2"`, `"matroska,webm"`).
    pub fn format_name(&self) -> &str {
        self.input_context.format().name()
    }
}

/// Run the three steps of opening a container, mapping each failure to its
/// own error kind.
///
/// `avformat_open_input` frees the context itself on failure; after a
/// successful open the context is closed here on the stream-info failure
/// path and by [`Input`]'s `Drop` afterwards.
fn open_input_context(path: &Path, url: &CString) -> Result<Input, ProbeError> {
    let mut context: *mut AVFormatContext = unsafe { avformat_alloc_context() };
    if context.is_null() {
        return Err(ProbeError::FormatAllocation {
            path: path.to_path_buf(),
        });
    }

    let result = unsafe {
        avformat_open_input(&mut context, url.as_ptr(), ptr::null_mut(), ptr::null_mut())
    };
    if result < 0 {
        return Err(ProbeError::HeaderParse {
            path: path.to_path_buf(),
            reason: FfmpegError::from(result).to_string(),
        });
    }

    let result = unsafe { avformat_find_stream_info(context, ptr::null_mut()) };
    if result < 0 {
        unsafe { avformat_close_input(&mut context) };
        return Err(ProbeError::StreamInfo {
            path: path.to_path_buf(),
            reason: FfmpegError::from(result).to_string(),
        });
    }

    Ok(unsafe { Input::wrap(context) })
}

impl DemuxedPacket for Packet {
    fn stream_index(&self) -> usize {
        self.stream() as usize
    }

    fn pts(&self) -> Option<i64> {
        Packet::pts(self)
    }

    fn dts(&self) -> Option<i64> {
        Packet::dts(self)
    }
}

impl MediaSource for FfmpegSource {
    type Packet = Packet;
    type Codec = Codec;
    type Decoder = FfmpegDecoder;

    fn streams(&self) -> &[StreamDescriptor] {
        &self.streams
    }

    fn find_decoder(&self, stream: &StreamDescriptor) -> Result<Codec, ProbeError> {
        let codec_id = self
            .input_context
            .stream(stream.index)
            .ok_or(FfmpegError::StreamNotFound)?
            .parameters()
            .id();

        ffmpeg_next::decoder::find(codec_id).ok_or_else(|| ProbeError::UnsupportedCodec {
            codec: stream.codec.clone(),
        })
    }

    fn seek_to_start(&mut self, stream_index: usize) -> Result<(), ProbeError> {
        let result = unsafe {
            av_seek_frame(
                self.input_context.as_mut_ptr(),
                stream_index as c_int,
                0,
                AVSEEK_FLAG_ANY as c_int,
            )
        };
        if result < 0 {
            return Err(ProbeError::from(FfmpegError::from(result)));
        }
        Ok(())
    }

    fn open_decoder(
        &self,
        stream: &StreamDescriptor,
        codec: Codec,
    ) -> Result<FfmpegDecoder, ProbeError> {
        let decoder_open_error = |error: FfmpegError| ProbeError::DecoderOpen {
            codec: stream.codec.clone(),
            reason: error.to_string(),
        };

        let parameters = self
            .input_context
            .stream(stream.index)
            .ok_or(FfmpegError::StreamNotFound)?
            .parameters();
        let decoder = CodecContext::from_parameters(parameters)
            .and_then(|context| context.decoder().open_as(codec))
            .and_then(|opened| opened.video())
            .map_err(decoder_open_error)?;

        log::debug!(
            "Opened {} decoder for stream {} ({}x{})",
            stream.codec,
            stream.index,
            decoder.width(),
            decoder.height(),
        );

        Ok(FfmpegDecoder {
            decoder,
            frame: VideoFrame::empty(),
        })
    }

    fn read_packet(&mut self) -> Option<Packet> {
        let mut packet = Packet::empty();
        match packet.read(&mut self.input_context) {
            Ok(()) => Some(packet),
            Err(FfmpegError::Eof) => None,
            Err(error) => {
                log::warn!(
                    "Stopping read of {} after demux error: {error}",
                    self.file_path.display()
                );
                None
            }
        }
    }
}

/// An opened FFmpeg video decoder plus its reusable frame buffer.
pub struct FfmpegDecoder {
    decoder: VideoDecoder,
    frame: VideoFrame,
}

impl Debug for FfmpegDecoder {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("FfmpegDecoder")
            .field("width", &self.decoder.width())
            .field("height", &self.decoder.height())
            .finish_non_exhaustive()
    }
}

impl FrameDecoder for FfmpegDecoder {
    type Packet = Packet;

    fn send_packet(&mut self, packet: &Packet) -> Result<(), ProbeError> {
        self.decoder.send_packet(packet)?;
        Ok(())
    }

    fn receive_frame(&mut self) -> Result<FrameOutcome, ProbeError> {
        match self.decoder.receive_frame(&mut self.frame) {
            Ok(()) => Ok(FrameOutcome::Frame {
                key_frame: self.frame.is_key(),
            }),
            Err(FfmpegError::Other { errno }) if errno == EAGAIN => Ok(FrameOutcome::NeedMoreInput),
            Err(FfmpegError::Eof) => Ok(FrameOutcome::EndOfStream),
            Err(error) => Err(ProbeError::from(error)),
        }
    }
}
