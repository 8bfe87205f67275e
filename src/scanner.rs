//! Bounded keyframe scanning.
//!
//! The scan seeks to the start of the selected video stream, then walks the
//! demux cursor packet by packet. Packets of the selected stream are decoded
//! and every decoded frame is classified; packets that produce a keyframe
//! contribute their presentation time to the result.
//!
//! Only frames that were actually decoded are charged against the packet
//! budget. Packets of other streams, rejected submissions and "need more
//! input" / "end of stream" signals from the decoder are skipped without
//! charge. The scan ends when the input runs out or the budget reaches zero.
//!
//! # Example
//!
//! ```no_run
//! use keyprobe::{FfmpegSource, ScanOptions};
//!
//! let mut source = FfmpegSource::open("input.mp4")?;
//! let report = keyprobe::scan_key_frames(&mut source, &ScanOptions::new())?;
//! for start in &report.start_times_seconds {
//!     println!("GOP starts at {start:.3}s");
//! }
//! # Ok::<(), keyprobe::ProbeError>(())
//! ```

use ffmpeg_next::Rational;

use crate::{
    configuration::ScanOptions,
    conversion::ticks_to_seconds,
    error::ProbeError,
    estimate::estimate_frame_count,
    report::{KeyFrameReport, StreamSummary, assemble},
    selector::{SelectedStream, select_video_stream},
    source::{DemuxedPacket, FrameDecoder, FrameOutcome, MediaSource},
};

/// Why the packet loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanEnd {
    EndOfInput,
    BudgetExhausted,
}

/// What the packet loop gathered.
#[derive(Debug)]
struct ScanOutcome {
    start_times_seconds: Vec<f64>,
    frames_decoded: usize,
    end: ScanEnd,
}

/// Scan `source` for keyframes of its first video stream.
///
/// Fails before any packet is read if the options are invalid, the source
/// has no video stream, no decoder exists for it, or the decoder cannot be
/// opened. Once scanning starts it always produces a report, possibly empty
/// and possibly truncated by the packet budget.
///
/// # Errors
///
/// [`ProbeError::InvalidBudget`], [`ProbeError::NoVideoStream`],
/// [`ProbeError::UnsupportedCodec`] or [`ProbeError::DecoderOpen`].
pub fn scan_key_frames<S: MediaSource>(
    source: &mut S,
    options: &ScanOptions,
) -> Result<KeyFrameReport, ProbeError> {
    options.validate()?;

    let SelectedStream { descriptor, codec } = select_video_stream(source)?;

    let estimated_frame_count = estimate_frame_count(
        descriptor.declared_frame_count,
        descriptor.duration_micros,
        descriptor.average_frame_rate,
    );
    log::debug!(
        "Stream {} frame count: declared={}, estimated={}",
        descriptor.index,
        descriptor.declared_frame_count,
        estimated_frame_count,
    );

    if let Err(error) = source.seek_to_start(descriptor.index) {
        log::debug!(
            "Seek to start of stream {} failed, reading from current position: {error}",
            descriptor.index
        );
    }

    let mut decoder = source.open_decoder(&descriptor, codec)?;

    let outcome = scan_packets(
        source,
        &mut decoder,
        descriptor.index,
        descriptor.time_base,
        options.packet_budget,
    );

    log::info!(
        "Keyframe scan of stream {} finished: {} keyframes in {} decoded frames ({:?})",
        descriptor.index,
        outcome.start_times_seconds.len(),
        outcome.frames_decoded,
        outcome.end,
    );

    let summary = StreamSummary {
        stream_index: descriptor.index,
        codec: descriptor.codec,
        time_base: descriptor.time_base,
        average_frame_rate: descriptor.average_frame_rate,
        declared_frame_count: descriptor.declared_frame_count,
        estimated_frame_count,
        frames_decoded: outcome.frames_decoded,
        budget_exhausted: outcome.end == ScanEnd::BudgetExhausted,
    };

    Ok(assemble(outcome.start_times_seconds, summary, options))
}

/// The decode-and-classify loop.
///
/// Each packet is dropped at the end of its iteration, whichever branch it
/// took.
fn scan_packets<S: MediaSource>(
    source: &mut S,
    decoder: &mut S::Decoder,
    stream_index: usize,
    time_base: Rational,
    packet_budget: usize,
) -> ScanOutcome {
    let mut start_times_seconds = Vec::new();
    let mut remaining = packet_budget;
    let mut frames_decoded = 0;

    while let Some(packet) = source.read_packet() {
        if packet.stream_index() != stream_index {
            continue;
        }

        if let Err(error) = decoder.send_packet(&packet) {
            log::trace!("Skipping packet rejected by decoder: {error}");
            continue;
        }

        let key_frame = match decoder.receive_frame() {
            Ok(FrameOutcome::Frame { key_frame }) => key_frame,
            Ok(FrameOutcome::NeedMoreInput | FrameOutcome::EndOfStream) => continue,
            Err(error) => {
                log::trace!("Skipping packet after decode error: {error}");
                continue;
            }
        };

        if key_frame {
            match packet.pts().or_else(|| packet.dts()) {
                Some(ticks) => start_times_seconds.push(ticks_to_seconds(ticks, time_base)),
                None => log::trace!("Keyframe packet without timestamp, not recorded"),
            }
        }

        frames_decoded += 1;
        remaining -= 1;
        if remaining == 0 {
            return ScanOutcome {
                start_times_seconds,
                frames_decoded,
                end: ScanEnd::BudgetExhausted,
            };
        }
    }

    ScanOutcome {
        start_times_seconds,
        frames_decoded,
        end: ScanEnd::EndOfInput,
    }
}
