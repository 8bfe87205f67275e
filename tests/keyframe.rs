//! Keyframe probing integration tests against FFmpeg.
//!
//! Tests require fixture files from `tests/fixtures/generate_fixtures.sh`
//! and are skipped when they are missing.

use std::path::Path;

use keyprobe::{FfmpegSource, KeyFrameProbe, MediaSource, ScanOptions, StreamKind};

fn sample_video_path() -> &'static str {
    "tests/fixtures/sample_video.mp4"
}

fn sample_webm_path() -> &'static str {
    "tests/fixtures/sample_video.webm"
}

#[test]
fn keyframes_are_found() {
    let path = sample_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let report = keyprobe::probe_key_frames(path).expect("probe");

    assert!(!report.is_empty(), "expected at least one keyframe");
    assert!(report.len() <= 1_000);
    assert!(!report.is_truncated(), "150 frames fit the default budget");
    assert_eq!(report.stream.codec, "h264");
}

#[test]
fn keyframes_lie_within_duration() {
    let path = sample_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let source = FfmpegSource::open(path).expect("open");
    let duration_seconds = source.streams()[0].duration_micros as f64 / 1_000_000.0;
    drop(source);

    let report = keyprobe::probe_key_frames(path).expect("probe");
    for start in &report.start_times_seconds {
        assert!(*start >= 0.0, "negative keyframe time {start}");
        assert!(
            *start <= duration_seconds + 0.5,
            "keyframe {start} beyond duration {duration_seconds}"
        );
    }
}

#[test]
fn repeated_probes_are_identical() {
    let path = sample_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let first = keyprobe::probe_key_frames(path).expect("first probe");
    let second = keyprobe::probe_key_frames(path).expect("second probe");
    assert_eq!(first.start_times_seconds, second.start_times_seconds);
}

#[test]
fn small_budget_truncates() {
    let path = sample_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let options = ScanOptions::new().with_packet_budget(10);
    let report = keyprobe::probe_key_frames_with_options(path, &options).expect("probe");
    assert!(report.is_truncated());
    assert_eq!(report.stream.frames_decoded, 10);
    assert!(report.len() <= 10);
}

#[test]
fn first_stream_is_video_in_fixture() {
    let path = sample_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let source = FfmpegSource::open(path).expect("open");
    let video = keyprobe::first_video_stream(source.streams()).expect("video stream");
    assert_eq!(video.kind, StreamKind::Video);
    assert!(video.time_base.denominator() > 0);
}

#[test]
fn webm_frame_count_is_estimated() {
    let path = sample_webm_path();
    if !Path::new(path).exists() {
        return;
    }

    let report = keyprobe::probe_key_frames(path).expect("probe");
    if report.stream.declared_frame_count == 0 {
        assert!(
            report.stream.estimated_frame_count > 0,
            "expected an estimate from duration and frame rate"
        );
    }
    assert!(!report.is_empty());
}

#[test]
fn batch_probe_keeps_input_order() {
    let path = sample_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let probe = KeyFrameProbe::default();
    let results = probe.probe_many(&[path, "this_file_does_not_exist.mp4", path]);
    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert!(results[1].is_err());
    assert!(results[2].is_ok());
}
