//! Error handling integration tests.
//!
//! These tests verify that each open/selection failure surfaces as its own
//! typed error instead of an empty result.

use std::path::Path;

use keyprobe::{FfmpegSource, ProbeError};

#[test]
fn open_nonexistent_file() {
    let result = keyprobe::probe_key_frames("this_file_does_not_exist.mp4");

    match result {
        Err(ProbeError::FileOpen { path, .. }) => {
            assert_eq!(path, Path::new("this_file_does_not_exist.mp4"));
        }
        other => panic!("expected FileOpen, got {other:?}"),
    }
}

#[test]
fn open_nonexistent_file_message() {
    let error = FfmpegSource::open("this_file_does_not_exist.mp4").unwrap_err();
    assert!(
        error.to_string().contains("Failed to open media file"),
        "Error message should mention file open failure: {error}",
    );
}

#[test]
fn open_invalid_file() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let invalid_file_path = temporary_directory.path().join("invalid.mp4");
    std::fs::write(&invalid_file_path, b"this is not a media file")
        .expect("Failed to write invalid file");

    let result = keyprobe::probe_key_frames(&invalid_file_path);
    assert!(
        matches!(
            result,
            Err(ProbeError::HeaderParse { .. }) | Err(ProbeError::StreamInfo { .. })
        ),
        "Expected a container parse error, got {result:?}"
    );
}

#[test]
fn empty_file_is_not_a_container() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let empty_file_path = temporary_directory.path().join("empty.mkv");
    std::fs::write(&empty_file_path, b"").expect("Failed to write empty file");

    let result = keyprobe::probe_key_frames(&empty_file_path);
    assert!(result.is_err(), "Expected error for empty file");
    assert!(!matches!(result, Err(ProbeError::FileOpen { .. })));
}

#[test]
fn directory_is_not_a_container() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let result = keyprobe::probe_key_frames(temporary_directory.path());
    assert!(result.is_err(), "Expected error for a directory");
}

#[test]
fn no_video_stream_error() {
    let path = "tests/fixtures/sample_audio_only.m4a";
    if !Path::new(path).exists() {
        return;
    }

    let result = keyprobe::probe_key_frames(path);
    assert!(matches!(result, Err(ProbeError::NoVideoStream)));

    let error_message = result.unwrap_err().to_string();
    assert!(
        error_message.contains("No video stream"),
        "Error should mention no video stream: {error_message}",
    );
}
