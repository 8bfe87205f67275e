//! Benchmarks for keyframe probing.
//!
//! Run with: cargo bench
//!
//! Requires fixture files from `tests/fixtures/generate_fixtures.sh`.

use std::path::Path;

use criterion::{Criterion, criterion_group, criterion_main};
use keyprobe::{FfmpegLogLevel, FfmpegSource, KeyFrameProbe, ScanOptions};

const SAMPLE_VIDEO: &str = "tests/fixtures/sample_video.mp4";
const SAMPLE_WEBM: &str = "tests/fixtures/sample_video.webm";

fn benchmark_open(criterion: &mut Criterion) {
    if keyprobe::initialize(FfmpegLogLevel::Error).is_err() {
        eprintln!("Skipping benchmark: FFmpeg failed to initialise");
        return;
    }

    if !Path::new(SAMPLE_VIDEO).exists() {
        eprintln!("Skipping benchmark: fixture not found");
        return;
    }

    criterion.bench_function("open container", |bencher| {
        bencher.iter(|| {
            let _source = FfmpegSource::open(SAMPLE_VIDEO).unwrap();
        });
    });
}

fn benchmark_probe(criterion: &mut Criterion) {
    if !Path::new(SAMPLE_VIDEO).exists() {
        return;
    }

    criterion.bench_function("probe keyframes (mp4)", |bencher| {
        bencher.iter(|| {
            let _report = keyprobe::probe_key_frames(SAMPLE_VIDEO).unwrap();
        });
    });

    let short = KeyFrameProbe::new(ScanOptions::new().with_packet_budget(30));
    criterion.bench_function("probe keyframes (mp4, budget 30)", |bencher| {
        bencher.iter(|| {
            let _report = short.probe(SAMPLE_VIDEO).unwrap();
        });
    });

    if Path::new(SAMPLE_WEBM).exists() {
        criterion.bench_function("probe keyframes (webm)", |bencher| {
            bencher.iter(|| {
                let _report = keyprobe::probe_key_frames(SAMPLE_WEBM).unwrap();
            });
        });
    }
}

criterion_group!(benches, benchmark_open, benchmark_probe);
criterion_main!(benches);
