//! Frame count estimation for containers that do not declare one.
//!
//! Streaming-oriented containers such as Matroska and WebM usually leave the
//! per-stream frame count at zero. The estimate below is diagnostic metadata
//! only: it is reported alongside scan results and never bounds the scan.

use ffmpeg_next::Rational;

use crate::conversion::whole_seconds;

/// Return the declared frame count, or estimate one from duration and rate.
///
/// When `declared_frame_count` is positive it is returned unchanged.
/// Otherwise the estimate is
/// `floor(duration_micros / 1_000_000) * rate.numerator / rate.denominator`
/// in integer arithmetic. An unknown duration, a zero denominator, or a
/// non-positive rate yield `0`.
///
/// # Example
///
/// ```
/// use ffmpeg_next::Rational;
/// use keyprobe::estimate_frame_count;
///
/// assert_eq!(estimate_frame_count(0, 10_000_000, Rational::new(30, 1)), 300);
/// assert_eq!(estimate_frame_count(250, 10_000_000, Rational::new(30, 1)), 250);
/// ```
pub fn estimate_frame_count(
    declared_frame_count: i64,
    duration_micros: i64,
    average_frame_rate: Rational,
) -> u64 {
    if declared_frame_count > 0 {
        return declared_frame_count as u64;
    }

    let numerator = i64::from(average_frame_rate.numerator());
    let denominator = i64::from(average_frame_rate.denominator());
    if numerator <= 0 || denominator <= 0 {
        return 0;
    }

    let frames = whole_seconds(duration_micros).saturating_mul(numerator) / denominator;
    frames.max(0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_count_wins() {
        assert_eq!(estimate_frame_count(42, 10_000_000, Rational::new(30, 1)), 42);
    }

    #[test]
    fn ten_seconds_at_thirty_fps() {
        assert_eq!(estimate_frame_count(0, 10_000_000, Rational::new(30, 1)), 300);
    }

    #[test]
    fn fractional_seconds_are_floored_first() {
        // 10.9 s floors to 10 s before multiplying.
        assert_eq!(estimate_frame_count(0, 10_900_000, Rational::new(30, 1)), 300);
    }

    #[test]
    fn ntsc_rate_divides_by_denominator() {
        // 10 s * 30000 / 1001 = 299.7 -> 299
        assert_eq!(
            estimate_frame_count(0, 10_000_000, Rational::new(30_000, 1_001)),
            299
        );
    }

    #[test]
    fn unknown_inputs_yield_zero() {
        assert_eq!(estimate_frame_count(0, 0, Rational::new(30, 1)), 0);
        assert_eq!(estimate_frame_count(0, -1, Rational::new(30, 1)), 0);
        assert_eq!(estimate_frame_count(0, 10_000_000, Rational::new(0, 0)), 0);
        assert_eq!(estimate_frame_count(-5, 10_000_000, Rational::new(30, 0)), 0);
    }
}
