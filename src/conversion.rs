//! Internal timestamp and rate conversion helpers.

use ffmpeg_next::Rational;

/// Microsecond ticks per second of container-level durations (`AV_TIME_BASE`).
pub(crate) const MICROSECONDS_PER_SECOND: i64 = 1_000_000;

/// Seconds represented by one tick of `time_base`.
///
/// Computed the way `av_q2d` does, so that `ticks * seconds_per_tick` matches
/// FFmpeg's own conversions bit for bit. A zero denominator yields `0.0`.
pub(crate) fn seconds_per_tick(time_base: Rational) -> f64 {
    if time_base.denominator() == 0 {
        return 0.0;
    }
    time_base.numerator() as f64 / time_base.denominator() as f64
}

/// Convert an integer tick count in `time_base` units to seconds.
pub(crate) fn ticks_to_seconds(ticks: i64, time_base: Rational) -> f64 {
    ticks as f64 * seconds_per_tick(time_base)
}

/// Whole seconds of a container duration expressed in microsecond ticks.
///
/// Negative (unknown) durations clamp to zero.
pub(crate) fn whole_seconds(duration_micros: i64) -> i64 {
    (duration_micros / MICROSECONDS_PER_SECOND).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_zero_is_zero_seconds() {
        assert_eq!(ticks_to_seconds(0, Rational::new(1, 30)), 0.0);
    }

    #[test]
    fn ticks_scale_by_time_base() {
        let seconds = ticks_to_seconds(90_000, Rational::new(1, 90_000));
        assert!((seconds - 1.0).abs() < 1e-12);

        let seconds = ticks_to_seconds(512, Rational::new(1, 12_800));
        assert!((seconds - 0.04).abs() < 1e-12);
    }

    #[test]
    fn zero_denominator_does_not_divide() {
        assert_eq!(seconds_per_tick(Rational::new(1, 0)), 0.0);
        assert_eq!(ticks_to_seconds(1_000, Rational::new(1, 0)), 0.0);
    }

    #[test]
    fn whole_seconds_truncates() {
        assert_eq!(whole_seconds(10_000_000), 10);
        assert_eq!(whole_seconds(10_999_999), 10);
        assert_eq!(whole_seconds(999_999), 0);
        assert_eq!(whole_seconds(-1), 0);
    }
}
