//! FFmpeg initialisation and log level configuration.
//!
//! FFmpeg keeps its own console logger, separate from the Rust
//! [`log`](https://crates.io/crates/log) facade. A probing tool usually wants
//! it silent, so the level is passed explicitly once at process start through
//! [`initialize`] instead of being flipped as a side effect of each probe.
//!
//! # Example
//!
//! ```no_run
//! use keyprobe::FfmpegLogLevel;
//!
//! keyprobe::initialize(FfmpegLogLevel::Quiet)?;
//! let report = keyprobe::probe_key_frames("input.mp4")?;
//! println!("{} keyframes", report.start_times_seconds.len());
//! # Ok::<(), keyprobe::ProbeError>(())
//! ```
//!
//! # Note
//!
//! This controls **FFmpeg's own console output**, not the Rust-side
//! diagnostic messages emitted via the `log` crate.

use ffmpeg_next::util::log::Level;

use crate::error::ProbeError;

/// FFmpeg internal log verbosity level.
///
/// Maps directly to FFmpeg's `AV_LOG_*` constants. Setting a level causes
/// FFmpeg to suppress all messages below that severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FfmpegLogLevel {
    /// Print no output at all. This is the default for probing.
    #[default]
    Quiet,
    /// Only log conditions after which the process will abort.
    Panic,
    /// Only log unrecoverable errors.
    Fatal,
    /// Log recoverable errors.
    Error,
    /// Log warnings (FFmpeg's own default).
    Warning,
    /// Log informational messages.
    Info,
    /// Log verbose informational messages.
    Verbose,
    /// Log debugging messages.
    Debug,
    /// Extremely verbose tracing output.
    Trace,
}

impl FfmpegLogLevel {
    fn to_ffmpeg_level(self) -> Level {
        match self {
            FfmpegLogLevel::Quiet => Level::Quiet,
            FfmpegLogLevel::Panic => Level::Panic,
            FfmpegLogLevel::Fatal => Level::Fatal,
            FfmpegLogLevel::Error => Level::Error,
            FfmpegLogLevel::Warning => Level::Warning,
            FfmpegLogLevel::Info => Level::Info,
            FfmpegLogLevel::Verbose => Level::Verbose,
            FfmpegLogLevel::Debug => Level::Debug,
            FfmpegLogLevel::Trace => Level::Trace,
        }
    }

    fn from_ffmpeg_level(level: Level) -> Self {
        match level {
            Level::Quiet => FfmpegLogLevel::Quiet,
            Level::Panic => FfmpegLogLevel::Panic,
            Level::Fatal => FfmpegLogLevel::Fatal,
            Level::Error => FfmpegLogLevel::Error,
            Level::Warning => FfmpegLogLevel::Warning,
            Level::Info => FfmpegLogLevel::Info,
            Level::Verbose => FfmpegLogLevel::Verbose,
            Level::Debug => FfmpegLogLevel::Debug,
            Level::Trace => FfmpegLogLevel::Trace,
        }
    }

    /// Parse a level name as accepted on the command line.
    ///
    /// Matching is case-insensitive; `warn` is accepted as an alias of
    /// `warning`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "quiet" => Some(FfmpegLogLevel::Quiet),
            "panic" => Some(FfmpegLogLevel::Panic),
            "fatal" => Some(FfmpegLogLevel::Fatal),
            "error" => Some(FfmpegLogLevel::Error),
            "warning" | "warn" => Some(FfmpegLogLevel::Warning),
            "info" => Some(FfmpegLogLevel::Info),
            "verbose" => Some(FfmpegLogLevel::Verbose),
            "debug" => Some(FfmpegLogLevel::Debug),
            "trace" => Some(FfmpegLogLevel::Trace),
            _ => None,
        }
    }
}

/// Initialise FFmpeg and apply its console log level.
///
/// Call once at process start. Calling it again is harmless; the latest
/// level wins.
///
/// # Errors
///
/// Returns [`ProbeError::FfmpegError`] if FFmpeg fails to initialise.
pub fn initialize(level: FfmpegLogLevel) -> Result<(), ProbeError> {
    ffmpeg_next::init()?;
    set_ffmpeg_log_level(level);
    log::debug!("FFmpeg initialised (log level {:?})", level);
    Ok(())
}

/// Set the FFmpeg internal log verbosity level.
///
/// This controls what FFmpeg prints to stderr. It does **not** affect
/// Rust-side `log` crate output.
pub fn set_ffmpeg_log_level(level: FfmpegLogLevel) {
    ffmpeg_next::util::log::set_level(level.to_ffmpeg_level());
}

/// Get the current FFmpeg internal log verbosity level.
///
/// Returns `None` if the current level does not map to a known variant.
pub fn get_ffmpeg_log_level() -> Option<FfmpegLogLevel> {
    ffmpeg_next::util::log::get_level()
        .ok()
        .map(FfmpegLogLevel::from_ffmpeg_level)
}

#[cfg(test)]
mod tests {
    use super::FfmpegLogLevel;

    #[test]
    fn parse_level_names() {
        assert_eq!(FfmpegLogLevel::parse("quiet"), Some(FfmpegLogLevel::Quiet));
        assert_eq!(FfmpegLogLevel::parse("WARN"), Some(FfmpegLogLevel::Warning));
        assert_eq!(FfmpegLogLevel::parse("Trace"), Some(FfmpegLogLevel::Trace));
        assert_eq!(FfmpegLogLevel::parse("loud"), None);
    }

    #[test]
    fn default_is_quiet() {
        assert_eq!(FfmpegLogLevel::default(), FfmpegLogLevel::Quiet);
    }
}
