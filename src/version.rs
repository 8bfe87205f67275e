//! Versions of the linked FFmpeg libraries.
//!
//! FFmpeg packs each library version into one integer as
//! `major << 16 | minor << 8 | micro`. The helpers here unpack it into the
//! familiar dotted form, e.g. `"61.7.100"`.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// Versions of the three FFmpeg libraries the probe relies on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryVersions {
    /// `libavformat` (demuxing).
    pub avformat: String,
    /// `libavcodec` (decoding).
    pub avcodec: String,
    /// `libavutil` (shared utilities).
    pub avutil: String,
}

impl LibraryVersions {
    /// Versions of the libraries linked into this process.
    pub fn current() -> Self {
        Self {
            avformat: avformat_version(),
            avcodec: avcodec_version(),
            avutil: avutil_version(),
        }
    }
}

impl Display for LibraryVersions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "libavformat {}, libavcodec {}, libavutil {}",
            self.avformat, self.avcodec, self.avutil
        )
    }
}

/// Version of the linked `libavformat`.
pub fn avformat_version() -> String {
    format_version(ffmpeg_next::format::version())
}

/// Version of the linked `libavcodec`.
pub fn avcodec_version() -> String {
    format_version(ffmpeg_next::codec::version())
}

/// Version of the linked `libavutil`.
pub fn avutil_version() -> String {
    format_version(ffmpeg_next::util::version())
}

fn format_version(packed: u32) -> String {
    format!(
        "{}.{}.{}",
        packed >> 16,
        (packed >> 8) & 0xff,
        packed & 0xff
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpacks_major_minor_micro() {
        assert_eq!(format_version((61 << 16) | (7 << 8) | 100), "61.7.100");
        assert_eq!(format_version(0), "0.0.0");
    }

    #[test]
    fn display_lists_all_libraries() {
        let versions = LibraryVersions {
            avformat: "61.7.100".to_string(),
            avcodec: "61.19.100".to_string(),
            avutil: "59.39.100".to_string(),
        };
        assert_eq!(
            versions.to_string(),
            "libavformat 61.7.100, libavcodec 61.19.100, libavutil 59.39.100"
        );
    }
}
