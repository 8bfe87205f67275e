//! Scan configuration.
//!
//! [`ScanOptions`] is a small builder carrying the knobs of a keyframe scan.
//! A default-constructed value reproduces the classic probe: a 1000-packet
//! budget and results in demux order.
//!
//! # Example
//!
//! ```no_run
//! use keyprobe::ScanOptions;
//!
//! let options = ScanOptions::new()
//!     .with_packet_budget(250)
//!     .with_sorted_output(true);
//! let report = keyprobe::probe_key_frames_with_options("input.webm", &options)?;
//! # Ok::<(), keyprobe::ProbeError>(())
//! ```

use crate::error::ProbeError;

/// Number of decoded frames after which a scan stops by default.
pub const DEFAULT_PACKET_BUDGET: usize = 1_000;

/// Configuration for a keyframe scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Maximum number of selected-stream packets that may yield a decoded
    /// frame before the scan stops. Results are truncated, not exhaustive,
    /// for longer streams.
    pub(crate) packet_budget: usize,
    /// Sort the timestamps ascending instead of keeping demux order.
    pub(crate) sorted_output: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanOptions {
    /// Create options with default settings.
    ///
    /// Defaults: budget of [`DEFAULT_PACKET_BUDGET`], demux-order output.
    pub fn new() -> Self {
        Self {
            packet_budget: DEFAULT_PACKET_BUDGET,
            sorted_output: false,
        }
    }

    /// Set the packet budget.
    ///
    /// A budget of zero is rejected when the scan starts with
    /// [`ProbeError::InvalidBudget`].
    #[must_use]
    pub fn with_packet_budget(mut self, budget: usize) -> Self {
        self.packet_budget = budget;
        self
    }

    /// Sort timestamps ascending before returning them.
    ///
    /// Off by default. Containers with non-monotonic packet interleaving can
    /// otherwise produce out-of-order timestamps.
    #[must_use]
    pub fn with_sorted_output(mut self, sorted: bool) -> Self {
        self.sorted_output = sorted;
        self
    }

    /// The configured packet budget.
    pub fn packet_budget(&self) -> usize {
        self.packet_budget
    }

    /// Whether output will be sorted.
    pub fn sorted_output(&self) -> bool {
        self.sorted_output
    }

    pub(crate) fn validate(&self) -> Result<(), ProbeError> {
        if self.packet_budget == 0 {
            return Err(ProbeError::InvalidBudget);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_probe() {
        let options = ScanOptions::default();
        assert_eq!(options.packet_budget(), 1_000);
        assert!(!options.sorted_output());
        assert!(options.validate().is_ok());
    }

    #[test]
    fn zero_budget_is_rejected() {
        let options = ScanOptions::new().with_packet_budget(0);
        assert!(matches!(options.validate(), Err(ProbeError::InvalidBudget)));
    }
}
