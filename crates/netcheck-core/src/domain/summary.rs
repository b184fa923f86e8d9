//! Per-run outcome counts.

/// Counts of how each target in a run was classified.
///
/// Every processed target lands in exactly one of the four buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Targets the dispatch loop handled (including unknown kinds).
    pub processed: usize,
    /// Probe returned a pass.
    pub passed: usize,
    /// Probe returned a fail with no diagnostic.
    pub failed: usize,
    /// Probe returned a fail with a diagnostic.
    pub errored: usize,
    /// No probe is registered for the kind.
    pub unknown: usize,
}

impl RunSummary {
    /// True when every processed target passed.
    pub const fn all_passed(&self) -> bool {
        self.passed == self.processed
    }

    /// Targets that did not pass, for any reason.
    pub const fn not_passed(&self) -> usize {
        self.failed + self.errored + self.unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_run_counts_as_all_passed() {
        assert!(RunSummary::default().all_passed());
    }

    #[test]
    fn test_not_passed_sums_failure_buckets() {
        let summary = RunSummary {
            processed: 6,
            passed: 2,
            failed: 1,
            errored: 2,
            unknown: 1,
        };
        assert_eq!(summary.not_passed(), 4);
        assert!(!summary.all_passed());
    }
}
