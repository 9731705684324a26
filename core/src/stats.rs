//! Reconcile counters
//!
//! Tracks how much device traffic the cache issues and how much the diff
//! saves. Counters wrap instead of overflowing.

/// Running totals since the cache was created or last reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub applies: u64,
    pub sub_applies: u64,
    pub resyncs: u64,
    /// Device calls made by reconcilers, binding helpers and invalidation hooks
    pub calls_issued: u64,
    /// Diffed slots found already matching the shadow
    pub calls_skipped: u64,
    /// Shadow slots scrubbed by invalidation hooks
    pub slots_invalidated: u64,
}

impl CacheStats {
    #[inline]
    pub(crate) fn issued(&mut self, calls: u64) {
        self.calls_issued = self.calls_issued.wrapping_add(calls);
    }

    #[inline]
    pub(crate) fn skipped(&mut self) {
        self.calls_skipped = self.calls_skipped.wrapping_add(1);
    }

    #[inline]
    pub(crate) fn invalidated(&mut self) {
        self.slots_invalidated = self.slots_invalidated.wrapping_add(1);
    }

    /// Fraction of diffed checks that avoided a device call
    pub fn skip_ratio(&self) -> f64 {
        let total = self.calls_issued.wrapping_add(self.calls_skipped);
        if total == 0 {
            0.0
        } else {
            self.calls_skipped as f64 / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_wrap() {
        let mut stats = CacheStats {
            calls_issued: u64::MAX,
            ..Default::default()
        };
        stats.issued(2);
        assert_eq!(stats.calls_issued, 1);
    }

    #[test]
    fn test_skip_ratio() {
        let mut stats = CacheStats::default();
        assert_eq!(stats.skip_ratio(), 0.0);
        stats.issued(1);
        stats.skipped();
        stats.skipped();
        stats.skipped();
        assert!((stats.skip_ratio() - 0.75).abs() < f64::EPSILON);
    }
}
