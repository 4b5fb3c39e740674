use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for one analyzer run.
#[derive(Debug)]
pub struct FetchStats {
    batches: AtomicU64,
    requested: AtomicU64,
    fetched: AtomicU64,
    failed: AtomicU64,
}

impl Default for FetchStats {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchStats {
    pub const fn new() -> Self {
        Self {
            batches: AtomicU64::new(0),
            requested: AtomicU64::new(0),
            fetched: AtomicU64::new(0),
            failed: AtomicU64::new(0),
        }
    }

    pub fn inc_batches(&self, n: u64) {
        self.batches.fetch_add(n, Ordering::Relaxed);
    }

    /// Record the outcome of a single height lookup.
    pub fn record_fetch(&self, ok: bool) {
        self.requested.fetch_add(1, Ordering::Relaxed);
        if ok {
            self.fetched.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failed.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> FetchSnapshot {
        FetchSnapshot {
            batches: self.batches.load(Ordering::Relaxed),
            requested: self.requested.load(Ordering::Relaxed),
            fetched: self.fetched.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct FetchSnapshot {
    pub batches: u64,
    pub requested: u64,
    pub fetched: u64,
    pub failed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        assert_eq!(FetchStats::new().snapshot(), FetchSnapshot::default());
    }

    #[test]
    fn record_fetch_splits_outcomes() {
        let stats = FetchStats::new();
        stats.inc_batches(2);
        stats.record_fetch(true);
        stats.record_fetch(true);
        stats.record_fetch(false);

        assert_eq!(
            stats.snapshot(),
            FetchSnapshot {
                batches: 2,
                requested: 3,
                fetched: 2,
                failed: 1,
            }
        );
    }
}
