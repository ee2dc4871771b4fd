//! # Metrics
//!
//! Operation counters kept by the catalog. The store is single-threaded and
//! every counting path already holds `&mut`, so these are plain integers.

/// Metrics collector
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    inserts: u64,
    deletes: u64,
    finds: u64,
    find_hits: u64,
    promotions: u64,
    grows: u64,
    shrinks: u64,
}

impl Metrics {
    /// Create new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_insert(&mut self) {
        self.inserts += 1;
    }

    pub fn record_delete(&mut self) {
        self.deletes += 1;
    }

    /// Record a hash lookup; `promoted` when a chain entry moved to the head
    pub fn record_find(&mut self, hit: bool, promoted: bool) {
        self.finds += 1;
        if hit {
            self.find_hits += 1;
        }
        if promoted {
            self.promotions += 1;
        }
    }

    pub fn record_grow(&mut self) {
        self.grows += 1;
    }

    pub fn record_shrink(&mut self) {
        self.shrinks += 1;
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            inserts: self.inserts,
            deletes: self.deletes,
            finds: self.finds,
            find_hits: self.find_hits,
            promotions: self.promotions,
            grows: self.grows,
            shrinks: self.shrinks,
        }
    }
}

/// Metrics snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    pub inserts: u64,
    pub deletes: u64,
    pub finds: u64,
    pub find_hits: u64,
    pub promotions: u64,
    pub grows: u64,
    pub shrinks: u64,
}

impl MetricsSnapshot {
    /// Fraction of finds that hit, 0.0 before any find
    pub fn hit_rate(&self) -> f64 {
        if self.finds == 0 {
            0.0
        } else {
            self.find_hits as f64 / self.finds as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_counters() {
        let mut metrics = Metrics::new();
        metrics.record_find(true, false);
        metrics.record_find(true, true);
        metrics.record_find(false, false);
        let snap = metrics.snapshot();
        assert_eq!(snap.finds, 3);
        assert_eq!(snap.find_hits, 2);
        assert_eq!(snap.promotions, 1);
        assert!((snap.hit_rate() - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_hit_rate_without_finds() {
        assert_eq!(Metrics::new().snapshot().hit_rate(), 0.0);
    }
}
