//! Fixed-length bucket histogram.

use serde::{Deserialize, Serialize};

/// Ordered bucket counters, indexed `0..len()`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Histogram {
    counts: Vec<u32>,
}

impl Histogram {
    /// All-zero histogram with `buckets` slots.
    pub fn new(buckets: usize) -> Self {
        Self {
            counts: vec![0; buckets],
        }
    }

    pub fn from_counts(counts: Vec<u32>) -> Self {
        Self { counts }
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    pub fn get(&self, bucket: usize) -> Option<u32> {
        self.counts.get(bucket).copied()
    }

    /// Bump a bucket by one, saturating at `u32::MAX`.
    ///
    /// Panics if `bucket` is out of range.
    pub fn increment(&mut self, bucket: usize) {
        let slot = &mut self.counts[bucket];
        *slot = slot.saturating_add(1);
    }

    /// Sum of all counters.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }

    /// Number of buckets with a non-zero count.
    pub fn occupied(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Copy with every counter capped at `max`.
    pub fn clamped(&self, max: u32) -> Self {
        Self {
            counts: self.counts.iter().map(|&c| c.min(max)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_all_zero() {
        let h = Histogram::new(8);
        assert_eq!(h.len(), 8);
        assert_eq!(h.total(), 0);
        assert_eq!(h.occupied(), 0);
    }

    #[test]
    fn increment_and_totals() {
        let mut h = Histogram::new(4);
        h.increment(1);
        h.increment(1);
        h.increment(3);
        assert_eq!(h.counts(), &[0, 2, 0, 1]);
        assert_eq!(h.total(), 3);
        assert_eq!(h.occupied(), 2);
        assert_eq!(h.get(1), Some(2));
        assert_eq!(h.get(4), None);
    }

    #[test]
    fn increment_saturates() {
        let mut h = Histogram::from_counts(vec![u32::MAX]);
        h.increment(0);
        assert_eq!(h.get(0), Some(u32::MAX));
    }

    #[test]
    fn clamped_caps_counts() {
        let h = Histogram::from_counts(vec![1, 300, 70_000]);
        assert_eq!(h.clamped(255).counts(), &[1, 255, 255]);
    }
}
