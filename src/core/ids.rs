use std::sync::atomic::{AtomicU64, Ordering};
use crate::core::types::CampaignId;

/// Hands out unique, strictly increasing campaign ids.
///
/// Uniqueness only holds within one process lifetime; nothing is persisted.
#[derive(Debug, Default)]
pub struct IdSupplier {
    counter: AtomicU64,
}

impl IdSupplier {
    pub fn new() -> Self {
        IdSupplier {
            counter: AtomicU64::new(0),
        }
    }

    /// Returns the next id, starting at 1. Increment-and-read is a single
    /// atomic step so concurrent callers can never observe the same value.
    pub fn next_id(&self) -> CampaignId {
        CampaignId(self.counter.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn ids_start_above_zero_and_increase() {
        let ids = IdSupplier::new();
        assert_eq!(ids.next_id(), CampaignId(1));
        assert_eq!(ids.next_id(), CampaignId(2));
        assert_eq!(ids.next_id(), CampaignId(3));
    }

    #[test]
    fn ids_unique_under_concurrent_callers() {
        let ids = Arc::new(IdSupplier::new());
        let mut handles = Vec::new();

        for _ in 0..8 {
            let ids = ids.clone();
            handles.push(thread::spawn(move || {
                (0..500).map(|_| ids.next_id()).collect::<Vec<_>>()
            }));
        }

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate id {}", id);
            }
        }
        assert_eq!(seen.len(), 8 * 500);
    }
}
