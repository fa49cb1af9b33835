use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use crate::analysis::analyzer::Analyzer;
use crate::analysis::planner::DimensionPlanner;
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::ids::IdSupplier;
use crate::core::types::{Campaign, CampaignId, PublishedDate, ScoreMap};
use crate::node::worker::Worker;
use crate::storage::store::PersistedStore;

/// Round-robin router over a fixed pool of workers sharing one store.
///
/// Every call advances the cursor modulo the pool size and goes to the worker
/// at the new position. Advance-and-read is one atomic step: concurrent
/// callers can never land on the same cursor value, so any N dispatches form a
/// contiguous rotation of the pool. There is no queueing, no retry, and no
/// awareness of worker load; failures propagate to the caller unchanged.
pub struct Dispatcher {
    workers: Vec<Worker>,
    cursor: AtomicUsize,
}

impl Dispatcher {
    pub fn new(
        store: Arc<PersistedStore>,
        analyzer: Arc<dyn Analyzer>,
        planner: Arc<dyn DimensionPlanner>,
        num_workers: usize,
    ) -> Self {
        assert!(num_workers > 0, "dispatcher needs at least one worker");
        let ids = Arc::new(IdSupplier::new());
        let workers = (0..num_workers)
            .map(|i| {
                Worker::new(
                    i,
                    store.clone(),
                    ids.clone(),
                    analyzer.clone(),
                    planner.clone(),
                )
            })
            .collect();

        Dispatcher {
            workers,
            cursor: AtomicUsize::new(0),
        }
    }

    pub fn with_config(
        config: &Config,
        analyzer: Arc<dyn Analyzer>,
        planner: Arc<dyn DimensionPlanner>,
    ) -> Self {
        let store = Arc::new(PersistedStore::open(config.storage_path.clone()));
        Dispatcher::new(store, analyzer, planner, config.num_workers)
    }

    pub fn pool_size(&self) -> usize {
        self.workers.len()
    }

    /// Advances the cursor and returns the worker at the new position. The
    /// cursor stays in [0, pool_size); the update is a single atomic step.
    fn select_worker(&self) -> &Worker {
        let n = self.workers.len();
        let prev = self
            .cursor
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |c| Some((c + 1) % n))
            .unwrap_or(0);
        &self.workers[(prev + 1) % n]
    }

    pub fn create_campaign(&self, topic: &str) -> Result<CampaignId> {
        self.select_worker().create_campaign(topic)
    }

    pub fn process_document(
        &self,
        campaign_id: CampaignId,
        document: &str,
        article_id: &str,
        published_date: PublishedDate,
    ) -> Result<ScoreMap> {
        self.select_worker()
            .process_document(campaign_id, document, article_id, published_date)
    }

    pub fn get_campaign_details(&self, campaign_id: CampaignId) -> Option<Campaign> {
        self.select_worker().get_campaign_details(campaign_id)
    }

    pub fn get_campaign_id_list(&self) -> Vec<CampaignId> {
        self.select_worker().get_campaign_id_list()
    }

    pub fn get_article_ids_for_campaign(&self, campaign_id: CampaignId) -> Vec<String> {
        self.select_worker().get_article_ids_for_campaign(campaign_id)
    }

    pub fn get_date_list(&self, campaign_id: CampaignId) -> Vec<PublishedDate> {
        self.select_worker().get_date_list(campaign_id)
    }

    pub fn get_by_date(
        &self,
        campaign_id: CampaignId,
        date: PublishedDate,
    ) -> Option<HashMap<String, ScoreMap>> {
        self.select_worker().get_by_date(campaign_id, date)
    }

    pub fn get_by_article_id(
        &self,
        campaign_id: CampaignId,
        article_id: &str,
    ) -> Option<ScoreMap> {
        self.select_worker().get_by_article_id(campaign_id, article_id)
    }

    #[cfg(test)]
    pub(crate) fn select_worker_index(&self) -> usize {
        self.select_worker().id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use tempfile::TempDir;
    use crate::analysis::analyzer::TableAnalyzer;
    use crate::analysis::planner::StaticPlanner;

    fn dispatcher(pool: usize) -> (Dispatcher, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(PersistedStore::open(dir.path().join("store.json")));
        let d = Dispatcher::new(
            store,
            Arc::new(TableAnalyzer::from_pairs(&[("a", 0.5)])),
            Arc::new(StaticPlanner::from_names(&["a"])),
            pool,
        );
        (d, dir)
    }

    #[test]
    fn sequential_dispatch_rotates_from_index_one() {
        let (d, _dir) = dispatcher(4);
        let chosen: Vec<usize> = (0..10).map(|_| d.select_worker_index()).collect();
        assert_eq!(chosen, vec![1, 2, 3, 0, 1, 2, 3, 0, 1, 2]);
    }

    #[test]
    fn single_worker_pool_always_selects_it() {
        let (d, _dir) = dispatcher(1);
        for _ in 0..5 {
            assert_eq!(d.select_worker_index(), 0);
        }
    }

    #[test]
    fn concurrent_dispatch_spreads_evenly() {
        let (d, _dir) = dispatcher(4);
        let d = Arc::new(d);

        let mut handles = Vec::new();
        for _ in 0..8 {
            let d = d.clone();
            handles.push(thread::spawn(move || {
                let mut counts = [0usize; 4];
                for _ in 0..100 {
                    let idx = d.select_worker_index();
                    assert!(idx < 4);
                    counts[idx] += 1;
                }
                counts
            }));
        }

        let mut totals = [0usize; 4];
        for handle in handles {
            let counts = handle.join().unwrap();
            for (i, c) in counts.iter().enumerate() {
                totals[i] += c;
            }
        }

        // Exactly N selections, and 800 dispatches over 4 workers land
        // 200 on each: the cursor never hands two callers the same value.
        assert_eq!(totals.iter().sum::<usize>(), 800);
        assert_eq!(totals, [200, 200, 200, 200]);
    }

    #[test]
    fn dispatch_forwards_operations_to_workers() {
        let (d, _dir) = dispatcher(3);
        let id = d.create_campaign("T").unwrap();
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        let scores = d.process_document(id, "doc1", "art1", date).unwrap();
        assert_eq!(scores["a"], 0.5);
        assert_eq!(d.get_campaign_id_list(), vec![id]);
        assert_eq!(d.get_by_article_id(id, "art1"), Some(scores));
    }

    #[test]
    fn worker_failure_propagates_unchanged() {
        let (d, _dir) = dispatcher(2);
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let err = d
            .process_document(CampaignId(99), "doc", "art", date)
            .unwrap_err();
        assert_eq!(err.context, "campaign not found");
    }
}
