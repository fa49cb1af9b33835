use rayon::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use crate::core::error::Result;
use crate::core::types::{CampaignId, DocumentSubmission, ScoreMap};
use crate::dispatch::dispatcher::Dispatcher;

/// Parallel document submitter for high-throughput scoring runs.
///
/// Feeds a batch of documents for one campaign through the dispatcher from a
/// rayon thread pool, so many analyzer calls run at once while the store
/// serializes the writes. Per-document failures stay in the result slot for
/// that document; one bad document never aborts the batch.
pub struct ParallelProcessor {
    pool: rayon::ThreadPool,
    pub threads: usize,
    pub progress: Arc<AtomicUsize>,
}

impl ParallelProcessor {
    pub fn new(threads: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| {
                crate::core::error::Error::new(
                    crate::core::error::ErrorKind::Internal,
                    e.to_string(),
                )
            })?;

        Ok(ParallelProcessor {
            pool,
            threads,
            progress: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Get current progress
    pub fn get_progress(&self) -> usize {
        self.progress.load(Ordering::Relaxed)
    }

    /// Submits every document in `batch` for `campaign_id`, in parallel.
    /// Results come back in submission order.
    pub fn process_batch(
        &self,
        dispatcher: &Dispatcher,
        campaign_id: CampaignId,
        batch: Vec<DocumentSubmission>,
    ) -> Vec<Result<ScoreMap>> {
        self.progress.store(0, Ordering::Relaxed);

        self.pool.install(|| {
            batch
                .par_iter()
                .map(|doc| {
                    let result = dispatcher.process_document(
                        campaign_id,
                        &doc.content,
                        &doc.article_id,
                        doc.published_date,
                    );
                    self.progress.fetch_add(1, Ordering::Relaxed);
                    result
                })
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use chrono::NaiveDate;
    use tempfile::TempDir;
    use crate::analysis::analyzer::TableAnalyzer;
    use crate::analysis::planner::StaticPlanner;
    use crate::storage::store::PersistedStore;

    #[test]
    fn batch_processes_every_document() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(PersistedStore::open(dir.path().join("store.json")));
        let dispatcher = Dispatcher::new(
            store.clone(),
            Arc::new(TableAnalyzer::from_pairs(&[("a", 0.5)])),
            Arc::new(StaticPlanner::from_names(&["a"])),
            4,
        );

        let campaign = dispatcher.create_campaign("T").unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let batch: Vec<DocumentSubmission> = (0..40)
            .map(|i| DocumentSubmission {
                article_id: format!("art-{}", i),
                published_date: date,
                content: format!("document {}", i),
            })
            .collect();

        let processor = ParallelProcessor::new(4).unwrap();
        let results = processor.process_batch(&dispatcher, campaign, batch);

        assert_eq!(results.len(), 40);
        assert!(results.iter().all(|r| r.is_ok()));
        assert_eq!(processor.get_progress(), 40);
        assert_eq!(store.get_article_ids(campaign).len(), 40);
        assert_eq!(store.get_by_date(campaign, date).unwrap().len(), 40);
    }

    #[test]
    fn unknown_campaign_fails_per_document_not_per_batch() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(PersistedStore::open(dir.path().join("store.json")));
        let dispatcher = Dispatcher::new(
            store,
            Arc::new(TableAnalyzer::from_pairs(&[("a", 0.5)])),
            Arc::new(StaticPlanner::from_names(&["a"])),
            2,
        );

        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let batch = vec![DocumentSubmission {
            article_id: "art".to_string(),
            published_date: date,
            content: "doc".to_string(),
        }];

        let processor = ParallelProcessor::new(2).unwrap();
        let results = processor.process_batch(&dispatcher, CampaignId(404), batch);
        assert_eq!(results.len(), 1);
        assert!(results[0].is_err());
    }
}
