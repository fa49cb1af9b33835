use std::sync::Arc;
use log::info;
use crate::analysis::analyzer::Analyzer;
use crate::analysis::planner::DimensionPlanner;
use crate::core::error::{Error, Result};
use crate::core::ids::IdSupplier;
use crate::core::types::{Campaign, CampaignId, PublishedDate, ScoreMap};
use crate::storage::store::PersistedStore;

/// One node of the dispatch pool.
///
/// Workers translate campaign/document operations into store calls and invoke
/// the external collaborators for writes. They hold no mutable state of their
/// own beyond an identity; every worker shares the one injected store, so any
/// number of them can run against it safely.
pub struct Worker {
    pub id: usize,
    store: Arc<PersistedStore>,
    ids: Arc<IdSupplier>,
    analyzer: Arc<dyn Analyzer>,
    planner: Arc<dyn DimensionPlanner>,
}

impl Worker {
    pub fn new(
        id: usize,
        store: Arc<PersistedStore>,
        ids: Arc<IdSupplier>,
        analyzer: Arc<dyn Analyzer>,
        planner: Arc<dyn DimensionPlanner>,
    ) -> Self {
        Worker {
            id,
            store,
            ids,
            analyzer,
            planner,
        }
    }

    /// Creates a campaign with a fresh id and the planner's dimension set for
    /// the topic. A planner failure propagates and nothing is stored.
    pub fn create_campaign(&self, topic: &str) -> Result<CampaignId> {
        let dimensions = self.planner.dimensions_for(topic)?;
        let id = self.ids.next_id();
        let campaign = Campaign::new(topic.to_string(), dimensions);
        self.store.set_campaign(id, campaign)?;
        info!("worker {} created campaign {} for topic {:?}", self.id, id, topic);
        Ok(id)
    }

    /// Scores `document` against the campaign's dimensions and records the
    /// result under `article_id` in both the article and by-date namespaces.
    ///
    /// The campaign lookup happens before the analyzer call, so a missing
    /// campaign never spends an analysis round-trip; an analyzer failure
    /// propagates with the store untouched. The analyzer runs without the
    /// store lock held, so a slow analysis never stalls unrelated operations.
    pub fn process_document(
        &self,
        campaign_id: CampaignId,
        document: &str,
        article_id: &str,
        published_date: PublishedDate,
    ) -> Result<ScoreMap> {
        if self.store.get_campaign(campaign_id).is_none() {
            return Err(Error::campaign_not_found());
        }

        let scores = self.analyzer.score(document)?;

        self.store.set_article(campaign_id, article_id, scores.clone())?;
        self.store
            .set_mdim_by_date(campaign_id, published_date, article_id, scores.clone())?;
        Ok(scores)
    }

    pub fn get_campaign_details(&self, campaign_id: CampaignId) -> Option<Campaign> {
        self.store.get_campaign(campaign_id)
    }

    pub fn get_campaign_id_list(&self) -> Vec<CampaignId> {
        self.store.get_campaign_ids()
    }

    pub fn get_article_ids_for_campaign(&self, campaign_id: CampaignId) -> Vec<String> {
        self.store.get_article_ids(campaign_id)
    }

    pub fn get_date_list(&self, campaign_id: CampaignId) -> Vec<PublishedDate> {
        self.store.get_dates(campaign_id)
    }

    pub fn get_by_date(
        &self,
        campaign_id: CampaignId,
        date: PublishedDate,
    ) -> Option<std::collections::HashMap<String, ScoreMap>> {
        self.store.get_by_date(campaign_id, date)
    }

    pub fn get_by_article_id(
        &self,
        campaign_id: CampaignId,
        article_id: &str,
    ) -> Option<ScoreMap> {
        self.store.get_article(campaign_id, article_id)
    }
}
