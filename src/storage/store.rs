use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use log::{debug, warn};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use crate::core::error::Result;
use crate::core::stats::StoreStats;
use crate::core::types::{Campaign, CampaignId, PublishedDate, ScoreMap};

/// The three namespaces of the backing file. All three fields always
/// serialize, so the on-disk document carries every namespace even when empty.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreData {
    #[serde(rename = "Campaigns", default)]
    campaigns: HashMap<CampaignId, Campaign>,

    #[serde(rename = "Articles", default)]
    articles: HashMap<CampaignId, HashMap<String, ScoreMap>>,

    #[serde(rename = "MDimValuesByDate", default)]
    by_date: HashMap<CampaignId, HashMap<PublishedDate, HashMap<String, ScoreMap>>>,
}

/// Single source of truth for all durable state, shared by every worker.
///
/// One coarse mutex guards both the in-memory namespaces and the full-file
/// rewrite. The file rewrite is not atomic against crashes, so the lock must
/// stay held from the start of the mutation until the write returns; that is
/// the only thing keeping two writers from interleaving bytes in the file.
pub struct PersistedStore {
    path: PathBuf,
    data: Mutex<StoreData>,
}

impl PersistedStore {
    /// Opens the store at `path`. A missing file yields an empty store, and so
    /// does a file that fails to parse.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let data = Self::load(&path);
        PersistedStore {
            path,
            data: Mutex::new(data),
        }
    }

    fn load(path: &Path) -> StoreData {
        match File::open(path) {
            Ok(file) => match serde_json::from_reader(file) {
                Ok(data) => data,
                Err(err) => {
                    warn!("unparseable store file {:?}, starting empty: {}", path, err);
                    StoreData::default()
                }
            },
            Err(_) => StoreData::default(),
        }
    }

    // Full rewrite of the backing file. Caller holds the data lock.
    fn persist(&self, data: &StoreData) -> Result<()> {
        let buf = serde_json::to_vec_pretty(data)?;
        let mut file = File::create(&self.path)?;
        file.write_all(&buf)?;
        debug!(
            "persisted store to {:?} ({} campaigns)",
            self.path,
            data.campaigns.len()
        );
        Ok(())
    }

    pub fn get_campaign(&self, id: CampaignId) -> Option<Campaign> {
        self.data.lock().campaigns.get(&id).cloned()
    }

    /// Ordering is unspecified; callers must not depend on it.
    pub fn get_campaign_ids(&self) -> Vec<CampaignId> {
        self.data.lock().campaigns.keys().copied().collect()
    }

    pub fn get_article(&self, campaign_id: CampaignId, article_id: &str) -> Option<ScoreMap> {
        self.data
            .lock()
            .articles
            .get(&campaign_id)
            .and_then(|articles| articles.get(article_id))
            .cloned()
    }

    pub fn get_article_ids(&self, campaign_id: CampaignId) -> Vec<String> {
        self.data
            .lock()
            .articles
            .get(&campaign_id)
            .map(|articles| articles.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn get_dates(&self, campaign_id: CampaignId) -> Vec<PublishedDate> {
        self.data
            .lock()
            .by_date
            .get(&campaign_id)
            .map(|dates| dates.keys().copied().collect())
            .unwrap_or_default()
    }

    pub fn get_by_date(
        &self,
        campaign_id: CampaignId,
        date: PublishedDate,
    ) -> Option<HashMap<String, ScoreMap>> {
        self.data
            .lock()
            .by_date
            .get(&campaign_id)
            .and_then(|dates| dates.get(&date))
            .cloned()
    }

    pub fn set_campaign(&self, id: CampaignId, campaign: Campaign) -> Result<()> {
        let mut data = self.data.lock();
        data.campaigns.insert(id, campaign);
        self.persist(&data)
    }

    /// Last write wins: a repeated article id replaces the prior scores.
    pub fn set_article(
        &self,
        campaign_id: CampaignId,
        article_id: &str,
        scores: ScoreMap,
    ) -> Result<()> {
        let mut data = self.data.lock();
        data.articles
            .entry(campaign_id)
            .or_default()
            .insert(article_id.to_string(), scores);
        self.persist(&data)
    }

    pub fn set_mdim_by_date(
        &self,
        campaign_id: CampaignId,
        date: PublishedDate,
        article_id: &str,
        scores: ScoreMap,
    ) -> Result<()> {
        let mut data = self.data.lock();
        data.by_date
            .entry(campaign_id)
            .or_default()
            .entry(date)
            .or_default()
            .insert(article_id.to_string(), scores);
        self.persist(&data)
    }

    /// Removes a campaign id from every namespace. No-op (and no file write)
    /// when the id is present nowhere. Not used by the campaign workflow.
    pub fn delete(&self, campaign_id: CampaignId) -> Result<()> {
        let mut data = self.data.lock();
        let in_campaigns = data.campaigns.remove(&campaign_id).is_some();
        let in_articles = data.articles.remove(&campaign_id).is_some();
        let in_by_date = data.by_date.remove(&campaign_id).is_some();
        if in_campaigns || in_articles || in_by_date {
            self.persist(&data)?;
        }
        Ok(())
    }

    pub fn stats(&self) -> StoreStats {
        let data = self.data.lock();
        StoreStats {
            campaign_count: data.campaigns.len(),
            article_count: data.articles.values().map(|a| a.len()).sum(),
            dated_entry_count: data
                .by_date
                .values()
                .flat_map(|dates| dates.values())
                .map(|articles| articles.len())
                .sum(),
        }
    }
}
