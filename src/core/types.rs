use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use chrono::{DateTime, NaiveDate, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CampaignId(pub u64);

impl CampaignId {
    pub fn new(id: u64) -> Self {
        CampaignId(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for CampaignId {
    fn from(id: u64) -> Self {
        CampaignId(id)
    }
}

impl std::fmt::Display for CampaignId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dimension name -> score in [0, 1].
pub type ScoreMap = HashMap<String, f64>;

/// Date an article was published, used to group scores for range queries.
pub type PublishedDate = NaiveDate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub topic: String,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "MDims")]
    pub mdims: Vec<String>,
}

impl Campaign {
    pub fn new(topic: String, mdims: Vec<String>) -> Self {
        Campaign {
            topic,
            created_at: Utc::now(),
            mdims,
        }
    }
}

/// One document submitted for scoring, as fed to the batch processor.
#[derive(Debug, Clone)]
pub struct DocumentSubmission {
    pub article_id: String,
    pub published_date: PublishedDate,
    pub content: String,
}
