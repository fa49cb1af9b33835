use serde::{Serialize, Deserialize};

/// Store statistics for monitoring
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    pub campaign_count: usize,
    pub article_count: usize,
    pub dated_entry_count: usize,
}
