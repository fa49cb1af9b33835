use crate::core::error::Result;

/// Topic-to-dimension-set collaborator.
///
/// Given a campaign topic, returns the ordered list of dimension names the
/// campaign's articles will be scored on. Real implementations ask a remote
/// language-model service and may fail per call.
pub trait DimensionPlanner: Send + Sync {
    fn dimensions_for(&self, topic: &str) -> Result<Vec<String>>;
}

/// Planner that hands every topic the same fixed dimension list.
pub struct StaticPlanner {
    pub dimensions: Vec<String>,
}

impl StaticPlanner {
    pub fn new(dimensions: Vec<String>) -> Self {
        StaticPlanner { dimensions }
    }

    pub fn from_names(names: &[&str]) -> Self {
        StaticPlanner {
            dimensions: names.iter().map(|n| n.to_string()).collect(),
        }
    }
}

impl DimensionPlanner for StaticPlanner {
    fn dimensions_for(&self, _topic: &str) -> Result<Vec<String>> {
        Ok(self.dimensions.clone())
    }
}
