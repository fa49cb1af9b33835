use crate::core::error::Result;
use crate::core::types::ScoreMap;

/// Document scoring collaborator.
///
/// Given a document, returns one score in [0, 1] per dimension. Real
/// implementations call out to an external model service and may block for an
/// unbounded time or fail per call, so workers must invoke this without
/// holding the store lock and must not touch the store when it errors.
pub trait Analyzer: Send + Sync {
    fn score(&self, document: &str) -> Result<ScoreMap>;
}

/// Deterministic analyzer returning the same score table for every document.
///
/// Stands in for the remote scoring service in demos, benches, and tests.
pub struct TableAnalyzer {
    pub table: ScoreMap,
}

impl TableAnalyzer {
    pub fn new(table: ScoreMap) -> Self {
        TableAnalyzer { table }
    }

    pub fn from_pairs(pairs: &[(&str, f64)]) -> Self {
        TableAnalyzer {
            table: pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        }
    }
}

impl Analyzer for TableAnalyzer {
    fn score(&self, _document: &str) -> Result<ScoreMap> {
        Ok(self.table.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_analyzer_ignores_document_content() {
        let analyzer = TableAnalyzer::from_pairs(&[("storytelling", 0.85), ("pacing", 0.4)]);
        let a = analyzer.score("one document").unwrap();
        let b = analyzer.score("a different document").unwrap();
        assert_eq!(a, b);
        assert_eq!(a["storytelling"], 0.85);
    }
}
